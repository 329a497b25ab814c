//! Tokenizer output for one book
//!
//! The tokenizer hands over `chapters[chapter][verse].verseObjects` plus an optional `headers`
//! list. [`BookSource`] is that structure after decoding: numeric keys only, sorted, with each
//! verse's objects turned into [`MarkerNode`]s. Entries that can't be interpreted are dropped
//! here and never reach the builder.

use super::markers::{decode_verse_objects, MarkerNode};
use serde::Deserialize;
use serde_json::{Map, Value};

/// A verse entry that carried a `verseObjects` list
#[derive(Debug, Clone, PartialEq)]
pub struct VerseSource {
    pub number: u32,
    pub objects: Vec<MarkerNode>,
}

/// A chapter of the tokenizer output
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChapterSource {
    pub number: u32,
    /// Objects found before the first verse (`front` key). Only their markers are used.
    pub front: Vec<MarkerNode>,
    pub verses: Vec<VerseSource>,
}

impl ChapterSource {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    pub fn with_front(mut self, front: Vec<MarkerNode>) -> Self {
        self.front = front;
        self
    }

    pub fn with_verse(mut self, number: u32, objects: Vec<MarkerNode>) -> Self {
        self.verses.push(VerseSource { number, objects });
        self.verses.sort_by_key(|verse| verse.number);
        self
    }
}

/// A decoded book, ready for building
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookSource {
    pub book: String,
    pub book_code: String,
    pub chapters: Vec<ChapterSource>,
}

#[derive(Debug, Deserialize)]
struct Header {
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl BookSource {
    pub fn new(book: impl Into<String>, book_code: impl Into<String>) -> Self {
        Self {
            book: book.into(),
            book_code: book_code.into(),
            chapters: Vec::new(),
        }
    }

    pub fn with_chapter(mut self, chapter: ChapterSource) -> Self {
        self.chapters.push(chapter);
        self.chapters.sort_by_key(|chapter| chapter.number);
        self
    }

    /// Override the book name and code taken from the headers
    pub fn with_identity(mut self, book: impl Into<String>, book_code: impl Into<String>) -> Self {
        self.book = book.into();
        self.book_code = book_code.into().to_uppercase();
        self
    }

    /// Parse the tokenizer's JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value = parse_json(json)?;
        let source = Self::from_value(&value);
        release(value);
        Ok(source)
    }

    /// Decode the tokenizer's JSON value.
    ///
    /// A value without a `chapters` object decodes to a book with no chapters.
    pub fn from_value(value: &Value) -> Self {
        let mut source = BookSource::default();

        if let Some(headers) = value.get("headers") {
            match Vec::<Header>::deserialize(headers) {
                Ok(headers) => source.apply_headers(&headers),
                Err(err) => log::debug!("ignoring unreadable headers: {err}"),
            }
        }

        match value.get("chapters").and_then(Value::as_object) {
            Some(chapters) => {
                source.chapters = numeric_entries(chapters)
                    .map(|(number, chapter)| decode_chapter(number, chapter))
                    .collect();
                source.chapters.sort_by_key(|chapter| chapter.number);
            }
            None => log::warn!("tokenizer output has no chapters; building an empty book"),
        }
        source
    }

    fn apply_headers(&mut self, headers: &[Header]) {
        let find = |tag: &str| {
            headers
                .iter()
                .find(|header| header.tag.as_deref() == Some(tag))
                .and_then(|header| header.content.as_deref())
                .map(str::trim)
                .filter(|content| !content.is_empty())
        };

        if let Some(id) = find("id") {
            if let Some(code) = id.split_whitespace().next() {
                self.book_code = code.to_uppercase();
            }
        }
        if let Some(name) = ["h", "toc1", "mt", "mt1"].into_iter().find_map(find) {
            self.book = name.to_string();
        }
    }

    pub fn verse_count(&self) -> usize {
        self.chapters.iter().map(|chapter| chapter.verses.len()).sum()
    }
}

/// Parse JSON text with no nesting limit.
///
/// Alignment milestones nest one object per level, well past serde_json's default limit of 128.
/// Deep documents grow the stack on the heap instead of overflowing it.
pub fn parse_json(json: &str) -> Result<Value, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// Drop a JSON value one level at a time
pub fn release(value: Value) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Value::Array(items) => pending.extend(items),
            Value::Object(map) => pending.extend(map.into_iter().map(|(_, value)| value)),
            _ => {}
        }
    }
}

fn numeric_entries(map: &Map<String, Value>) -> impl Iterator<Item = (u32, &Value)> {
    map.iter().filter_map(|(key, value)| match key.trim().parse::<u32>() {
        Ok(number) if number > 0 => Some((number, value)),
        _ => {
            if key != "front" {
                log::debug!("ignoring non-numeric key {key:?}");
            }
            None
        }
    })
}

fn decode_chapter(number: u32, chapter: &Value) -> ChapterSource {
    let mut decoded = ChapterSource::new(number);
    let Some(entries) = chapter.as_object() else {
        log::debug!("chapter {number} is not an object; treating it as empty");
        return decoded;
    };

    if let Some(front) = entries.get("front").and_then(verse_objects) {
        decoded.front = decode_verse_objects(front);
    }

    decoded.verses = numeric_entries(entries)
        .filter_map(|(verse, entry)| match verse_objects(entry) {
            Some(objects) => Some(VerseSource {
                number: verse,
                objects: decode_verse_objects(objects),
            }),
            None => {
                log::debug!("skipping {number}:{verse}: no verse objects");
                None
            }
        })
        .collect();
    decoded.verses.sort_by_key(|verse| verse.number);
    decoded
}

fn verse_objects(entry: &Value) -> Option<&Vec<Value>> {
    entry
        .get("verseObjects")
        .or_else(|| entry.get("verse_objects"))
        .and_then(Value::as_array)
}
