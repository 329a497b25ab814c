//! Reference parsing and resolution
//!
//!     References follow `BOOKCODE chapter:verse[-[chapter:]verse]`:
//!
//!     | Shape          | Example         |
//!     |----------------|-----------------|
//!     | Single verse   | `JON 1:3`       |
//!     | Same chapter   | `JON 1:3-5`     |
//!     | Cross chapter  | `JON 1:17-2:1`  |
//!
//!     The cross-chapter pattern is tried first, then the single/same-chapter one. Book codes
//!     are case-insensitive and stored uppercased. Anything else, including inverted ranges and
//!     zero chapter or verse numbers, is not a reference: parsing yields `None` and callers show
//!     nothing.
//!
//! Resolution
//!
//!     Within the span, the start chapter contributes `start_verse..` to its last verse, the end
//!     chapter its first verse to `end_verse`, and interior chapters all of their verses.
//!     Paragraph resolution includes every paragraph whose verse range intersects the requested
//!     one and keeps only the verses in range, so edge paragraphs may come back partial.

use super::config::EngineConfig;
use super::model::{CleanVerse, Paragraph, Scripture, VersePosition};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;

static CROSS_CHAPTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([0-9A-Za-z]+)\s+(\d+):(\d+)\s*-\s*(\d+):(\d+)\s*$")
        .expect("cross-chapter reference pattern is valid")
});

static SAME_CHAPTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([0-9A-Za-z]+)\s+(\d+):(\d+)(?:\s*-\s*(\d+))?\s*$")
        .expect("same-chapter reference pattern is valid")
});

/// A parsed verse selector
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptureReference {
    pub book_code: String,
    pub start_chapter: u32,
    pub start_verse: u32,
    pub end_chapter: u32,
    pub end_verse: u32,
    pub display_reference: String,
}

impl ScriptureReference {
    /// Build a reference spanning `start..=end`. Returns `None` for inverted or zero positions.
    pub fn new(book_code: &str, start: VersePosition, end: VersePosition) -> Option<Self> {
        if start.chapter == 0 || start.verse == 0 || end.chapter == 0 || end.verse == 0 {
            return None;
        }
        if end < start {
            return None;
        }
        let book_code = book_code.to_uppercase();
        let display_reference = display(&book_code, start, end);
        Some(Self {
            book_code,
            start_chapter: start.chapter,
            start_verse: start.verse,
            end_chapter: end.chapter,
            end_verse: end.verse,
            display_reference,
        })
    }

    pub fn single(book_code: &str, position: VersePosition) -> Option<Self> {
        Self::new(book_code, position, position)
    }

    pub fn start(&self) -> VersePosition {
        VersePosition::new(self.start_chapter, self.start_verse)
    }

    pub fn end(&self) -> VersePosition {
        VersePosition::new(self.end_chapter, self.end_verse)
    }

    pub fn contains(&self, chapter: u32, verse: u32) -> bool {
        let position = VersePosition::new(chapter, verse);
        self.start() <= position && position <= self.end()
    }

    pub fn is_single_verse(&self) -> bool {
        self.start() == self.end()
    }

    pub fn spans_chapters(&self) -> bool {
        self.start_chapter != self.end_chapter
    }

    /// Verse bounds this reference selects inside `chapter`, if the chapter is in the span
    fn bounds_in(&self, chapter: u32) -> Option<(u32, u32)> {
        if chapter < self.start_chapter || chapter > self.end_chapter {
            return None;
        }
        let low = if chapter == self.start_chapter {
            self.start_verse
        } else {
            0
        };
        let high = if chapter == self.end_chapter {
            self.end_verse
        } else {
            u32::MAX
        };
        Some((low, high))
    }
}

impl fmt::Display for ScriptureReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_reference)
    }
}

fn display(book_code: &str, start: VersePosition, end: VersePosition) -> String {
    let span = if start == end {
        start.to_string()
    } else if start.chapter == end.chapter {
        format!("{}-{}", start, end.verse)
    } else {
        format!("{}-{}", start, end)
    };
    if book_code.is_empty() {
        span
    } else {
        format!("{} {}", book_code, span)
    }
}

/// Parse a reference string; `None` when it matches neither reference shape
pub fn parse(reference: &str) -> Option<ScriptureReference> {
    if let Some(caps) = CROSS_CHAPTER.captures(reference) {
        let start = VersePosition::new(number(&caps, 2)?, number(&caps, 3)?);
        let end = VersePosition::new(number(&caps, 4)?, number(&caps, 5)?);
        return ScriptureReference::new(&caps[1], start, end);
    }
    let caps = SAME_CHAPTER.captures(reference)?;
    let chapter = number(&caps, 2)?;
    let start = VersePosition::new(chapter, number(&caps, 3)?);
    let end = match caps.get(4) {
        Some(_) => VersePosition::new(chapter, number(&caps, 4)?),
        None => start,
    };
    ScriptureReference::new(&caps[1], start, end)
}

fn number(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group)?.as_str().parse().ok()
}

/// A paragraph cut down to the verses a reference selects
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphSlice<'s> {
    pub chapter: u32,
    pub paragraph: &'s Paragraph,
    pub verses: Vec<&'s CleanVerse>,
}

impl ParagraphSlice<'_> {
    pub fn is_partial(&self) -> bool {
        self.verses.len() < self.paragraph.verses.len()
    }

    pub fn text(&self) -> String {
        self.verses
            .iter()
            .map(|verse| verse.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Applies references to a [`Scripture`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceResolver {
    enforce_book_code: bool,
}

impl ReferenceResolver {
    pub fn new() -> Self {
        Self {
            enforce_book_code: true,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new().enforce_book_code(config.references.enforce_book_code)
    }

    /// When enabled, a reference naming another book resolves to nothing
    pub fn enforce_book_code(mut self, enforce: bool) -> Self {
        self.enforce_book_code = enforce;
        self
    }

    /// Verses selected by `reference`, in book order
    pub fn resolve<'s>(
        &self,
        scripture: &'s Scripture,
        reference: &ScriptureReference,
    ) -> Vec<&'s CleanVerse> {
        if !self.applies_to(scripture, reference) {
            return Vec::new();
        }
        scripture
            .chapters()
            .iter()
            .filter_map(|chapter| {
                let (low, high) = reference.bounds_in(chapter.number)?;
                Some(chapter.verses_between(low, high))
            })
            .flatten()
            .collect()
    }

    /// Parse and resolve in one step; an unparseable string selects nothing
    pub fn resolve_str<'s>(
        &self,
        scripture: &'s Scripture,
        reference: &str,
    ) -> Vec<&'s CleanVerse> {
        match parse(reference) {
            Some(reference) => self.resolve(scripture, &reference),
            None => {
                log::debug!("not a reference: {reference:?}");
                Vec::new()
            }
        }
    }

    /// Paragraphs intersecting `reference`, each limited to the verses in range
    pub fn resolve_paragraphs<'s>(
        &self,
        scripture: &'s Scripture,
        reference: &ScriptureReference,
    ) -> Vec<ParagraphSlice<'s>> {
        if !self.applies_to(scripture, reference) {
            return Vec::new();
        }
        let mut slices = Vec::new();
        for chapter in scripture.chapters() {
            let Some((low, high)) = reference.bounds_in(chapter.number) else {
                continue;
            };
            for paragraph in &chapter.paragraphs {
                if !paragraph.intersects(low, high) {
                    continue;
                }
                let verses: Vec<&CleanVerse> = paragraph
                    .verses
                    .iter()
                    .filter(|verse| low <= verse.number && verse.number <= high)
                    .collect();
                if !verses.is_empty() {
                    slices.push(ParagraphSlice {
                        chapter: chapter.number,
                        paragraph,
                        verses,
                    });
                }
            }
        }
        slices
    }

    fn applies_to(&self, scripture: &Scripture, reference: &ScriptureReference) -> bool {
        let book_code = scripture.book_code();
        let matches = !self.enforce_book_code
            || book_code.is_empty()
            || reference.book_code.is_empty()
            || book_code.eq_ignore_ascii_case(&reference.book_code);
        if !matches {
            log::debug!(
                "reference {} does not belong to {}",
                reference.display_reference,
                book_code
            );
        }
        matches
    }
}

impl Default for ReferenceResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve with the default resolver
pub fn resolve<'s>(
    scripture: &'s Scripture,
    reference: &ScriptureReference,
) -> Vec<&'s CleanVerse> {
    ReferenceResolver::new().resolve(scripture, reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_verse() {
        let reference = parse("JON 1:3").unwrap();
        assert_eq!(reference.start(), VersePosition::new(1, 3));
        assert_eq!(reference.end(), VersePosition::new(1, 3));
        assert!(reference.is_single_verse());
        assert_eq!(reference.display_reference, "JON 1:3");
    }

    #[test]
    fn test_parse_same_chapter_range() {
        let reference = parse("jon 1:3-5").unwrap();
        assert_eq!(reference.book_code, "JON");
        assert_eq!(reference.end(), VersePosition::new(1, 5));
        assert!(!reference.spans_chapters());
        assert_eq!(reference.to_string(), "JON 1:3-5");
    }

    #[test]
    fn test_parse_cross_chapter_range() {
        let reference = parse("JON 1:17-2:1").unwrap();
        assert_eq!(reference.start(), VersePosition::new(1, 17));
        assert_eq!(reference.end(), VersePosition::new(2, 1));
        assert!(reference.spans_chapters());
        assert_eq!(reference.display_reference, "JON 1:17-2:1");
    }

    #[test]
    fn test_cross_pattern_within_one_chapter_displays_short_form() {
        let reference = parse("1JN 3:1-3:4").unwrap();
        assert_eq!(reference.book_code, "1JN");
        assert_eq!(reference.display_reference, "1JN 3:1-4");
    }

    #[test]
    fn test_empty_book_code_has_no_leading_space() {
        let start = VersePosition::new(1, 1);
        let single = ScriptureReference::single("", start).unwrap();
        assert_eq!(single.display_reference, "1:1");
        let span = ScriptureReference::new("", start, VersePosition::new(2, 3)).unwrap();
        assert_eq!(span.to_string(), "1:1-2:3");
    }

    #[test]
    fn test_rejects_malformed_references() {
        for input in [
            "",
            "JON",
            "JON 1",
            "JON 1:",
            "JON:1:3",
            "JON 1:5-3",
            "JON 2:1-1:17",
            "JON 0:1",
            "JON 1:0",
            "JON 1:3-",
            "JON 1:3-5-7",
            "JON 99999999999:1",
        ] {
            assert_eq!(parse(input), None, "{input:?} should not parse");
        }
    }

    #[test]
    fn test_contains() {
        let reference = parse("JON 1:17-2:2").unwrap();
        assert!(reference.contains(1, 17));
        assert!(reference.contains(2, 1));
        assert!(!reference.contains(1, 16));
        assert!(!reference.contains(2, 3));
    }
}
