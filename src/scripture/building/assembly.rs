//! Scripture assembly
//!
//! Runs the segmenter and the section extractor over a normalized book and stitches their
//! results into a [`Scripture`]. Every verse ends up with both its paragraph id and the id of
//! the section containing it.

use super::sections::{SectionExtractor, DEFAULT_TITLE_TEMPLATE};
use super::segmentation::ParagraphSegmenter;
use crate::scripture::config::EngineConfig;
use crate::scripture::model::{Chapter, Scripture, TranslationSection, VersePosition};
use crate::scripture::normalization::{normalize_book, NormalizedChapter};
use crate::scripture::source::BookSource;

#[derive(Debug, Clone)]
pub struct ScriptureBuilder {
    title_template: String,
}

impl ScriptureBuilder {
    pub fn new() -> Self {
        Self {
            title_template: DEFAULT_TITLE_TEMPLATE.to_string(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new().with_title_template(config.sections.title_template.clone())
    }

    pub fn with_title_template(mut self, template: impl Into<String>) -> Self {
        self.title_template = template.into();
        self
    }

    /// Normalize and assemble a decoded book
    pub fn build(&self, source: &BookSource) -> Scripture {
        let chapters = normalize_book(source);
        self.assemble(&source.book, &source.book_code, &chapters)
    }

    /// Assemble an already normalized book
    pub fn assemble(
        &self,
        book: &str,
        book_code: &str,
        chapters: &[NormalizedChapter],
    ) -> Scripture {
        let mut accepted: Vec<&NormalizedChapter> = Vec::with_capacity(chapters.len());
        for chapter in chapters {
            if chapter.verses.is_empty() {
                log::debug!("chapter {} has no verses with text; omitted", chapter.number);
            } else if accepted
                .last()
                .is_some_and(|previous| previous.number >= chapter.number)
            {
                log::debug!("chapter {} out of order; omitted", chapter.number);
            } else {
                accepted.push(chapter);
            }
        }

        let sections = SectionExtractor::new(book_code)
            .with_title_template(&self.title_template)
            .extract(accepted.iter().copied());
        let segmenter = ParagraphSegmenter::new(book_code);
        let mut cursor = SectionCursor::new(&sections);

        let mut built = Vec::with_capacity(accepted.len());
        for chapter in accepted {
            let mut paragraphs = segmenter.segment(chapter.number, &chapter.verses);
            for verse in paragraphs.iter_mut().flat_map(|p| p.verses.iter_mut()) {
                verse.section_id = cursor.section_at(verse.position()).map(|s| s.id.clone());
            }
            let verses = paragraphs
                .iter()
                .flat_map(|paragraph| paragraph.verses.iter().cloned())
                .collect();
            built.push(Chapter::new(chapter.number, verses, paragraphs));
        }

        Scripture::new(book, book_code, built, sections)
    }
}

impl Default for ScriptureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks the ordered sections alongside verses visited in book order
struct SectionCursor<'a> {
    sections: &'a [TranslationSection],
    index: usize,
}

impl<'a> SectionCursor<'a> {
    fn new(sections: &'a [TranslationSection]) -> Self {
        Self { sections, index: 0 }
    }

    fn section_at(&mut self, position: VersePosition) -> Option<&'a TranslationSection> {
        while self
            .sections
            .get(self.index + 1)
            .is_some_and(|next| next.start() <= position)
        {
            self.index += 1;
        }
        self.sections
            .get(self.index)
            .filter(|section| section.contains(position))
    }
}
