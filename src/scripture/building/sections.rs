//! Translation section extraction
//!
//! Scans the verse stream of the whole book in order. The first verse of the book opens
//! section 1; every later verse carrying a section break opens the next one and closes the
//! previous section at the verse emitted just before it. Inside a chapter that is the
//! preceding verse; at the top of a chapter it is the last verse of the nearest earlier chapter
//! that has verses. The last section stays open-ended.
//!
//! Several breaks reaching the same verse count as one, so starts are strictly ascending.

use crate::scripture::model::{format_reference, TranslationSection, VersePosition};
use crate::scripture::normalization::NormalizedChapter;

/// Default section title; `{n}` is replaced by the section number
pub const DEFAULT_TITLE_TEMPLATE: &str = "Section {n}";

pub struct SectionExtractor<'a> {
    book_code: &'a str,
    title_template: &'a str,
}

impl<'a> SectionExtractor<'a> {
    pub fn new(book_code: &'a str) -> Self {
        Self {
            book_code,
            title_template: DEFAULT_TITLE_TEMPLATE,
        }
    }

    pub fn with_title_template(mut self, template: &'a str) -> Self {
        self.title_template = template;
        self
    }

    pub fn extract<'c>(
        &self,
        chapters: impl IntoIterator<Item = &'c NormalizedChapter>,
    ) -> Vec<TranslationSection> {
        let mut sections: Vec<TranslationSection> = Vec::new();
        let mut counter = 0u32;
        let mut previous: Option<VersePosition> = None;

        for chapter in chapters {
            for verse in &chapter.verses {
                let position = VersePosition::new(chapter.number, verse.number);
                match previous {
                    None => {
                        counter += 1;
                        sections.push(self.open(counter, position));
                    }
                    Some(last_emitted) if verse.context.section_break => {
                        if let Some(current) = sections.last_mut() {
                            self.close(current, last_emitted);
                        }
                        counter += 1;
                        sections.push(self.open(counter, position));
                    }
                    Some(_) => {}
                }
                previous = Some(position);
            }
        }
        sections
    }

    fn open(&self, counter: u32, start: VersePosition) -> TranslationSection {
        TranslationSection {
            id: counter.to_string(),
            start_reference: format_reference(self.book_code, start),
            start_chapter: start.chapter,
            start_verse: start.verse,
            end_reference: None,
            end_chapter: None,
            end_verse: None,
            title: self.title_template.replace("{n}", &counter.to_string()),
        }
    }

    fn close(&self, section: &mut TranslationSection, end: VersePosition) {
        section.end_reference = Some(format_reference(self.book_code, end));
        section.end_chapter = Some(end.chapter);
        section.end_verse = Some(end.verse);
    }
}
