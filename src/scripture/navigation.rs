//! Section navigation
//!
//! Read-only accessors over a book's ordered translation sections. Next and previous step
//! through the list and return `None` at either end; they never wrap.

use super::model::{CleanVerse, Scripture, TranslationSection, VersePosition};
use super::reference::{ReferenceResolver, ScriptureReference};

#[derive(Debug, Clone, Copy)]
pub struct SectionNavigator<'s> {
    scripture: &'s Scripture,
}

impl<'s> SectionNavigator<'s> {
    pub fn new(scripture: &'s Scripture) -> Self {
        Self { scripture }
    }

    pub fn sections(&self) -> &'s [TranslationSection] {
        self.scripture.sections()
    }

    pub fn len(&self) -> usize {
        self.sections().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections().is_empty()
    }

    pub fn first(&self) -> Option<&'s TranslationSection> {
        self.sections().first()
    }

    pub fn last(&self) -> Option<&'s TranslationSection> {
        self.sections().last()
    }

    pub fn by_id(&self, id: &str) -> Option<&'s TranslationSection> {
        self.sections().iter().find(|section| section.id == id)
    }

    /// The section containing `chapter:verse`. The open-ended last section matches anything
    /// at or after its start.
    pub fn by_reference(&self, chapter: u32, verse: u32) -> Option<&'s TranslationSection> {
        let position = VersePosition::new(chapter, verse);
        self.sections()
            .iter()
            .find(|section| section.contains(position))
    }

    pub fn next(&self, id: &str) -> Option<&'s TranslationSection> {
        let index = self.index_of(id)?;
        self.sections().get(index + 1)
    }

    pub fn previous(&self, id: &str) -> Option<&'s TranslationSection> {
        let index = self.index_of(id)?;
        index
            .checked_sub(1)
            .and_then(|previous| self.sections().get(previous))
    }

    /// The section's span as a reference, with an open end resolved to the book's last verse
    pub fn reference_for(&self, section: &TranslationSection) -> Option<ScriptureReference> {
        let end = section.end().or_else(|| self.scripture.last_position())?;
        ScriptureReference::new(self.scripture.book_code(), section.start(), end)
    }

    /// Verses belonging to a section, in book order
    pub fn verses(&self, section: &TranslationSection) -> Vec<&'s CleanVerse> {
        match self.reference_for(section) {
            Some(reference) => ReferenceResolver::new()
                .enforce_book_code(false)
                .resolve(self.scripture, &reference),
            None => Vec::new(),
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.sections().iter().position(|section| section.id == id)
    }
}
