//! The scripture aggregate

use super::chapter::Chapter;
use super::section::TranslationSection;
use super::verse::{CleanVerse, VersePosition};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptureMetadata {
    pub total_chapters: usize,
    pub total_verses: usize,
    pub total_paragraphs: usize,
}

/// One book: chapters in ascending order plus its translation sections
///
/// Built once by the builder and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scripture {
    book: String,
    book_code: String,
    metadata: ScriptureMetadata,
    chapters: Vec<Chapter>,
    sections: Vec<TranslationSection>,
}

impl Scripture {
    pub fn new(
        book: impl Into<String>,
        book_code: impl Into<String>,
        chapters: Vec<Chapter>,
        sections: Vec<TranslationSection>,
    ) -> Self {
        let metadata = ScriptureMetadata {
            total_chapters: chapters.len(),
            total_verses: chapters.iter().map(|chapter| chapter.verses.len()).sum(),
            total_paragraphs: chapters.iter().map(|chapter| chapter.paragraphs.len()).sum(),
        };
        Self {
            book: book.into(),
            book_code: book_code.into(),
            metadata,
            chapters,
            sections,
        }
    }

    /// A book with no chapters and no sections
    pub fn empty(book: impl Into<String>, book_code: impl Into<String>) -> Self {
        Self::new(book, book_code, Vec::new(), Vec::new())
    }

    pub fn book(&self) -> &str {
        &self.book
    }

    pub fn book_code(&self) -> &str {
        &self.book_code
    }

    pub fn metadata(&self) -> &ScriptureMetadata {
        &self.metadata
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn sections(&self) -> &[TranslationSection] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters
            .binary_search_by_key(&number, |chapter| chapter.number)
            .ok()
            .map(|index| &self.chapters[index])
    }

    pub fn verse(&self, chapter: u32, verse: u32) -> Option<&CleanVerse> {
        self.chapter(chapter)?.verse(verse)
    }

    /// All verses in book order
    pub fn verses(&self) -> impl Iterator<Item = &CleanVerse> {
        self.chapters.iter().flat_map(|chapter| chapter.verses.iter())
    }

    pub fn first_position(&self) -> Option<VersePosition> {
        self.verses().next().map(CleanVerse::position)
    }

    pub fn last_position(&self) -> Option<VersePosition> {
        self.chapters
            .iter()
            .rev()
            .find_map(|chapter| chapter.last_verse())
            .map(CleanVerse::position)
    }
}
