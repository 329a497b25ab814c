//! Translation sections
//!
//! A translation section groups verses for community checking independently of chapters. The
//! last section of a book has no end: it runs to the end of the book, and readers resolve that
//! against the book's last verse when they need a concrete range.

use super::verse::VersePosition;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationSection {
    pub id: String,
    pub start_reference: String,
    pub start_chapter: u32,
    pub start_verse: u32,
    pub end_reference: Option<String>,
    pub end_chapter: Option<u32>,
    pub end_verse: Option<u32>,
    pub title: String,
}

impl TranslationSection {
    pub fn start(&self) -> VersePosition {
        VersePosition::new(self.start_chapter, self.start_verse)
    }

    /// Closing position, `None` for the open-ended last section
    pub fn end(&self) -> Option<VersePosition> {
        Some(VersePosition::new(self.end_chapter?, self.end_verse?))
    }

    pub fn is_open_ended(&self) -> bool {
        self.end().is_none()
    }

    /// Inclusive containment; an open end has no upper bound
    pub fn contains(&self, position: VersePosition) -> bool {
        self.start() <= position && self.end().map_or(true, |end| position <= end)
    }
}
