//! Paragraph element
//!
//! A paragraph is a run of consecutive verses of one chapter sharing a style. Poetry styles
//! (`q`, `q1`..`q4`) carry an indentation level that renderers use as a multiplier; every other
//! style has level 0.

use super::verse::CleanVerse;
use crate::scripture::markers::ParagraphStyle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub id: String,
    pub style: ParagraphStyle,
    pub indent_level: u32,
    pub start_verse: u32,
    pub end_verse: u32,
    pub verse_count: usize,
    /// Verse texts joined with single spaces
    pub combined_text: String,
    pub verses: Vec<CleanVerse>,
}

impl Paragraph {
    /// Build a paragraph from a non-empty verse run. Returns `None` for an empty run.
    pub fn from_verses(
        id: impl Into<String>,
        style: ParagraphStyle,
        verses: Vec<CleanVerse>,
    ) -> Option<Self> {
        let start_verse = verses.iter().map(|verse| verse.number).min()?;
        let end_verse = verses.iter().map(|verse| verse.number).max()?;
        let combined_text = verses
            .iter()
            .map(|verse| verse.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Some(Self {
            id: id.into(),
            style,
            indent_level: style.indent_level(),
            start_verse,
            end_verse,
            verse_count: verses.len(),
            combined_text,
            verses,
        })
    }

    /// Whether this paragraph's verse range intersects `start..=end`
    pub fn intersects(&self, start: u32, end: u32) -> bool {
        self.start_verse <= end && self.end_verse >= start
    }
}
