//! Chapter element

use super::paragraph::Paragraph;
use super::verse::CleanVerse;
use serde::{Deserialize, Serialize};

/// A chapter: its verses in ascending order and their paragraph partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub number: u32,
    pub verse_count: usize,
    pub paragraph_count: usize,
    pub verses: Vec<CleanVerse>,
    pub paragraphs: Vec<Paragraph>,
}

impl Chapter {
    pub fn new(number: u32, verses: Vec<CleanVerse>, paragraphs: Vec<Paragraph>) -> Self {
        Self {
            number,
            verse_count: verses.len(),
            paragraph_count: paragraphs.len(),
            verses,
            paragraphs,
        }
    }

    pub fn verse(&self, number: u32) -> Option<&CleanVerse> {
        self.verses
            .binary_search_by_key(&number, |verse| verse.number)
            .ok()
            .map(|index| &self.verses[index])
    }

    pub fn first_verse(&self) -> Option<&CleanVerse> {
        self.verses.first()
    }

    pub fn last_verse(&self) -> Option<&CleanVerse> {
        self.verses.last()
    }

    /// Verses numbered within `start..=end`, ascending
    pub fn verses_between(&self, start: u32, end: u32) -> impl Iterator<Item = &CleanVerse> {
        self.verses
            .iter()
            .filter(move |verse| start <= verse.number && verse.number <= end)
    }
}
