//! Verses and verse positions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A (chapter, verse) pair, ordered in book order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VersePosition {
    pub chapter: u32,
    pub verse: u32,
}

impl VersePosition {
    pub fn new(chapter: u32, verse: u32) -> Self {
        Self { chapter, verse }
    }
}

impl fmt::Display for VersePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

/// Human readable reference such as `JON 1:3`
pub fn format_reference(book_code: &str, position: VersePosition) -> String {
    if book_code.is_empty() {
        position.to_string()
    } else {
        format!("{} {}", book_code, position)
    }
}

/// A verse with its normalized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanVerse {
    pub chapter: u32,
    pub number: u32,
    /// Trimmed, whitespace-normalized, never empty
    pub text: String,
    pub reference: String,
    pub paragraph_id: Option<String>,
    pub section_id: Option<String>,
}

impl CleanVerse {
    pub fn position(&self) -> VersePosition {
        VersePosition::new(self.chapter, self.number)
    }
}

impl fmt::Display for CleanVerse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_order_by_chapter_then_verse() {
        assert!(VersePosition::new(1, 17) < VersePosition::new(2, 1));
        assert!(VersePosition::new(2, 3) > VersePosition::new(2, 2));
    }

    #[test]
    fn test_format_reference() {
        assert_eq!(format_reference("JON", VersePosition::new(1, 3)), "JON 1:3");
        assert_eq!(format_reference("", VersePosition::new(4, 11)), "4:11");
    }
}
