//! Paragraph segmentation
//!
//! Partitions one chapter's verses into paragraphs. A verse whose context carries a paragraph
//! marker closes the open paragraph and opens a new one with the marker's style; a chapter
//! that starts without a marker gets an implicit `p` paragraph. Chapters are segmented on their
//! own, so a paragraph never crosses a chapter boundary.

use crate::scripture::markers::ParagraphStyle;
use crate::scripture::model::{format_reference, CleanVerse, Paragraph, VersePosition};
use crate::scripture::normalization::NormalizedVerse;

pub struct ParagraphSegmenter<'a> {
    book_code: &'a str,
}

impl<'a> ParagraphSegmenter<'a> {
    pub fn new(book_code: &'a str) -> Self {
        Self { book_code }
    }

    /// Segment a chapter's verse stream into ordered, contiguous paragraphs
    pub fn segment(&self, chapter_number: u32, verses: &[NormalizedVerse]) -> Vec<Paragraph> {
        let mut ordered: Vec<&NormalizedVerse> = verses.iter().collect();
        ordered.sort_by_key(|verse| verse.number);
        ordered.dedup_by_key(|verse| verse.number);

        let mut paragraphs = Vec::new();
        let mut style = ParagraphStyle::P;
        let mut open: Vec<CleanVerse> = Vec::new();

        for verse in ordered {
            if let Some(next_style) = verse.context.paragraph {
                self.close(chapter_number, style, &mut open, &mut paragraphs);
                style = next_style;
            }
            let position = VersePosition::new(chapter_number, verse.number);
            open.push(CleanVerse {
                chapter: chapter_number,
                number: verse.number,
                text: verse.text.clone(),
                reference: format_reference(self.book_code, position),
                paragraph_id: Some(paragraph_id(chapter_number, paragraphs.len() + 1)),
                section_id: None,
            });
        }
        self.close(chapter_number, style, &mut open, &mut paragraphs);
        paragraphs
    }

    fn close(
        &self,
        chapter_number: u32,
        style: ParagraphStyle,
        open: &mut Vec<CleanVerse>,
        paragraphs: &mut Vec<Paragraph>,
    ) {
        let id = paragraph_id(chapter_number, paragraphs.len() + 1);
        if let Some(paragraph) = Paragraph::from_verses(id, style, std::mem::take(open)) {
            paragraphs.push(paragraph);
        }
    }
}

fn paragraph_id(chapter_number: u32, index: usize) -> String {
    format!("{chapter_number}-p{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verses(range: std::ops::RangeInclusive<u32>) -> Vec<NormalizedVerse> {
        range
            .map(|n| NormalizedVerse::new(n, format!("verse {n}")))
            .collect()
    }

    #[test]
    fn test_implicit_paragraph() {
        let paragraphs = ParagraphSegmenter::new("JON").segment(1, &verses(1..=3));
        assert_eq!(paragraphs.len(), 1);
        let paragraph = &paragraphs[0];
        assert_eq!(paragraph.style, ParagraphStyle::P);
        assert_eq!(paragraph.indent_level, 0);
        assert_eq!((paragraph.start_verse, paragraph.end_verse), (1, 3));
        assert_eq!(paragraph.verse_count, 3);
        assert_eq!(paragraph.combined_text, "verse 1 verse 2 verse 3");
        assert_eq!(paragraph.verses[2].reference, "JON 1:3");
        assert_eq!(paragraph.verses[0].paragraph_id.as_deref(), Some("1-p1"));
    }

    #[test]
    fn test_markers_split_paragraphs() {
        let mut stream = verses(1..=6);
        stream[0] = stream[0].clone().opens(ParagraphStyle::M);
        stream[2] = stream[2].clone().opens(ParagraphStyle::Q2);
        stream[3] = stream[3].clone().opens(ParagraphStyle::Q2);
        stream[5] = stream[5].clone().opens(ParagraphStyle::P);

        let paragraphs = ParagraphSegmenter::new("PSA").segment(23, &stream);
        let shape: Vec<_> = paragraphs
            .iter()
            .map(|p| (p.style, p.indent_level, p.start_verse, p.end_verse))
            .collect();
        assert_eq!(
            shape,
            vec![
                (ParagraphStyle::M, 0, 1, 2),
                (ParagraphStyle::Q2, 2, 3, 3),
                (ParagraphStyle::Q2, 2, 4, 5),
                (ParagraphStyle::P, 0, 6, 6),
            ]
        );
        let ids: Vec<_> = paragraphs.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["23-p1", "23-p2", "23-p3", "23-p4"]);
        assert_eq!(paragraphs[2].verses[1].paragraph_id.as_deref(), Some("23-p3"));
    }

    #[test]
    fn test_empty_chapter_has_no_paragraphs() {
        assert!(ParagraphSegmenter::new("JON").segment(1, &[]).is_empty());
    }

    #[test]
    fn test_out_of_order_stream_is_sorted() {
        let stream = vec![
            NormalizedVerse::new(3, "c"),
            NormalizedVerse::new(1, "a"),
            NormalizedVerse::new(2, "b"),
        ];
        let paragraphs = ParagraphSegmenter::new("JON").segment(1, &stream);
        assert_eq!(paragraphs[0].combined_text, "a b c");
    }
}
