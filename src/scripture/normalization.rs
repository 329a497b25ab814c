//! Marker tree normalization
//!
//!     Flattens a verse's marker tree into readable text and collects the structural signals
//!     (paragraph markers, section breaks) that the segmenter and section extractor consume.
//!
//! Text
//!
//!     Text and Word nodes contribute their literal value in document order; milestones only
//!     contribute their children. Alignment attributes never reach the text. Whitespace runs
//!     collapse to one space and the result is trimmed. A verse whose text ends up empty is
//!     dropped from the model.
//!
//!     Milestones can nest to any depth, so the tree is walked with an explicit stack
//!     ([`Leaves`]) instead of recursion.
//!
//! Marker Placement
//!
//!     The tokenizer files a marker under the verse whose text precedes it: a `\p` written
//!     before `\v 5` arrives at the end of verse 4. A marker seen before any text of its verse
//!     is leading and applies to that verse; every other marker is trailing and applies to the
//!     next emitted verse. Markers on a dropped (empty) verse move on to the next emitted verse.
//!     Paragraph markers stop at a chapter boundary, section breaks do not.

use super::markers::{MarkerNode, ParagraphStyle};
use super::source::BookSource;

/// Depth-first iterator over the text-producing and marker nodes of a tree
pub struct Leaves<'a> {
    stack: Vec<std::slice::Iter<'a, MarkerNode>>,
}

impl<'a> Leaves<'a> {
    pub fn new(nodes: &'a [MarkerNode]) -> Self {
        Self {
            stack: vec![nodes.iter()],
        }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a MarkerNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(MarkerNode::Milestone { children, .. }) => self.stack.push(children.iter()),
                Some(node) => return Some(node),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

/// Flatten a verse's marker tree into trimmed, whitespace-normalized text
pub fn normalize(nodes: &[MarkerNode]) -> String {
    let mut raw = String::new();
    for node in Leaves::new(nodes) {
        if let MarkerNode::Text { value } | MarkerNode::Word { value } = node {
            raw.push_str(value);
        }
    }
    collapse_whitespace(&raw)
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A structural signal found in a marker tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Paragraph(ParagraphStyle),
    SectionBreak,
}

/// Text and signals of one verse
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VerseScan {
    pub text: String,
    /// Signals seen before any text
    pub leading: Vec<Signal>,
    /// Signals seen after some text
    pub trailing: Vec<Signal>,
}

/// Single pass over a verse collecting its text and placed signals
pub fn scan_verse(nodes: &[MarkerNode]) -> VerseScan {
    let mut raw = String::new();
    let mut scan = VerseScan::default();
    let mut seen_text = false;

    for node in Leaves::new(nodes) {
        let signal = match node {
            MarkerNode::Text { value } | MarkerNode::Word { value } => {
                raw.push_str(value);
                seen_text |= !value.trim().is_empty();
                continue;
            }
            MarkerNode::ParagraphMarker { style } => Signal::Paragraph(*style),
            MarkerNode::SectionBreakMarker => Signal::SectionBreak,
            MarkerNode::Milestone { .. } => continue,
        };
        if seen_text {
            scan.trailing.push(signal);
        } else {
            scan.leading.push(signal);
        }
    }

    scan.text = collapse_whitespace(&raw);
    scan
}

/// Markers that apply to a verse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkerContext {
    /// Style of the paragraph this verse opens, if it opens one
    pub paragraph: Option<ParagraphStyle>,
    /// Whether this verse starts a translation section
    pub section_break: bool,
}

impl MarkerContext {
    fn absorb(&mut self, signals: &[Signal]) {
        for signal in signals {
            match signal {
                Signal::Paragraph(style) => self.paragraph = Some(*style),
                Signal::SectionBreak => self.section_break = true,
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.paragraph.is_none() && !self.section_break
    }
}

/// A verse with non-empty normalized text
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedVerse {
    pub number: u32,
    pub text: String,
    pub context: MarkerContext,
}

impl NormalizedVerse {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            context: MarkerContext::default(),
        }
    }

    pub fn opens(mut self, style: ParagraphStyle) -> Self {
        self.context.paragraph = Some(style);
        self
    }

    pub fn breaks_section(mut self) -> Self {
        self.context.section_break = true;
        self
    }
}

/// A chapter's normalized verse stream
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedChapter {
    pub number: u32,
    pub verses: Vec<NormalizedVerse>,
}

impl NormalizedChapter {
    pub fn first_verse(&self) -> Option<u32> {
        self.verses.first().map(|verse| verse.number)
    }

    pub fn last_verse(&self) -> Option<u32> {
        self.verses.last().map(|verse| verse.number)
    }
}

/// A whole book after normalization
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedBook {
    pub book: String,
    pub book_code: String,
    pub chapters: Vec<NormalizedChapter>,
}

impl NormalizedBook {
    pub fn from_source(source: &BookSource) -> Self {
        Self {
            book: source.book.clone(),
            book_code: source.book_code.clone(),
            chapters: normalize_book(source),
        }
    }
}

/// Normalize every verse of a book and place its markers
pub fn normalize_book(source: &BookSource) -> Vec<NormalizedChapter> {
    let mut pending = MarkerContext::default();
    let mut chapters = Vec::with_capacity(source.chapters.len());

    for chapter in &source.chapters {
        if let Some(style) = pending.paragraph.take() {
            log::debug!(
                "dropping {style} marker left before chapter {}",
                chapter.number
            );
        }
        let front = scan_verse(&chapter.front);
        pending.absorb(&front.leading);
        pending.absorb(&front.trailing);

        let mut verses = Vec::with_capacity(chapter.verses.len());
        for verse in &chapter.verses {
            let scan = scan_verse(&verse.objects);
            pending.absorb(&scan.leading);
            if scan.text.is_empty() {
                if !pending.is_empty() || !scan.trailing.is_empty() {
                    log::debug!(
                        "{}:{} is empty; carrying its markers forward",
                        chapter.number,
                        verse.number
                    );
                }
                pending.absorb(&scan.trailing);
                continue;
            }
            verses.push(NormalizedVerse {
                number: verse.number,
                text: scan.text,
                context: std::mem::take(&mut pending),
            });
            pending.absorb(&scan.trailing);
        }

        chapters.push(NormalizedChapter {
            number: chapter.number,
            verses,
        });
    }

    if pending.section_break {
        log::debug!("section break after the last verse of the book ignored");
    }
    chapters
}
