//! Scripture model
//!
//!     The output of the builder and the sole source of truth for renderers, navigation and
//!     persistence. A [`Scripture`] holds chapters in ascending order; each [`Chapter`] holds
//!     its verses and a partition of those verses into [`Paragraph`]s. Translation sections
//!     ([`TranslationSection`]) are an independent layer over the same verses and may cross
//!     chapter boundaries.
//!
//!     Everything here serializes to the camelCase JSON shape consumers expect. The model is
//!     built once per book and never mutated by queries.

pub mod chapter;
pub mod document;
pub mod paragraph;
pub mod section;
pub mod verse;

pub use chapter::Chapter;
pub use document::{Scripture, ScriptureMetadata};
pub use paragraph::Paragraph;
pub use section::TranslationSection;
pub use verse::{format_reference, CleanVerse, VersePosition};
