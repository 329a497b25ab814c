//! Building the scripture model
//!
//!     Turns a decoded [`BookSource`](super::source::BookSource) into a
//!     [`Scripture`](super::model::Scripture):
//!
//!     ```text
//!     BookSource ─→ normalize_book ─→ [NormalizedChapter] ─┬→ ParagraphSegmenter (per chapter)
//!                                                          └→ SectionExtractor (whole book)
//!                                                                   ↓
//!                                                     ScriptureBuilder::assemble
//!     ```
//!
//!     The segmenter and the extractor read the same normalized stream independently. Assembly
//!     stamps each verse with its paragraph and section ids and computes the metadata.

mod assembly;
mod sections;
mod segmentation;

pub use assembly::ScriptureBuilder;
pub use sections::{SectionExtractor, DEFAULT_TITLE_TEMPLATE};
pub use segmentation::ParagraphSegmenter;
