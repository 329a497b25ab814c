//! # usfm-scripture
//!
//! Builds a queryable scripture model from a tokenized USFM book.
//!
//! The tokenizer (outside this crate) turns USFM into per-verse marker trees. This crate
//! flattens those trees into clean verse text, groups verses into paragraphs with poetry
//! indentation, extracts translation sections (which may cross chapters), and answers
//! reference queries such as `JON 1:3-5` or `JON 1:17-2:1`.
//!
//! File Layout
//!
//!     src/scripture
//!       ├── markers, source     Tokenizer output: marker nodes and the book structure
//!       ├── normalization       Marker trees → verse text + placed paragraph/section markers
//!       ├── building            Paragraph segmentation, section extraction, assembly
//!       ├── model               Scripture, Chapter, Paragraph, CleanVerse, TranslationSection
//!       ├── reference           Reference parsing and resolution
//!       ├── navigation          Section lookup and next/previous
//!       ├── transforms, loader  Pipelines and the file/string entry point
//!       └── config, render      Engine configuration and plain-text output
//!
//! A [`Scripture`](scripture::model::Scripture) is built once per book and only read afterwards.
//! The usual entry point is [`ScriptureLoader`](scripture::loader::ScriptureLoader).

pub mod scripture;
