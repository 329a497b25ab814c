//! Individual transformation stages
//!
//! Each stage implements [`Runnable`] and can be chained into a [`Transform`](super::Transform).

use crate::scripture::building::ScriptureBuilder;
use crate::scripture::config::EngineConfig;
use crate::scripture::model::Scripture;
use crate::scripture::normalization::NormalizedBook;
use crate::scripture::source::{self, BookSource};
use crate::scripture::transforms::{Runnable, TransformError};
use serde_json::Value;

/// JSON text → JSON value. The only stage that can fail.
#[derive(Debug, Default)]
pub struct ParseJson;

impl ParseJson {
    pub fn new() -> Self {
        Self
    }
}

impl Runnable<String, Value> for ParseJson {
    fn run(&self, input: String) -> Result<Value, TransformError> {
        source::parse_json(&input).map_err(|e| TransformError::StageFailed {
            stage: "ParseJson".to_string(),
            message: e.to_string(),
        })
    }
}

/// JSON value → decoded book
#[derive(Debug, Default)]
pub struct DecodeSource;

impl DecodeSource {
    pub fn new() -> Self {
        Self
    }
}

impl Runnable<Value, BookSource> for DecodeSource {
    fn run(&self, input: Value) -> Result<BookSource, TransformError> {
        let book = BookSource::from_value(&input);
        source::release(input);
        Ok(book)
    }
}

/// Decoded book → normalized verse streams with placed markers
#[derive(Debug, Default)]
pub struct NormalizeBook;

impl NormalizeBook {
    pub fn new() -> Self {
        Self
    }
}

impl Runnable<BookSource, NormalizedBook> for NormalizeBook {
    fn run(&self, input: BookSource) -> Result<NormalizedBook, TransformError> {
        Ok(NormalizedBook::from_source(&input))
    }
}

/// Normalized book → scripture (paragraphs, sections, metadata)
#[derive(Debug, Default)]
pub struct AssembleScripture {
    builder: ScriptureBuilder,
}

impl AssembleScripture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            builder: ScriptureBuilder::from_config(config),
        }
    }
}

impl Runnable<NormalizedBook, Scripture> for AssembleScripture {
    fn run(&self, input: NormalizedBook) -> Result<Scripture, TransformError> {
        Ok(self
            .builder
            .assemble(&input.book, &input.book_code, &input.chapters))
    }
}
