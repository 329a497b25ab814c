//! Standard transform definitions
//!
//! Pre-built pipelines as `once_cell::sync::Lazy` statics, using the default configuration.

use crate::scripture::config::EngineConfig;
use crate::scripture::model::Scripture;
use crate::scripture::normalization::NormalizedBook;
use crate::scripture::source::BookSource;
use crate::scripture::transforms::stages::{
    AssembleScripture, DecodeSource, NormalizeBook, ParseJson,
};
use crate::scripture::transforms::Transform;
use once_cell::sync::Lazy;

pub type SourceTransform = Transform<String, BookSource>;
pub type NormalizedTransform = Transform<String, NormalizedBook>;
pub type ScriptureTransform = Transform<String, Scripture>;

/// Tokenizer JSON → decoded book
pub static JSON_TO_SOURCE: Lazy<SourceTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then(ParseJson::new())
        .then(DecodeSource::new())
});

/// Tokenizer JSON → normalized verse streams
pub static JSON_TO_NORMALIZED: Lazy<NormalizedTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then(ParseJson::new())
        .then(DecodeSource::new())
        .then(NormalizeBook::new())
});

/// Tokenizer JSON → scripture, with default configuration
pub static JSON_TO_SCRIPTURE: Lazy<ScriptureTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then(ParseJson::new())
        .then(DecodeSource::new())
        .then(NormalizeBook::new())
        .then(AssembleScripture::new())
});

/// Tokenizer JSON → scripture for a specific configuration
pub fn scripture_pipeline(config: &EngineConfig) -> ScriptureTransform {
    Transform::from_fn(Ok)
        .then(ParseJson::new())
        .then(DecodeSource::new())
        .then(NormalizeBook::new())
        .then(AssembleScripture::from_config(config))
}
