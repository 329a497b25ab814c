//! Error types for loading and building scripture
//!
//! Data-quality problems in a book (unknown nodes, empty verses, stray markers) are never
//! errors: the engine omits what it cannot interpret and logs it. The types here cover what
//! remains: unreadable files, text that is not JSON, and pipeline stage failures.

use std::io;

/// Error that can occur during a transformation stage
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// Generic error with message
    #[error("{0}")]
    Error(String),
    /// Stage failed with specific error
    #[error("Stage '{stage}' failed: {message}")]
    StageFailed { stage: String, message: String },
}

impl From<String> for TransformError {
    fn from(s: String) -> Self {
        TransformError::Error(s)
    }
}

impl From<&str> for TransformError {
    fn from(s: &str) -> Self {
        TransformError::Error(s.to_string())
    }
}

/// Error that can occur when loading a tokenized book
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// IO error when reading file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Transform/building error
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),
}
