//! Book loading utilities
//!
//! [`ScriptureLoader`] reads the tokenizer's JSON output from a file or string and runs a
//! transform on it. The CLI and the tests both go through it.
//!
//! ```rust,ignore
//! use usfm_scripture::scripture::loader::ScriptureLoader;
//!
//! let scripture = ScriptureLoader::from_path("jonah.json")?.build()?;
//! let source = ScriptureLoader::from_string(json).source()?;
//! ```

use crate::scripture::building::ScriptureBuilder;
use crate::scripture::config::EngineConfig;
use crate::scripture::model::Scripture;
use crate::scripture::source::BookSource;
use crate::scripture::transforms::standard::{
    scripture_pipeline, JSON_TO_SCRIPTURE, JSON_TO_SOURCE,
};
use crate::scripture::transforms::Transform;
use std::fs;
use std::path::Path;

pub use crate::scripture::error::LoaderError;

/// Tokenizer output loader with transform shortcuts
#[derive(Debug, Clone)]
pub struct ScriptureLoader {
    source: String,
    identity: Option<(String, String)>,
}

impl ScriptureLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let source = fs::read_to_string(path)?;
        Ok(Self::from_string(source))
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        ScriptureLoader {
            source: source.into(),
            identity: None,
        }
    }

    /// Use this book name and code instead of the ones in the headers
    pub fn with_identity(
        mut self,
        book: impl Into<String>,
        book_code: impl Into<String>,
    ) -> Self {
        self.identity = Some((book.into(), book_code.into()));
        self
    }

    /// Run a custom transform on the source text
    pub fn with<O: 'static>(&self, transform: &Transform<String, O>) -> Result<O, LoaderError> {
        Ok(transform.run(self.source.clone())?)
    }

    /// Decode the tokenizer output
    pub fn source(&self) -> Result<BookSource, LoaderError> {
        let source = self.with(&JSON_TO_SOURCE)?;
        Ok(match &self.identity {
            Some((book, code)) => source.with_identity(book.clone(), code.clone()),
            None => source,
        })
    }

    /// Build the scripture with the default configuration
    pub fn build(&self) -> Result<Scripture, LoaderError> {
        match self.identity {
            None => self.with(&JSON_TO_SCRIPTURE),
            Some(_) => Ok(ScriptureBuilder::new().build(&self.source()?)),
        }
    }

    /// Build the scripture for a specific configuration
    pub fn build_with(&self, config: &EngineConfig) -> Result<Scripture, LoaderError> {
        match self.identity {
            None => self.with(&scripture_pipeline(config)),
            Some(_) => Ok(ScriptureBuilder::from_config(config).build(&self.source()?)),
        }
    }

    pub fn raw(&self) -> &str {
        &self.source
    }
}
