//! Transform pipeline
//!
//!     Building a book is a chain of stages, each implementing [`Runnable<I, O>`]:
//!
//!     ```text
//!     String ─ParseJson→ Value ─DecodeSource→ BookSource ─NormalizeBook→ NormalizedBook
//!                                                              ─AssembleScripture→ Scripture
//!     ```
//!
//!     [`Transform<I, O>`] wraps a stage and chains the next one with `.then()`, so a pipeline
//!     only compiles when each stage's output type is the next stage's input type. Common
//!     pipelines are pre-built as statics in [`standard`]; [`standard::scripture_pipeline`]
//!     builds one for a given configuration.
//!
//!     Stages only fail on input that can't be read at all (text that is not JSON). Problems
//!     inside a readable book are absorbed by the stages and logged.

pub mod stages;
pub mod standard;

pub use crate::scripture::error::TransformError;

/// Trait for anything that can transform an input to an output
pub trait Runnable<I, O> {
    fn run(&self, input: I) -> Result<O, TransformError>;
}

/// A composable transformation pipeline from `I` to `O`
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, TransformError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Chain a stage after this transform, extending the output type
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        Transform::run(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::stages::{DecodeSource, NormalizeBook, ParseJson};
    use super::*;
    use crate::scripture::source::BookSource;
    use serde_json::Value;

    struct CountVerses;
    impl Runnable<BookSource, usize> for CountVerses {
        fn run(&self, input: BookSource) -> Result<usize, TransformError> {
            Ok(input.verse_count())
        }
    }

    struct Reject;
    impl Runnable<Value, Value> for Reject {
        fn run(&self, _input: Value) -> Result<Value, TransformError> {
            Err(TransformError::Error("rejected".to_string()))
        }
    }

    const BOOK: &str = r#"{"chapters":{"1":{"1":{"verseObjects":[{"type":"text","text":"a"}]},
        "2":{"verseObjects":[{"type":"text","text":"b"}]}}}}"#;

    #[test]
    fn test_stages_chain() {
        let transform = Transform::from_fn(Ok)
            .then(ParseJson::new())
            .then(DecodeSource::new())
            .then(CountVerses);
        assert_eq!(transform.run(BOOK.to_string()).unwrap(), 2);
    }

    #[test]
    fn test_type_changing_chain() {
        let transform = Transform::from_fn(Ok)
            .then(ParseJson::new())
            .then(DecodeSource::new())
            .then(NormalizeBook::new());
        let book = transform.run(BOOK.to_string()).unwrap();
        assert_eq!(book.chapters[0].verses[1].text, "b");
    }

    #[test]
    fn test_error_propagation() {
        let transform = Transform::from_fn(Ok)
            .then(ParseJson::new())
            .then(Reject)
            .then(DecodeSource::new());
        assert_eq!(
            transform.run(BOOK.to_string()).unwrap_err(),
            TransformError::Error("rejected".to_string())
        );
    }
}
