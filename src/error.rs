//! Runtime error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors recorded by the runtime
///
/// Natives never unwind; they record one of these on the context and return
/// undefined. The host inspects it with `Context::last_error`.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A file passed to `load` could not be read
    #[error("cannot load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `load` was called but the host installed no file evaluator
    #[error("cannot load {}: no file evaluator installed", .0.display())]
    NoFileEvaluator(PathBuf),

    /// Error reported by the evaluator
    #[error("{0}")]
    Eval(String),

    /// Call depth exceeded the configured limit
    #[error("RangeError: Maximum call stack size exceeded")]
    StackOverflow,

    /// Attempt to call a value that is not a function
    #[error("TypeError: {0} is not a function")]
    NotCallable(String),

    /// `Array(n)` with a length that is not a valid array length
    #[error("RangeError: Invalid array length {0}")]
    InvalidArrayLength(String),

    /// `console.assert` received a falsy condition
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),
}

impl RuntimeError {
    /// Create a load error for `path`
    pub fn load(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RuntimeError::Load {
            path: path.into(),
            source,
        }
    }
}
