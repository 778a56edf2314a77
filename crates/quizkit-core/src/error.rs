//! Library error types.
//!
//! Expected absence of data (a missing answer, an unknown quiz id) is never
//! an error here. These variants cover inputs the library cannot act on.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the store and the authoring helpers.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The identifier cannot be used as a storage key.
    #[error("invalid quiz id: {0:?}")]
    InvalidId(String),

    /// A correct-answer index does not point into the options list.
    #[error("correct index {index} out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file did not contain the expected JSON document.
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl QuizError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QuizError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        QuizError::Json {
            path: path.into(),
            source,
        }
    }
}
