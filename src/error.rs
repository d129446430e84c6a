//! Error types for untoc library.

use std::io;
use thiserror::Error;

/// Result type alias for untoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading fragment sets or inferring outlines.
///
/// An empty document, a missing title or an empty outline are not errors;
/// they yield `{"title": "", "outline": []}` style results.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The serialized fragment set could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A fragment violates the input data model.
    #[error("Invalid fragment #{index}: {reason}")]
    InvalidFragment {
        /// Position of the fragment in the input sequence
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// Error during rendering of an outline.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Build an `InvalidFragment` error.
    pub fn invalid_fragment(index: usize, reason: impl Into<String>) -> Self {
        Error::InvalidFragment {
            index,
            reason: reason.into(),
        }
    }

    /// Whether this error means the document itself could not be read.
    ///
    /// Batch drivers skip such documents without writing any output.
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::Decode(_) | Error::InvalidFragment { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::Decode(err.to_string())
        }
    }
}
