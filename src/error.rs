//! Error types for jpeg-parity operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for jpeg-parity operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while discovering, comparing or benchmarking.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Corpus root or fixture does not exist.
    #[error("Not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Failed to read a file or directory during a corpus walk.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Path being read when the failure happened.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A decoder rejected its input or produced an empty image.
    #[error("Decode error ({codec}): {message}")]
    Decode {
        /// Decoder identifier.
        codec: String,
        /// Error message from the decoder.
        message: String,
    },

    /// An encoder failed to re-encode a decoded image.
    #[error("Encode error ({codec}): {message}")]
    Encode {
        /// Encoder identifier.
        codec: String,
        /// Error message from the encoder.
        message: String,
    },

    /// Re-encoded bytes differ between two decodes of the same entry.
    #[error(
        "Comparison mismatch for {entry}: reference {reference_len} bytes, candidate {candidate_len} bytes, first difference at byte {first_difference}"
    )]
    ComparisonMismatch {
        /// Corpus entry identifier.
        entry: String,
        /// Length of the reference re-encoding.
        reference_len: usize,
        /// Length of the candidate re-encoding.
        candidate_len: usize,
        /// Offset of the first differing byte.
        first_difference: usize,
    },

    /// A child process could not run, exited non-zero, or diverged.
    #[error("Process failure: {message}\nOutput:\n{output}")]
    ProcessFailure {
        /// What went wrong.
        message: String,
        /// Captured output, lossily decoded as UTF-8.
        output: String,
    },

    /// Unrecognized implementation selector.
    #[error("Config error: {0}")]
    Config(String),

    /// Failed to write a report file.
    ///
    /// Only report writers produce this; there is no blanket conversion from
    /// `std::io::Error`.
    #[error("Failed to write report {}: {source}", path.display())]
    Report {
        /// Report destination.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Whether this error ends a whole corpus walk rather than one entry.
    #[must_use]
    pub fn is_walk_fatal(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Io { .. })
    }
}
