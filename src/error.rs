//! Error types shared by the preparation tools.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum PrepError {
    /// Filesystem or pipe failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level download failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected response: HTTP {0}")]
    Status(reqwest::StatusCode),

    /// A downloaded archive did not match its expected digest.
    #[error("checksum mismatch for {path:?}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Archive that failed verification.
        path: PathBuf,
        /// Digest the caller expected, hex-encoded.
        expected: String,
        /// Digest actually computed, hex-encoded.
        actual: String,
    },

    /// The archive could not be read or unpacked.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// The override file could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// A blocking worker task died.
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type alias for preparation operations.
pub type Result<T> = std::result::Result<T, PrepError>;
