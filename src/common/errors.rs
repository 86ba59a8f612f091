use std::path::PathBuf;

use thiserror::Error;

/// Typed errors for dupfind operations.
/// `anyhow` handles the top level in the binary; library code returns
/// these so callers can tell a skippable per-file failure from a fatal one.
#[derive(Debug, Error)]
pub enum DupError {
    /// Scan root is missing or not a directory
    #[error("Invalid root '{}': {reason}", .path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    /// File could not be opened or fully read while fingerprinting
    #[error("Hash error for '{}': {source}", .path.display())]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Removal of a duplicate failed
    #[error("Could not delete {}: {source}", .path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is unreadable or invalid
    #[error("Config error in '{}': {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

pub type DupResult<T> = std::result::Result<T, DupError>;
