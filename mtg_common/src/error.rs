//! Error types for mtg_common

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing reference data files
#[derive(Debug, Error)]
pub enum Error {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to parse or serialize JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Reference file does not start with a freshness line
    #[error("Missing freshness line in {}", .0.display())]
    MissingFreshnessLine(PathBuf),
}

/// Result alias for mtg_common operations
pub type Result<T> = std::result::Result<T, Error>;
