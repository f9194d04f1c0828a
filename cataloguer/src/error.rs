//! Error types for the cataloguer

use thiserror::Error;

/// Unified error type for cataloguer operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reference or freshness-file error
    #[error(transparent)]
    Reference(#[from] mtg_common::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to parse or serialize JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Failed to write CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Deck archive could not be read
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    /// Background task panicked or was aborted
    #[error("Task error: {0}")]
    Task(#[from] tokio::task::JoinError),
    /// Scryfall bulk-data listing has no entry of the requested type
    #[error("Bulk data entry not found: {0}")]
    BulkDataMissing(String),
    /// Release date is not an ISO `YYYY-MM-DD` date
    #[error("Invalid release date '{value}' in row {row}")]
    InvalidReleaseDate { row: usize, value: String },
    /// Set code is not in the known set list
    #[error("'{0}' is not a valid set code.")]
    InvalidSetCode(String),
    /// Language code is not supported
    #[error("'{0}' is not a valid language code.")]
    InvalidLanguage(String),
    /// No CSV layout for the requested platform
    #[error("Export format for {0} is not supported.")]
    UnknownPlatform(String),
    /// Column label does not name a known column
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    /// Column cannot be edited directly
    #[error("Column '{0}' is not editable")]
    ReadOnlyColumn(&'static str),
    /// Row index outside the table
    #[error("Row {row} out of range (table has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },
    /// Deck is not present in the deck list
    #[error("Deck not found: {0}")]
    DeckNotFound(String),
}

/// Result type alias for cataloguer operations
pub type Result<T> = std::result::Result<T, CatalogError>;
