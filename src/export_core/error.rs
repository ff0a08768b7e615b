use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    // Catalog errors
    #[error("Catalog unavailable at {path}: {reason}")]
    CatalogUnavailable { path: PathBuf, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Event {event_id} has an invalid exposure time: {value}")]
    InvalidTimestamp { event_id: i64, value: i64 },

    // Copy errors
    #[error("Cannot read source file {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write to {path}: {source}")]
    DestinationUnwritable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to copy {} -> {}: {error}", .from.display(), .to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        error: std::io::Error,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
