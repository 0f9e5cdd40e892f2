//! Error types for the settings crate (thiserror-based).

use thiserror::Error;

/// Errors that can occur loading or saving the settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// File I/O error (read, write, rename).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No file path is associated with the store.
    #[error("Settings store has no backing file")]
    NoPath,
}

/// Convenience Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
