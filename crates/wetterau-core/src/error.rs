//! Error types for the Wetterau toolkit

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WetterauError {
    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Geocoding errors
    #[error("Geocoding service unavailable: {reason}")]
    GeocoderUnavailable { reason: String },

    #[error("Geocoding service rejected the request ({status}): {body}")]
    GeocoderRejected { status: u16, body: String },

    // Cache errors
    #[error("Failed to persist geocode cache at {path}: {reason}")]
    CacheWrite { path: PathBuf, reason: String },

    // CSV shape errors
    #[error("Column '{column}' not found in {path}")]
    ColumnNotFound { column: String, path: PathBuf },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, WetterauError>;
