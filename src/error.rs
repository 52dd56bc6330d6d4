//! Error types for otplink operations

use thiserror::Error;

/// Result type alias using otplink's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for otplink operations
#[derive(Error, Debug)]
pub enum Error {
    /// CLI invoked with the wrong arguments
    #[error("{0}")]
    Usage(String),

    /// Backup file could not be parsed
    #[error("Failed to parse backup file {path}: {reason}")]
    Parse {
        /// Path of the offending file
        path: String,
        /// Underlying parser message
        reason: String,
    },

    /// Backup file carries an unsupported schema version
    #[error("Unsupported backup schema version {found}, expected {expected}")]
    SchemaVersion {
        /// Version found in the file, or "absent" when the marker is missing
        found: String,
        /// Version this tool understands
        expected: u32,
    },

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// Image persistence error
    #[error("Image processing error: {0}")]
    Image(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

// Implement From conversions for common error types

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}
