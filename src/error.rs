//! Error types for the emission report service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failure talking to an upstream service
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Weather API answered with an unusable response
    #[error("Weather API error: {0}")]
    WeatherApiError(String),

    /// Blob storage rejected a request
    #[error("Storage request failed with status {status}: {code}")]
    StorageError { status: u16, code: String },

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Failed to build the Word document
    #[error("Document rendering failed: {0}")]
    DocumentError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::DocumentError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
