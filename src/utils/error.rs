// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to load PDF {}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("Failed to extract text from page {page}")]
    Extraction {
        page: u32,
        #[source]
        source: lopdf::Error,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Malformed chunk file {}: expected a JSON array of chunk records", .0.display())]
    MalformedChunks(PathBuf),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{what} not found: {}", .path.display())]
    MissingFile { what: &'static str, path: PathBuf },

    // Wrapped errors are reached through source(), not repeated in the message
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("PDF conversion failed")]
    Conversion(#[from] ConvertError),

    #[error("Storage error")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// True for errors caused by how the tool was invoked rather than by its inputs.
    pub fn is_usage(&self) -> bool {
        matches!(self, AppError::Config(_))
    }
}
