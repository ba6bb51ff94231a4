//! Error types for the asset bridge.

use thiserror::Error;

/// Result type alias using BridgeError.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Main error type for translation and pack assembly.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Failed to read or write a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Failed to parse or emit JSON data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read a texture.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid bundled resource layout.
    #[error("Invalid resources: {0}")]
    InvalidResources(String),

    /// Failed to resolve a model or its parent chain.
    #[error("Model resolution error: {0}")]
    ModelResolution(String),

    /// Geometry conversion failed for a model.
    #[error("Geometry conversion error: {0}")]
    Conversion(String),

    /// Catalog entry is structurally inconsistent.
    #[error("Invalid catalog entry: {0}")]
    InvalidCatalog(String),

    /// The target registry rejected a definition.
    #[error("Registration error: {0}")]
    Registration(String),

    /// Failed to assemble the output pack.
    #[error("Pack error: {0}")]
    Pack(String),
}
