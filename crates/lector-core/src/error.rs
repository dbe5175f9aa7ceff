//! Error types for the lector-core library.

use thiserror::Error;

/// Main error type for the lector library.
#[derive(Error, Debug)]
pub enum LectorError {
    /// XML ingestion error.
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    /// Letter rendering error.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to XML ingestion.
#[derive(Error, Debug)]
pub enum XmlError {
    /// The document could not be parsed.
    #[error("failed to parse XML document: {0}")]
    Malformed(String),

    /// The document parsed but contains no root element.
    #[error("document contains no elements")]
    Empty,
}

/// Errors related to letter rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to assemble or pack the Word document.
    #[error("failed to build .docx document: {0}")]
    Docx(String),

    /// Failed to assemble or render the PDF document.
    #[error("failed to build .pdf document: {0}")]
    Pdf(String),

    /// The PDF font family could not be loaded.
    #[error("failed to load fonts from {dir}: {reason}")]
    Font { dir: String, reason: String },

    /// Failed to read a letter template file.
    #[error("failed to load letter template: {0}")]
    Template(String),
}

/// Result type for the lector library.
pub type Result<T> = std::result::Result<T, LectorError>;
