//! Error types for the document-store client.

use thiserror::Error;

/// Errors from document-store and object-storage operations.
///
/// Every error is scoped to the operation that raised it; callers surface
/// it and abort the action, there is no retry layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store answered {status}: {message}")]
    Status { status: u16, message: String },

    /// The requested document does not exist.
    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: String },

    /// The store's response could not be decoded.
    #[error("failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
