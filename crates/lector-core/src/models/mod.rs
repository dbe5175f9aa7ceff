//! Data models for the lector library.

pub mod config;
pub mod summary;

pub use config::{ExtractionConfig, LectorConfig, RenderConfig, StoreConfig};
pub use summary::{InvoiceSummary, LineItem, Party, TaxLine, PLACEHOLDER};
