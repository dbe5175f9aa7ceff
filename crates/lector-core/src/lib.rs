//! Core library for CFDI reading.
//!
//! This crate provides:
//! - XML ingestion into a generic attributed tree
//! - CFDI detail extraction into a flat, display-ready summary
//! - quotation-letter templating and data binding
//! - DOCX and PDF rendering of the bound letter

pub mod error;
pub mod extract;
pub mod models;
pub mod render;
pub mod xml;

pub use error::{LectorError, RenderError, Result, XmlError};
pub use extract::{CfdiExtractor, CfdiSession};
pub use models::config::LectorConfig;
pub use models::summary::{InvoiceSummary, LineItem, Party, TaxLine, PLACEHOLDER};
pub use render::{Letter, LetterTemplate, bind, render_docx, render_pdf};
pub use xml::{NodeSet, parse_document};
