//! Display-ready invoice summary derived from a parsed CFDI.

use serde::{Deserialize, Serialize};

/// Placeholder used for any field missing from the source document.
pub const PLACEHOLDER: &str = "N/A";

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

/// The flat, display-ready structure produced by detail extraction.
///
/// Every field is an opaque display string; amounts are never reformatted
/// numerically. Missing source fields degrade to [`PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    /// Issue date, already rendered in long-form Mexican Spanish.
    pub issue_date: String,

    /// Issuer (seller) of the invoice.
    pub issuer: Party,

    /// Receiver (buyer) of the invoice.
    pub receiver: Party,

    /// Invoice line items, in document order.
    pub line_items: Vec<LineItem>,

    /// Transferred tax lines, in document order.
    pub tax_lines: Vec<TaxLine>,

    /// Grand total as it appears in the document.
    pub total: String,
}

/// A party (issuer or receiver) on the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Legal name.
    #[serde(default = "placeholder")]
    pub name: String,

    /// Mexican tax identifier (RFC).
    #[serde(default = "placeholder")]
    pub tax_id: String,
}

/// A single line item (concepto).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: String,
    pub unit_value: String,
    pub amount: String,
}

/// A single transferred tax line (traslado).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLine {
    /// SAT tax code ("001" ISR, "002" IVA, "003" IEPS).
    pub tax_name: String,
    pub amount: String,
}

impl InvoiceSummary {
    /// A summary with every field at the placeholder and empty sequences.
    pub fn empty() -> Self {
        Self {
            issue_date: placeholder(),
            issuer: Party::default(),
            receiver: Party::default(),
            line_items: Vec::new(),
            tax_lines: Vec::new(),
            total: placeholder(),
        }
    }
}

impl Default for Party {
    fn default() -> Self {
        Self {
            name: placeholder(),
            tax_id: placeholder(),
        }
    }
}
