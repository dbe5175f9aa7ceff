//! Letter template and data binding.
//!
//! The template is pure data (the static boilerplate of the quotation
//! letter); [`bind`] is the pure step that merges a template with an
//! [`InvoiceSummary`] into an ordered list of renderable blocks. Swapping
//! the template never touches extraction or rendering code.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::RenderError;
use crate::models::summary::InvoiceSummary;

/// Static boilerplate of the quotation letter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterTemplate {
    /// Place prefix of the dateline, without the date itself.
    pub place: String,

    /// Subject line.
    pub subject: String,

    /// Addressee block, one paragraph per line.
    pub addressee: Vec<String>,

    /// Label of the tax row in the table.
    pub tax_label: String,

    /// Label of the total row in the table.
    pub total_label: String,

    /// Closing paragraph after the total sentence.
    pub closing: String,

    /// Signature block under the issuer's name, one centered line each.
    pub signature: Vec<String>,

    /// File stem for generated documents.
    pub file_stem: String,
}

impl Default for LetterTemplate {
    fn default() -> Self {
        Self {
            place: "Oaxaca de Juárez, Oaxaca".to_string(),
            subject: "ASUNTO: COTIZACIÓN".to_string(),
            addressee: vec![
                "SANTA MARÍA HUATULCO,".to_string(),
                "C. José Antonio Pérez".to_string(),
                "PRESENTE.".to_string(),
            ],
            tax_label: "I.V.A. 16.00%".to_string(),
            total_label: "TOTAL".to_string(),
            closing: "Lo anterior, para su conocimiento y ponernos a su servicio.".to_string(),
            signature: vec![
                "ADMINISTRADORA ÚNICA DE LA EMPRESA".to_string(),
                "OPERADORA DE SERVICIOS ADMINISTRATIVOS".to_string(),
                "BENFUEN S.A. DE C.V.".to_string(),
            ],
            file_stem: "Cotizacion_BENFUEN".to_string(),
        }
    }
}

impl LetterTemplate {
    /// Load an alternate template from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| RenderError::Template(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| RenderError::Template(e.to_string()))
    }
}

/// One renderable paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphBlock {
    pub text: String,
    pub bold: bool,
    pub centered: bool,
}

impl ParagraphBlock {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            centered: false,
        }
    }

    fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            centered: false,
        }
    }

    fn signature(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            centered: true,
        }
    }
}

/// The quotation table: fixed header, item rows, tax row, total row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteTable {
    pub header: [String; 3],
    pub rows: Vec<[String; 3]>,
}

/// A fully bound letter, ready for DOCX or PDF rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    /// Paragraphs before the table.
    pub head: Vec<ParagraphBlock>,
    pub table: QuoteTable,
    /// Paragraphs after the table.
    pub tail: Vec<ParagraphBlock>,
    pub file_stem: String,
}

/// Bind a summary into the template.
pub fn bind(template: &LetterTemplate, summary: &InvoiceSummary) -> Letter {
    let mut head = Vec::new();
    head.push(ParagraphBlock::bold(format!(
        "{}; a {}.",
        template.place, summary.issue_date
    )));
    head.push(ParagraphBlock::bold(&template.subject));
    for line in &template.addressee {
        head.push(ParagraphBlock::bold(line));
    }
    head.push(ParagraphBlock::plain(format!(
        "Por este medio presento la cotización solicitada a \"{}\" (RFC: {}) \
         consistente en los siguientes servicios:",
        summary.issuer.name, summary.issuer.tax_id
    )));

    let mut rows: Vec<[String; 3]> = summary
        .line_items
        .iter()
        .map(|item| {
            [
                item.quantity.clone(),
                item.description.clone(),
                format!("${}", item.amount),
            ]
        })
        .collect();

    // Only the first tax line is carried into the letter; the original
    // letter assumes a single tax rate.
    let tax_amount = summary
        .tax_lines
        .first()
        .map(|tax| tax.amount.as_str())
        .unwrap_or("0.00");
    rows.push([
        String::new(),
        template.tax_label.clone(),
        format!("${}", tax_amount),
    ]);
    rows.push([
        String::new(),
        template.total_label.clone(),
        format!("${}", summary.total),
    ]);

    let table = QuoteTable {
        header: [
            "CANTIDAD".to_string(),
            "CONCEPTO".to_string(),
            "SUBTOTAL".to_string(),
        ],
        rows,
    };

    let mut tail = Vec::new();
    tail.push(ParagraphBlock::plain(format!(
        "La prestación del servicio tiene un costo total de ${} ({} pesos 00/100 M.N.), \
         IVA incluido.",
        summary.total, summary.total
    )));
    tail.push(ParagraphBlock::plain(&template.closing));
    tail.push(ParagraphBlock::signature("A T E N T A M E N T E"));
    tail.push(ParagraphBlock::signature(format!("C. {}", summary.issuer.name)));
    for line in &template.signature {
        tail.push(ParagraphBlock::signature(line));
    }

    Letter {
        head,
        table,
        tail,
        file_stem: template.file_stem.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::summary::{InvoiceSummary, LineItem, Party, TaxLine};
    use pretty_assertions::assert_eq;

    fn sample_summary() -> InvoiceSummary {
        InvoiceSummary {
            issue_date: "6 de enero de 2022".to_string(),
            issuer: Party {
                name: "OPERADORA BENFUEN".to_string(),
                tax_id: "BEN190101AAA".to_string(),
            },
            receiver: Party::default(),
            line_items: vec![
                LineItem {
                    description: "Reglamento de Mercados".to_string(),
                    quantity: "1".to_string(),
                    unit_value: "73,275.86".to_string(),
                    amount: "73,275.86".to_string(),
                },
                LineItem {
                    description: "Asesoría jurídica".to_string(),
                    quantity: "2".to_string(),
                    unit_value: "1,000.00".to_string(),
                    amount: "2,000.00".to_string(),
                },
            ],
            tax_lines: vec![
                TaxLine {
                    tax_name: "002".to_string(),
                    amount: "11,724.14".to_string(),
                },
                TaxLine {
                    tax_name: "003".to_string(),
                    amount: "99.00".to_string(),
                },
            ],
            total: "85,000.00".to_string(),
        }
    }

    #[test]
    fn test_table_row_count() {
        let letter = bind(&LetterTemplate::default(), &sample_summary());

        // N item rows + 1 tax row + 1 total row; the header is separate.
        assert_eq!(letter.table.rows.len(), 2 + 2);
        assert_eq!(
            letter.table.header,
            ["CANTIDAD", "CONCEPTO", "SUBTOTAL"].map(String::from)
        );
    }

    #[test]
    fn test_only_first_tax_line_is_used() {
        let letter = bind(&LetterTemplate::default(), &sample_summary());

        let tax_row = &letter.table.rows[2];
        assert_eq!(tax_row[1], "I.V.A. 16.00%");
        assert_eq!(tax_row[2], "$11,724.14");
        // The second tax line's amount appears nowhere.
        assert!(letter.table.rows.iter().all(|row| row[2] != "$99.00"));
    }

    #[test]
    fn test_missing_tax_line_falls_back_to_zero() {
        let mut summary = sample_summary();
        summary.tax_lines.clear();
        let letter = bind(&LetterTemplate::default(), &summary);

        assert_eq!(letter.table.rows[2][2], "$0.00");
    }

    #[test]
    fn test_total_cell_is_verbatim() {
        let letter = bind(&LetterTemplate::default(), &sample_summary());

        let total_row = letter.table.rows.last().unwrap();
        assert_eq!(total_row[1], "TOTAL");
        assert_eq!(total_row[2], "$85,000.00");
    }

    #[test]
    fn test_dateline_and_signature() {
        let letter = bind(&LetterTemplate::default(), &sample_summary());

        assert_eq!(
            letter.head[0].text,
            "Oaxaca de Juárez, Oaxaca; a 6 de enero de 2022."
        );
        assert!(letter.head[0].bold);
        assert!(letter.tail.iter().any(|p| p.text == "C. OPERADORA BENFUEN" && p.centered));
    }

    #[test]
    fn test_template_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.json");

        let mut template = LetterTemplate::default();
        template.subject = "ASUNTO: PROPUESTA".to_string();
        std::fs::write(&path, serde_json::to_string(&template).unwrap()).unwrap();

        let loaded = LetterTemplate::from_file(&path).unwrap();
        assert_eq!(loaded.subject, "ASUNTO: PROPUESTA");
        // Unspecified fields keep their defaults on partial files.
        assert_eq!(loaded.total_label, "TOTAL");
    }
}
