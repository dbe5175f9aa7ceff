//! CFDI detail extraction: map the parsed tree into a flat summary.

pub mod dates;

use serde_json::Value;
use tracing::debug;

use crate::error::XmlError;
use crate::models::config::ExtractionConfig;
use crate::models::summary::{InvoiceSummary, LineItem, Party, TaxLine};
use crate::xml::{self, NodeSet};

/// Extracts a display-ready [`InvoiceSummary`] from a parsed CFDI tree.
///
/// Extraction is total: it never fails on a syntactically parseable
/// document. Any field missing at any nesting level degrades to the
/// configured placeholder; an entirely unrelated document yields an
/// all-placeholder summary with empty sequences.
#[derive(Debug, Clone)]
pub struct CfdiExtractor {
    placeholder: String,
}

impl CfdiExtractor {
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    pub fn with_config(config: &ExtractionConfig) -> Self {
        Self {
            placeholder: config.placeholder.clone(),
        }
    }

    /// Derive a fresh summary from the parsed tree.
    pub fn extract(&self, tree: &Value) -> InvoiceSummary {
        // Tolerate documents where namespace-prefix stripping was not
        // applied upstream: try the namespaced key first, then the bare
        // local name.
        let comprobante = xml::node_at(tree, &["cfdi:Comprobante"])
            .or_else(|| xml::node_at(tree, &["Comprobante"]));

        let Some(comprobante) = comprobante else {
            debug!("no Comprobante root node; producing placeholder summary");
            return InvoiceSummary {
                issue_date: self.placeholder.clone(),
                issuer: self.party(None),
                receiver: self.party(None),
                line_items: Vec::new(),
                tax_lines: Vec::new(),
                total: self.placeholder.clone(),
            };
        };

        let conceptos = NodeSet::from_value(xml::node_at(comprobante, &["Conceptos", "Concepto"]));
        let traslados = NodeSet::from_value(xml::node_at(
            comprobante,
            &["Impuestos", "Traslados", "Traslado"],
        ));

        debug!(
            conceptos = conceptos.len(),
            traslados = traslados.len(),
            "extracting invoice details"
        );

        InvoiceSummary {
            issue_date: self.issue_date(comprobante),
            issuer: self.party(xml::node_at(comprobante, &["Emisor"])),
            receiver: self.party(xml::node_at(comprobante, &["Receptor"])),
            line_items: conceptos.iter().map(|c| self.line_item(c)).collect(),
            tax_lines: traslados.iter().map(|t| self.tax_line(t)).collect(),
            total: self.field(comprobante, &["Total"]),
        }
    }

    /// Read a nested string field, defaulting to the placeholder.
    ///
    /// An empty attribute value counts as missing, like the absent case.
    fn field(&self, node: &Value, path: &[&str]) -> String {
        match xml::text_at(node, path) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => self.placeholder.clone(),
        }
    }

    fn issue_date(&self, comprobante: &Value) -> String {
        xml::text_at(comprobante, &["Fecha"])
            .and_then(dates::parse_iso_date)
            .map(dates::format_long_es_mx)
            .unwrap_or_else(|| self.placeholder.clone())
    }

    fn party(&self, node: Option<&Value>) -> Party {
        match node {
            Some(node) => Party {
                name: self.field(node, &["Nombre"]),
                tax_id: self.field(node, &["Rfc"]),
            },
            None => Party {
                name: self.placeholder.clone(),
                tax_id: self.placeholder.clone(),
            },
        }
    }

    fn line_item(&self, concepto: &Value) -> LineItem {
        LineItem {
            description: self.field(concepto, &["Descripcion"]),
            quantity: self.field(concepto, &["Cantidad"]),
            unit_value: self.field(concepto, &["ValorUnitario"]),
            amount: self.field(concepto, &["Importe"]),
        }
    }

    fn tax_line(&self, traslado: &Value) -> TaxLine {
        TaxLine {
            tax_name: self.field(traslado, &["Impuesto"]),
            amount: self.field(traslado, &["Importe"]),
        }
    }
}

/// Session-local state for one loaded CFDI document.
///
/// Mirrors the upload widget's lifecycle: loading a file replaces the
/// parsed tree; a failed load records an error and leaves any previously
/// loaded tree untouched. The summary is derived fresh on every call,
/// never cached.
#[derive(Debug, Default)]
pub struct CfdiSession {
    tree: Option<Value>,
    error: Option<String>,
    extractor: CfdiExtractor,
}

impl Default for CfdiExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CfdiSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extractor(extractor: CfdiExtractor) -> Self {
        Self {
            tree: None,
            error: None,
            extractor,
        }
    }

    /// Parse and store a document's text content.
    pub fn load(&mut self, xml: &str) -> Result<(), XmlError> {
        match xml::parse_document(xml) {
            Ok(tree) => {
                self.tree = Some(tree);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// The last load error, if the most recent load failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a document has been loaded at all.
    pub fn is_loaded(&self) -> bool {
        self.tree.is_some()
    }

    /// Derive the summary from the currently loaded tree.
    ///
    /// `None` means nothing has been loaded; a loaded but sparse document
    /// still yields a (possibly all-placeholder) summary.
    pub fn details(&self) -> Option<InvoiceSummary> {
        self.tree.as_ref().map(|tree| self.extractor.extract(tree))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL_CFDI: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4"
        Fecha="2022-01-06T10:21:33" Total="85,000.00">
    <cfdi:Emisor Rfc="BEN190101AAA" Nombre="OPERADORA BENFUEN"/>
    <cfdi:Receptor Rfc="MSC850101BBB" Nombre="MUNICIPIO DE SANTA CRUZ"/>
    <cfdi:Conceptos>
        <cfdi:Concepto Descripcion="Reglamento de Mercados" Cantidad="1"
            ValorUnitario="73,275.86" Importe="73,275.86"/>
    </cfdi:Conceptos>
    <cfdi:Impuestos TotalImpuestosTrasladados="11,724.14">
        <cfdi:Traslados>
            <cfdi:Traslado Impuesto="002" Importe="11,724.14"/>
        </cfdi:Traslados>
    </cfdi:Impuestos>
</cfdi:Comprobante>"#;

    fn extract(xml: &str) -> InvoiceSummary {
        let tree = xml::parse_document(xml).unwrap();
        CfdiExtractor::new().extract(&tree)
    }

    #[test]
    fn test_minimal_cfdi() {
        let summary = extract(MINIMAL_CFDI);

        assert_eq!(summary.issue_date, "6 de enero de 2022");
        assert_eq!(summary.issuer.name, "OPERADORA BENFUEN");
        assert_eq!(summary.issuer.tax_id, "BEN190101AAA");
        assert_eq!(summary.receiver.name, "MUNICIPIO DE SANTA CRUZ");
        assert_eq!(summary.line_items.len(), 1);
        assert_eq!(summary.line_items[0].description, "Reglamento de Mercados");
        assert_eq!(summary.line_items[0].amount, "73,275.86");
        assert_eq!(summary.tax_lines.len(), 1);
        assert_eq!(summary.tax_lines[0].tax_name, "002");
        // Totals are opaque text, never reformatted.
        assert_eq!(summary.total, "85,000.00");
    }

    #[test]
    fn test_unrelated_document_yields_placeholders() {
        let summary = extract("<factura><algo>x</algo></factura>");

        assert_eq!(summary, InvoiceSummary::empty());
        assert!(summary.line_items.is_empty());
        assert!(summary.tax_lines.is_empty());
    }

    #[test]
    fn test_sparse_comprobante_degrades_per_field() {
        let summary = extract(r#"<Comprobante Total="10.00"><Emisor Nombre="ACME"/></Comprobante>"#);

        assert_eq!(summary.total, "10.00");
        assert_eq!(summary.issuer.name, "ACME");
        assert_eq!(summary.issuer.tax_id, "N/A");
        assert_eq!(summary.receiver.name, "N/A");
        assert_eq!(summary.issue_date, "N/A");
    }

    #[test]
    fn test_empty_attribute_degrades_to_placeholder() {
        let summary =
            extract(r#"<Comprobante Total=""><Emisor Nombre="" Rfc="AAA010101AAA"/></Comprobante>"#);

        assert_eq!(summary.issuer.name, "N/A");
        assert_eq!(summary.issuer.tax_id, "AAA010101AAA");
        assert_eq!(summary.total, "N/A");
    }

    #[test]
    fn test_unparseable_date_degrades_to_placeholder() {
        let summary = extract(r#"<Comprobante Fecha="06/01/2022"/>"#);
        assert_eq!(summary.issue_date, "N/A");
    }

    #[test]
    fn test_singleton_concepto_equals_one_element_sequence() {
        let single = extract(
            r#"<Comprobante><Conceptos>
                <Concepto Descripcion="a" Cantidad="1" ValorUnitario="5" Importe="5"/>
            </Conceptos></Comprobante>"#,
        );
        let many = extract(
            r#"<Comprobante><Conceptos>
                <Concepto Descripcion="a" Cantidad="1" ValorUnitario="5" Importe="5"/>
                <Concepto Descripcion="b" Cantidad="2" ValorUnitario="3" Importe="6"/>
            </Conceptos></Comprobante>"#,
        );

        assert_eq!(single.line_items.len(), 1);
        assert_eq!(many.line_items.len(), 2);
        // Field-for-field, the singleton maps exactly like the first of many.
        assert_eq!(single.line_items[0], many.line_items[0]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let tree = xml::parse_document(MINIMAL_CFDI).unwrap();
        let extractor = CfdiExtractor::new();
        assert_eq!(extractor.extract(&tree), extractor.extract(&tree));
    }

    #[test]
    fn test_session_distinguishes_unloaded_from_sparse() {
        let mut session = CfdiSession::new();
        assert!(session.details().is_none());

        session.load("<factura/>").unwrap();
        let summary = session.details().unwrap();
        assert_eq!(summary, InvoiceSummary::empty());
    }

    #[test]
    fn test_failed_load_preserves_previous_tree() {
        let mut session = CfdiSession::new();
        session.load(MINIMAL_CFDI).unwrap();

        let before = session.details().unwrap();
        assert!(session.load("<a><b></a>").is_err());

        // The error is exposed, but the prior document is still loaded.
        assert!(session.error().is_some());
        assert_eq!(session.details().unwrap(), before);

        // A subsequent good load clears the error.
        session.load("<Comprobante Total=\"1.00\"/>").unwrap();
        assert!(session.error().is_none());
        assert_eq!(session.details().unwrap().total, "1.00");
    }

    #[test]
    fn test_custom_placeholder() {
        let config = ExtractionConfig {
            placeholder: "(sin dato)".to_string(),
        };
        let tree = xml::parse_document("<Comprobante/>").unwrap();
        let summary = CfdiExtractor::with_config(&config).extract(&tree);
        assert_eq!(summary.total, "(sin dato)");
    }
}
