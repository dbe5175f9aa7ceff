//! Read command - extract details from a single CFDI file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use lector_core::extract::CfdiExtractor;
use lector_core::models::config::LectorConfig;
use lector_core::models::summary::InvoiceSummary;
use lector_core::xml::parse_document;

/// Arguments for the read command.
#[derive(Args)]
pub struct ReadArgs {
    /// Input CFDI XML file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ReadArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let summary = read_file(&args.input, &config)?;

    let output = format_summary(&summary, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LectorConfig> {
    Ok(if let Some(path) = config_path {
        LectorConfig::from_file(std::path::Path::new(path))?
    } else {
        LectorConfig::default()
    })
}

/// Parse one CFDI file and extract its summary.
pub fn read_file(input: &PathBuf, config: &LectorConfig) -> anyhow::Result<InvoiceSummary> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "xml" {
        anyhow::bail!("Unsupported file format: {}", extension);
    }

    info!("Reading file: {}", input.display());

    let xml = fs::read_to_string(input)?;
    let tree = parse_document(&xml)?;
    let extractor = CfdiExtractor::with_config(&config.extraction);

    Ok(extractor.extract(&tree))
}

pub fn format_summary(summary: &InvoiceSummary, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Csv => format_csv(summary),
        OutputFormat::Text => Ok(format_text(summary)),
    }
}

fn format_csv(summary: &InvoiceSummary) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "issue_date",
        "issuer_name",
        "issuer_tax_id",
        "receiver_name",
        "receiver_tax_id",
        "line_items",
        "first_tax_amount",
        "total",
    ])?;

    wtr.write_record([
        &summary.issue_date,
        &summary.issuer.name,
        &summary.issuer.tax_id,
        &summary.receiver.name,
        &summary.receiver.tax_id,
        &summary.line_items.len().to_string(),
        summary
            .tax_lines
            .first()
            .map(|t| t.amount.as_str())
            .unwrap_or(""),
        &summary.total,
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(summary: &InvoiceSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("Fecha: {}\n", summary.issue_date));
    output.push('\n');

    output.push_str("Emisor:\n");
    output.push_str(&format!("  {}\n", summary.issuer.name));
    output.push_str(&format!("  RFC: {}\n", summary.issuer.tax_id));
    output.push('\n');

    output.push_str("Receptor:\n");
    output.push_str(&format!("  {}\n", summary.receiver.name));
    output.push_str(&format!("  RFC: {}\n", summary.receiver.tax_id));
    output.push('\n');

    output.push_str("Conceptos:\n");
    for item in &summary.line_items {
        output.push_str(&format!(
            "  {} x {} @ {} = {}\n",
            item.quantity, item.description, item.unit_value, item.amount
        ));
    }
    output.push('\n');

    for tax in &summary.tax_lines {
        output.push_str(&format!("Impuesto {}: {}\n", tax.tax_name, tax.amount));
    }
    output.push_str(&format!("Total: {}\n", summary.total));

    output
}
