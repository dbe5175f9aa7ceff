//! Letter command - generate the quotation letter from a CFDI file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use lector_core::models::config::LectorConfig;
use lector_core::render::{LetterTemplate, bind, render_docx, render_pdf};

use super::read::{load_config, read_file};

/// Arguments for the letter command.
#[derive(Args)]
pub struct LetterArgs {
    /// Input CFDI XML file
    #[arg(required = true)]
    input: PathBuf,

    /// Document format to generate
    #[arg(short, long, value_enum, default_value = "docx")]
    format: LetterFormat,

    /// Output directory (default: from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Font directory for PDF output (default: from config)
    #[arg(long)]
    fonts: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LetterFormat {
    /// Word document
    Docx,
    /// PDF document
    Pdf,
    /// Both formats
    Both,
}

pub fn run(args: LetterArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let summary = read_file(&args.input, &config)?;
    let template = load_template(&config)?;
    let letter = bind(&template, &summary);

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.render.output_dir.clone());
    fs::create_dir_all(&output_dir)?;

    if matches!(args.format, LetterFormat::Docx | LetterFormat::Both) {
        let bytes = render_docx(&letter)?;
        let path = output_dir.join(format!("{}.docx", letter.file_stem));
        fs::write(&path, bytes)?;
        println!("{} Letter written to {}", style("✓").green(), path.display());
    }

    if matches!(args.format, LetterFormat::Pdf | LetterFormat::Both) {
        let fonts_dir = args
            .fonts
            .clone()
            .unwrap_or_else(|| config.render.fonts_dir.clone());
        debug!("Using fonts from {}", fonts_dir.display());

        let bytes = render_pdf(&letter, &fonts_dir)?;
        let path = output_dir.join(format!("{}.pdf", letter.file_stem));
        fs::write(&path, bytes)?;
        println!("{} Letter written to {}", style("✓").green(), path.display());
    }

    Ok(())
}

fn load_template(config: &LectorConfig) -> anyhow::Result<LetterTemplate> {
    Ok(match &config.render.template_path {
        Some(path) => LetterTemplate::from_file(path)?,
        None => LetterTemplate::default(),
    })
}
