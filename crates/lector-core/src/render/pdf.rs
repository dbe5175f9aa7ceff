//! PDF rendering of a bound letter.
//!
//! Alternate output path with the same fixed-template content as the
//! Word letter. Fonts are loaded from a directory holding the
//! LiberationSans TTF family.

use std::path::Path;

use genpdf::elements::{Break, FrameCellDecorator, Paragraph, StyledElement, TableLayout};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element, Margins, SimplePageDecorator};
use tracing::debug;

use crate::error::RenderError;

use super::template::{Letter, ParagraphBlock};

const FONT_FAMILY: &str = "LiberationSans";

fn paragraph(block: &ParagraphBlock) -> StyledElement<Paragraph> {
    let mut style = Style::new().with_font_size(11);
    if block.bold {
        style = style.bold();
    }
    let mut element = Paragraph::new(block.text.as_str());
    if block.centered {
        element = element.aligned(Alignment::Center);
    }
    element.styled(style)
}

/// Render the letter as `.pdf` bytes.
pub fn render_pdf(letter: &Letter, fonts_dir: &Path) -> Result<Vec<u8>, RenderError> {
    let font_family = genpdf::fonts::from_files(fonts_dir, FONT_FAMILY, None).map_err(|e| {
        RenderError::Font {
            dir: fonts_dir.display().to_string(),
            reason: e.to_string(),
        }
    })?;

    let mut doc = Document::new(font_family);
    doc.set_title("Cotización");

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(Margins::trbl(20, 20, 20, 20));
    doc.set_page_decorator(decorator);

    for block in &letter.head {
        doc.push(paragraph(block));
        doc.push(Break::new(0.5));
    }

    let cell_style = Style::new().with_font_size(10);
    let header_style = Style::new().with_font_size(10).bold();
    let cell_margins = Margins::trbl(1, 1, 1, 2);

    let mut table = TableLayout::new(vec![1, 3, 2]);
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let mut header = table.row();
    for text in &letter.table.header {
        header = header.element(
            Paragraph::new(text.as_str())
                .styled(header_style)
                .padded(cell_margins),
        );
    }
    header
        .push()
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    for cells in &letter.table.rows {
        let mut row = table.row();
        for text in cells {
            row = row.element(
                Paragraph::new(text.as_str())
                    .styled(cell_style)
                    .padded(cell_margins),
            );
        }
        row.push().map_err(|e| RenderError::Pdf(e.to_string()))?;
    }

    doc.push(table);
    doc.push(Break::new(1.0));

    for block in &letter.tail {
        doc.push(paragraph(block));
        doc.push(Break::new(0.5));
    }

    let mut bytes = Vec::new();
    doc.render(&mut bytes)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    debug!("rendered {} byte .pdf letter", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::summary::InvoiceSummary;
    use crate::render::template::{LetterTemplate, bind};

    #[test]
    fn test_missing_fonts_surface_as_font_error() {
        let letter = bind(&LetterTemplate::default(), &InvoiceSummary::empty());
        let missing = Path::new("/nonexistent/fonts");

        match render_pdf(&letter, missing) {
            Err(RenderError::Font { dir, .. }) => assert_eq!(dir, "/nonexistent/fonts"),
            other => panic!("expected font error, got {other:?}"),
        }
    }
}
