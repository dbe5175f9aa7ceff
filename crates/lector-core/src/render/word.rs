//! Word rendering of a bound letter.

use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run, Table, TableCell, TableRow};
use tracing::debug;

use crate::error::RenderError;

use super::template::{Letter, ParagraphBlock};

// Column grid in twentieths of a point: 20% / 50% / 30% of a full-width
// table, as in the original letter.
const GRID: [usize; 3] = [1928, 4819, 2891];

fn paragraph(block: &ParagraphBlock) -> Paragraph {
    let mut run = Run::new().add_text(block.text.as_str());
    if block.bold {
        run = run.bold();
    }
    let mut paragraph = Paragraph::new().add_run(run);
    if block.centered {
        paragraph = paragraph.align(AlignmentType::Center);
    }
    paragraph
}

fn cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
}

fn row(cells: &[String; 3]) -> TableRow {
    TableRow::new(vec![cell(&cells[0]), cell(&cells[1]), cell(&cells[2])])
}

/// Render the letter as `.docx` bytes.
pub fn render_docx(letter: &Letter) -> Result<Vec<u8>, RenderError> {
    let mut rows = Vec::with_capacity(letter.table.rows.len() + 1);
    rows.push(row(&letter.table.header));
    for data in &letter.table.rows {
        rows.push(row(data));
    }
    let table = Table::new(rows).set_grid(GRID.to_vec());

    let mut docx = Docx::new();
    for block in &letter.head {
        docx = docx.add_paragraph(paragraph(block));
    }
    docx = docx.add_table(table);
    for block in &letter.tail {
        docx = docx.add_paragraph(paragraph(block));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| RenderError::Docx(e.to_string()))?;

    let bytes = buffer.into_inner();
    debug!("rendered {} byte .docx letter", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::summary::InvoiceSummary;
    use crate::render::template::{LetterTemplate, bind};

    #[test]
    fn test_renders_zip_container() {
        let letter = bind(&LetterTemplate::default(), &InvoiceSummary::empty());
        let bytes = render_docx(&letter).unwrap();

        // OOXML is a zip archive.
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_placeholder_summary_still_renders() {
        // The letter must assemble even when every field is "N/A" and
        // there are no line items at all.
        let letter = bind(&LetterTemplate::default(), &InvoiceSummary::empty());
        assert_eq!(letter.table.rows.len(), 2);
        assert!(render_docx(&letter).is_ok());
    }
}
