//! Letter rendering: template, data binding, and document output.

pub mod pdf;
pub mod template;
pub mod word;

pub use pdf::render_pdf;
pub use template::{Letter, LetterTemplate, ParagraphBlock, QuoteTable, bind};
pub use word::render_docx;
