pub mod handlers;
pub mod parser;
pub mod pdf;

use thiserror::Error;

pub use parser::parse_resume_text;
pub use pdf::extract_pdf_text;

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("Could not read PDF: {0}")]
    Extraction(String),

    #[error("PDF contains no extractable text")]
    NoText,
}
