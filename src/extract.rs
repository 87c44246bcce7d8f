//! Document bytes to plain text.

use std::panic::{self, AssertUnwindSafe};

use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use crate::error::ExtractError;

/// Formats the pipeline knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Doc,
    Docx,
}

impl DocumentFormat {
    /// Case-insensitive extension match; `None` for anything unsupported.
    pub fn from_filename(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if lower.ends_with(".docx") {
            Some(Self::Docx)
        } else if lower.ends_with(".doc") {
            Some(Self::Doc)
        } else {
            None
        }
    }
}

/// Low-level decoders. Swappable so the rest of the pipeline can be driven
/// with canned text.
pub trait TextBackend: Send + Sync {
    /// Text of each page, in order.
    fn pdf_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError>;

    /// Text of each paragraph, in order.
    fn docx_paragraphs(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError>;
}

/// `pdf-extract` for PDF, `docx-rs` for Word documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl TextBackend for NativeBackend {
    fn pdf_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        // pdf-extract panics on some malformed inputs instead of erroring.
        panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem_by_pages(bytes)))
            .map_err(|p| ExtractError::Panicked(panic_message(p)))?
            .map_err(|e| ExtractError::Pdf(e.to_string()))
    }

    fn docx_paragraphs(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        let docx = panic::catch_unwind(AssertUnwindSafe(|| docx_rs::read_docx(bytes)))
            .map_err(|p| ExtractError::Panicked(panic_message(p)))?
            .map_err(|e| ExtractError::Docx(format!("{e:?}")))?;

        Ok(docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
                _ => None,
            })
            .collect())
    }
}

/// Runs are parts of the same sentence and are joined without a separator.
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                match rc {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    _ => {}
                }
            }
        }
    }
    text
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

pub struct DocumentTextExtractor {
    backend: Box<dyn TextBackend>,
}

impl Default for DocumentTextExtractor {
    fn default() -> Self {
        Self::new(Box::new(NativeBackend))
    }
}

impl DocumentTextExtractor {
    pub fn new(backend: Box<dyn TextBackend>) -> Self {
        Self { backend }
    }

    /// Full text in reading order, or an empty string when the document
    /// cannot be decoded.
    pub fn extract(&self, bytes: &[u8], format: DocumentFormat) -> String {
        match self.try_extract(bytes, format) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(?format, error = %e, "text extraction failed");
                String::new()
            }
        }
    }

    /// Like [`extract`](Self::extract) but keeps the failure reason.
    ///
    /// PDF pages are concatenated with no separator, so the last word of a
    /// page can run into the first word of the next. Word paragraphs each
    /// get a trailing newline, empty ones included.
    pub fn try_extract(&self, bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractError> {
        match format {
            DocumentFormat::Pdf => Ok(self.backend.pdf_pages(bytes)?.concat()),
            DocumentFormat::Doc | DocumentFormat::Docx => {
                let mut text = String::new();
                for para in self.backend.docx_paragraphs(bytes)? {
                    text.push_str(&para);
                    text.push('\n');
                }
                Ok(text)
            }
        }
    }
}
