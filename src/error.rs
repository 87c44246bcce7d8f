use thiserror::Error;

/// Why a document could not be turned into text.
///
/// Only surfaced by [`crate::extract::DocumentTextExtractor::try_extract`];
/// the infallible path collapses every variant into an empty string.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read PDF: {0}")]
    Pdf(String),
    #[error("failed to read DOCX: {0}")]
    Docx(String),
    #[error("decoder panicked: {0}")]
    Panicked(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {field} pattern: {source}")]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("{field} pattern `{pattern}` has no capture group")]
    MissingCapture { field: &'static str, pattern: String },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A document that produced no record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("no text could be extracted")]
    NoText,
    #[error("could not read file: {0}")]
    Unreadable(String),
}
