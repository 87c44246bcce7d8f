use crate::config::ParserConfig;
use crate::error::{ConfigError, Skip};
use crate::experience::ExperienceEstimator;
use crate::extract::{DocumentFormat, DocumentTextExtractor, TextBackend};
use crate::fields::FieldExtractors;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";

/// An uploaded document. Never stored by the parser.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl RawDocument {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn format(&self) -> Option<DocumentFormat> {
        DocumentFormat::from_filename(&self.filename)
    }
}

/// Candidate details pulled from one resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeRecord {
    pub filename: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub experience_years: u32,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub text_preview: String,
}

impl ResumeRecord {
    pub fn email_or_na(&self) -> &str {
        self.email.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn phone_or_na(&self) -> &str {
        self.phone.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// Turns one document into one [`ResumeRecord`].
///
/// Holds only compiled configuration, so a single builder can be shared
/// across threads.
pub struct ResumeRecordBuilder {
    text: DocumentTextExtractor,
    fields: FieldExtractors,
    experience: ExperienceEstimator,
    preview_chars: usize,
}

impl Default for ResumeRecordBuilder {
    fn default() -> Self {
        Self {
            text: DocumentTextExtractor::default(),
            fields: FieldExtractors::default(),
            experience: ExperienceEstimator::default(),
            preview_chars: ParserConfig::default().preview_chars,
        }
    }
}

impl ResumeRecordBuilder {
    pub fn from_config(config: &ParserConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            text: DocumentTextExtractor::default(),
            fields: FieldExtractors::new(config)?,
            experience: ExperienceEstimator::new(config)?,
            preview_chars: config.preview_chars,
        })
    }

    /// Replace the PDF/DOCX decoders.
    pub fn with_backend(mut self, backend: Box<dyn TextBackend>) -> Self {
        self.text = DocumentTextExtractor::new(backend);
        self
    }

    pub fn build(&self, doc: &RawDocument) -> Result<ResumeRecord, Skip> {
        let format = doc
            .format()
            .ok_or_else(|| Skip::UnsupportedFormat(doc.filename.clone()))?;

        let text = self.text.extract(&doc.bytes, format);
        if text.is_empty() {
            return Err(Skip::NoText);
        }

        Ok(self.build_from_text(&doc.filename, &text))
    }

    /// Run every field extractor over already-extracted text.
    pub fn build_from_text(&self, filename: &str, text: &str) -> ResumeRecord {
        ResumeRecord {
            filename: filename.to_string(),
            name: self
                .fields
                .extract_name(text)
                .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            email: self.fields.extract_email(text),
            phone: self.fields.extract_phone(text),
            experience_years: self.experience.estimate(text),
            skills: self.fields.extract_skills(text),
            education: self.fields.extract_education(text),
            text_preview: preview(text, self.preview_chars),
        }
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(preview("short", 500), "short");
        assert_eq!(preview("abcdef", 6), "abcdef");
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("ééééé", 2), "éé...");
    }

    #[test]
    fn unsupported_extension_is_skipped() {
        let builder = ResumeRecordBuilder::default();
        let doc = RawDocument::new("resume.txt", b"Jane Doe".to_vec());
        assert_eq!(builder.build(&doc), Err(Skip::UnsupportedFormat("resume.txt".into())));
    }

    #[test]
    fn sentinels_when_nothing_matches() {
        let record = ResumeRecordBuilder::default().build_from_text("x.pdf", "1234\n5678");
        assert_eq!(record.name, UNKNOWN_NAME);
        assert_eq!(record.email_or_na(), NOT_AVAILABLE);
        assert_eq!(record.phone_or_na(), NOT_AVAILABLE);
        assert_eq!(record.experience_years, 0);
        assert!(record.skills.is_empty());
        assert!(record.education.is_empty());
        assert_eq!(record.text_preview, "1234\n5678");
    }

    #[test]
    fn long_text_gets_continuation_marker() {
        let text = format!("Jane Doe\n{}", "x".repeat(600));
        let record = ResumeRecordBuilder::default().build_from_text("x.pdf", &text);
        assert_eq!(record.text_preview.chars().count(), 503);
        assert!(record.text_preview.ends_with("..."));
    }
}
