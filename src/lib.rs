//! Best-effort extraction of candidate details (name, contact, experience,
//! skills, education) from PDF and Word resumes.
//!
//! Pipeline: bytes → [`extract::DocumentTextExtractor`] → text →
//! [`fields::FieldExtractors`] + [`experience::ExperienceEstimator`] →
//! [`ResumeRecord`]. [`ResumeRecordBuilder`] ties the stages together.

pub mod batch;
pub mod config;
pub mod error;
pub mod experience;
pub mod extract;
pub mod fields;
pub mod intake;
pub mod output;
pub mod query;
pub mod record;
pub mod section;

pub use batch::{process_batch, process_batch_parallel, BatchSummary, ResumeCollection};
pub use config::{ParserConfig, PhoneGrammar, SectionHeadings};
pub use error::{ConfigError, ExtractError, Skip};
pub use extract::{DocumentFormat, DocumentTextExtractor, NativeBackend, TextBackend};
pub use query::QueryAnswer;
pub use record::{RawDocument, ResumeRecord, ResumeRecordBuilder, NOT_AVAILABLE, UNKNOWN_NAME};
