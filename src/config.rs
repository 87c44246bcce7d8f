use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "react",
    "angular",
    "vue",
    "node",
    "django",
    "flask",
    "spring",
    "html",
    "css",
    "sql",
    "mongodb",
    "postgresql",
    "mysql",
    "git",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "machine learning",
    "data science",
    "ai",
    "tensorflow",
    "pytorch",
    "pandas",
    "numpy",
    "scikit-learn",
];

pub const DEFAULT_EDUCATION: &[&str] = &[
    "phd", "ph.d", "doctorate", "masters", "master", "mba", "ms", "ma", "bachelor", "bachelors",
    "bs", "ba", "btech", "be", "diploma",
];

pub const DEFAULT_SKILL_HEADINGS: &[&str] = &["skills", "technologies", "tech stack", "competencies"];

pub const DEFAULT_EDUCATION_HEADINGS: &[&str] = &["education", "academic", "qualification"];

pub const DEFAULT_OTHER_HEADINGS: &[&str] = &[
    "experience",
    "employment",
    "work history",
    "projects",
    "certifications",
    "certificates",
    "summary",
    "objective",
    "awards",
    "achievements",
    "publications",
    "interests",
    "hobbies",
    "references",
];

/// Which phone grammar the phone extractor runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneGrammar {
    /// Optional country code, then ten digits grouped 3-3-4 or 5-5.
    #[default]
    Strict,
    /// Any separated run of 10 to 13 digits; digits beyond the last ten are
    /// the country code.
    Loose,
}

/// Heading synonyms used by the section scanner. Matched as
/// case-insensitive substrings of a line.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SectionHeadings {
    pub skills: Vec<String>,
    pub education: Vec<String>,
    /// Headings of every other section; any of them ends a skills or
    /// education body.
    pub other: Vec<String>,
}

impl Default for SectionHeadings {
    fn default() -> Self {
        Self {
            skills: to_owned(DEFAULT_SKILL_HEADINGS),
            education: to_owned(DEFAULT_EDUCATION_HEADINGS),
            other: to_owned(DEFAULT_OTHER_HEADINGS),
        }
    }
}

impl SectionHeadings {
    /// Markers that end the skills section.
    pub fn not_skills(&self) -> Vec<String> {
        self.education.iter().chain(&self.other).cloned().collect()
    }

    /// Markers that end the education section.
    pub fn not_education(&self) -> Vec<String> {
        self.skills.iter().chain(&self.other).cloned().collect()
    }
}

/// Everything the extraction pipeline can be tuned with.
///
/// Pattern fields left as `None` use the built-in defaults. All fields are
/// optional in the TOML form, so a partial file only overrides what it names.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub email_pattern: Option<String>,
    pub phone_grammar: PhoneGrammar,
    /// Tried in order; each must capture the year count in group 1.
    pub experience_patterns: Option<Vec<String>>,
    pub skill_keywords: Vec<String>,
    pub education_keywords: Vec<String>,
    pub headings: SectionHeadings,
    /// Year used for "present"/"current" date ranges. Defaults to the
    /// local calendar year.
    pub reference_year: Option<i32>,
    pub preview_chars: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            email_pattern: None,
            phone_grammar: PhoneGrammar::default(),
            experience_patterns: None,
            skill_keywords: to_owned(DEFAULT_SKILLS),
            education_keywords: to_owned(DEFAULT_EDUCATION),
            headings: SectionHeadings::default(),
            reference_year: None,
            preview_chars: 500,
        }
    }
}

impl ParserConfig {
    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
