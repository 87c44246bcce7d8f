//! Single-field extractors. Each one reads the whole document text and
//! returns `None` (or an empty list) when it finds nothing.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{ParserConfig, PhoneGrammar};
use crate::error::ConfigError;
use crate::section::section_body;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.%+-]+@(?:[\w-]+\.)+[A-Za-z]{2,}\b").unwrap());

// Country code is either introduced by `+`/`00` or stands alone followed by a
// separator; the ten digits may be split 3-3-4 (optionally with a
// parenthesised area code) or 5-5 by spaces, dots or hyphens. Neither end may
// touch another digit.
static STRICT_PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:^|[^\d])(?:(?:\+|00)(\d{1,3})[\s.\-]*|(\d{1,3})[\s.\-]+)?(?:\(?(\d{3})\)?[\s.\-]*(\d{3})[\s.\-]*(\d{4})|(\d{5})[\s.\-]*(\d{5}))(?:[^\d]|$)",
    )
    .unwrap()
});

// Digits with any mix of single-line separators in between.
static LOOSE_PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\d[\d \t().\-]{8,}\d").unwrap());

/// Keyword list compiled into whole-word matchers.
#[derive(Debug, Clone)]
struct KeywordSet {
    matchers: Vec<(String, Regex)>,
}

impl KeywordSet {
    fn new(keywords: &[String]) -> Result<Self, ConfigError> {
        let mut matchers = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            let keyword = keyword.trim().to_lowercase();
            if keyword.is_empty() {
                continue;
            }
            let pattern = format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(&keyword));
            let re = Regex::new(&pattern)
                .map_err(|source| ConfigError::InvalidPattern { field: "keyword", source })?;
            matchers.push((keyword, re));
        }
        Ok(Self { matchers })
    }

    /// Sorted, deduplicated keywords present in `body`.
    fn find_in(&self, body: &str) -> Vec<String> {
        self.matchers
            .iter()
            .filter(|(_, re)| re.is_match(body))
            .map(|(kw, _)| kw.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// The email, phone, name, skills and education extractors, sharing one
/// compiled configuration.
#[derive(Debug, Clone)]
pub struct FieldExtractors {
    email: Regex,
    phone: PhoneGrammar,
    skills: KeywordSet,
    education: KeywordSet,
    skill_headings: Vec<String>,
    not_skill_headings: Vec<String>,
    education_headings: Vec<String>,
    not_education_headings: Vec<String>,
}

impl Default for FieldExtractors {
    fn default() -> Self {
        // Built-in keywords are plain words; escaping them cannot fail.
        Self::new(&ParserConfig::default()).unwrap_or_else(|e| unreachable!("default config: {e}"))
    }
}

impl FieldExtractors {
    pub fn new(config: &ParserConfig) -> Result<Self, ConfigError> {
        let email = match &config.email_pattern {
            Some(p) => Regex::new(p)
                .map_err(|source| ConfigError::InvalidPattern { field: "email", source })?,
            None => EMAIL_RE.clone(),
        };

        Ok(Self {
            email,
            phone: config.phone_grammar,
            skills: KeywordSet::new(&config.skill_keywords)?,
            education: KeywordSet::new(&config.education_keywords)?,
            skill_headings: config.headings.skills.clone(),
            not_skill_headings: config.headings.not_skills(),
            education_headings: config.headings.education.clone(),
            not_education_headings: config.headings.not_education(),
        })
    }

    /// First email address in document order.
    pub fn extract_email(&self, text: &str) -> Option<String> {
        self.email
            .find(text)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// First phone number, normalized according to the configured grammar.
    pub fn extract_phone(&self, text: &str) -> Option<String> {
        let text = normalize_spaces(text);
        match self.phone {
            PhoneGrammar::Strict => strict_phone(&text),
            PhoneGrammar::Loose => loose_phone(&text),
        }
    }

    /// First short line without digits, `@` or a URL.
    pub fn extract_name(&self, text: &str) -> Option<String> {
        text.lines().map(str::trim).find(|line| looks_like_name(line)).map(str::to_string)
    }

    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        let body = section_body(text, &self.skill_headings, &self.not_skill_headings);
        self.skills.find_in(&body)
    }

    pub fn extract_education(&self, text: &str) -> Vec<String> {
        let body = section_body(text, &self.education_headings, &self.not_education_headings);
        self.education.find_in(&body)
    }
}

fn looks_like_name(line: &str) -> bool {
    !line.is_empty()
        && line.split_whitespace().count() <= 4
        && !line.chars().any(char::is_numeric)
        && !line.contains('@')
        && !line.to_lowercase().contains("http")
}

fn normalize_spaces(text: &str) -> String {
    text.replace(['\u{00a0}', '\u{202f}', '\u{2007}', '\u{2009}'], " ")
}

fn strict_phone(text: &str) -> Option<String> {
    let caps = STRICT_PHONE_RE.captures(text)?;
    let code = caps.get(1).or_else(|| caps.get(2));
    let digits = match caps.get(3) {
        Some(_) => format!("{}{}{}", &caps[3], &caps[4], &caps[5]),
        None => format!("{}{}", &caps[6], &caps[7]),
    };
    Some(match code {
        Some(code) => format!("+{} {}", code.as_str(), digits),
        None => digits,
    })
}

/// Keeps the first run of 10 to 13 digits (after dropping a `00` prefix);
/// anything ahead of the last ten digits is the country code.
fn loose_phone(text: &str) -> Option<String> {
    LOOSE_PHONE_RE.find_iter(text).find_map(|m| {
        let digits: String = m.as_str().chars().filter(char::is_ascii_digit).collect();
        let digits = digits.strip_prefix("00").unwrap_or(&digits);
        if !(10..=13).contains(&digits.len()) {
            return None;
        }
        let (code, local) = digits.split_at(digits.len() - 10);
        Some(if code.is_empty() {
            local.to_string()
        } else {
            format!("+{code} {local}")
        })
    })
}
