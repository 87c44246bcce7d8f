//! Plain-English questions over a [`ResumeCollection`].

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::batch::ResumeCollection;
use crate::record::ResumeRecord;

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

const HELP: &str = "I can help with questions like: 'How many persons have experience greater than 5 years?', \
'What is the average experience?', 'How many people have Python skill?', 'Show education distribution'";

/// A structured answer plus the sentence shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryAnswer {
    Count { text: String, count: usize },
    Average { text: String, average: f64 },
    Distribution { text: String, counts: BTreeMap<String, usize> },
    Suggestion { text: String },
}

impl QueryAnswer {
    pub fn text(&self) -> &str {
        match self {
            Self::Count { text, .. }
            | Self::Average { text, .. }
            | Self::Distribution { text, .. }
            | Self::Suggestion { text } => text,
        }
    }
}

pub fn with_experience_greater_than(collection: &ResumeCollection, years: u32) -> Vec<&ResumeRecord> {
    collection.iter().filter(|r| r.experience_years > years).collect()
}

pub fn with_experience_less_than(collection: &ResumeCollection, years: u32) -> Vec<&ResumeRecord> {
    collection.iter().filter(|r| r.experience_years < years).collect()
}

/// Mean experience, `None` for an empty collection.
pub fn average_experience(collection: &ResumeCollection) -> Option<f64> {
    if collection.is_empty() {
        return None;
    }
    let total: u64 = collection.iter().map(|r| u64::from(r.experience_years)).sum();
    Some(total as f64 / collection.len() as f64)
}

pub fn skill_counts(collection: &ResumeCollection) -> BTreeMap<String, usize> {
    count_by(collection, |r| &r.skills)
}

pub fn education_counts(collection: &ResumeCollection) -> BTreeMap<String, usize> {
    count_by(collection, |r| &r.education)
}

fn count_by(
    collection: &ResumeCollection,
    field: impl Fn(&ResumeRecord) -> &Vec<String>,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in collection {
        for item in field(record) {
            *counts.entry(item.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Answer a free-text question. Unknown questions get a usage hint.
pub fn answer(collection: &ResumeCollection, question: &str) -> QueryAnswer {
    let q = question.to_lowercase();
    let threshold = NUMBER_RE.find(&q).and_then(|m| m.as_str().parse::<u32>().ok());

    if q.contains("experience greater than") || q.contains("experience > ") {
        if let Some(n) = threshold {
            let count = with_experience_greater_than(collection, n).len();
            return QueryAnswer::Count {
                text: format!("{count} persons have experience greater than {n} years"),
                count,
            };
        }
    } else if q.contains("experience less than") || q.contains("experience < ") {
        if let Some(n) = threshold {
            let count = with_experience_less_than(collection, n).len();
            return QueryAnswer::Count {
                text: format!("{count} persons have experience less than {n} years"),
                count,
            };
        }
    } else if q.contains("average experience") {
        let average = average_experience(collection).unwrap_or(0.0);
        let average = (average * 10.0).round() / 10.0;
        return QueryAnswer::Average {
            text: format!("Average experience is {average:.1} years"),
            average,
        };
    } else if q.contains("skill") {
        let known = skill_counts(collection);
        // Longest name first so "javascript" wins over "java".
        let mut names: Vec<_> = known.keys().collect();
        names.sort_by_key(|s| std::cmp::Reverse(s.len()));
        if let Some(skill) = names.into_iter().find(|s| mentions(&q, s)) {
            let count = known[skill.as_str()];
            return QueryAnswer::Count {
                text: format!("{count} persons have {skill} skill"),
                count,
            };
        }
    } else if q.contains("total count") || q.contains("how many resumes") {
        let count = collection.len();
        return QueryAnswer::Count {
            text: format!("Total {count} resumes uploaded"),
            count,
        };
    } else if q.contains("education") {
        let counts = education_counts(collection);
        if !counts.is_empty() {
            let summary = counts
                .iter()
                .map(|(edu, n)| format!("{edu}: {n}"))
                .collect::<Vec<_>>()
                .join(", ");
            return QueryAnswer::Distribution {
                text: format!("Education distribution: {summary}"),
                counts,
            };
        }
    }

    QueryAnswer::Suggestion { text: HELP.to_string() }
}

fn mentions(question: &str, word: &str) -> bool {
    let pattern = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(word));
    Regex::new(&pattern).map(|re| re.is_match(question)).unwrap_or(false)
}
