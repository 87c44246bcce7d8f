//! Years-of-experience estimation.

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParserConfig;
use crate::error::ConfigError;

/// Explicit phrases, strongest first. Group 1 is the year count.
pub const DEFAULT_EXPERIENCE_PATTERNS: &[&str] = &[
    r"(\d+)[\s+]*(?:years?|yrs?)\s*(?:of\s*)?(?:experience|exp)",
    r"experience[:\s]*(\d+)[\s+]*(?:years?|yrs?)",
    r"(\d+)[\s+]*(?:years?|yrs?)",
];

static YEAR_RANGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})\s*[-–]\s*(\d{4})").unwrap());

static OPEN_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{4})\s*[-–]\s*(?:present|current)").unwrap());

static MONTH_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})/(\d{4})\s*[-–]\s*(\d{1,2})/(\d{4})").unwrap());

#[derive(Debug, Clone)]
pub struct ExperienceEstimator {
    patterns: Vec<Regex>,
    reference_year: Option<i32>,
}

impl Default for ExperienceEstimator {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_EXPERIENCE_PATTERNS
                .iter()
                .map(|p| Regex::new(p).unwrap_or_else(|e| unreachable!("built-in pattern: {e}")))
                .collect(),
            reference_year: None,
        }
    }
}

impl ExperienceEstimator {
    pub fn new(config: &ParserConfig) -> Result<Self, ConfigError> {
        let patterns = match &config.experience_patterns {
            None => Self::default().patterns,
            Some(list) => list
                .iter()
                .map(|p| compile_counting_pattern(p))
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(Self {
            patterns,
            reference_year: config.reference_year,
        })
    }

    /// Pin the year used for open-ended ranges.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Best guess at total years of experience; 0 when nothing is found.
    pub fn estimate(&self, text: &str) -> u32 {
        self.from_phrases(text)
            .unwrap_or_else(|| self.from_date_ranges(text))
    }

    /// The largest count matched by the first pattern that matches at all.
    pub fn from_phrases(&self, text: &str) -> Option<u32> {
        let lower = text.to_lowercase();
        self.patterns.iter().find_map(|re| {
            re.captures_iter(&lower)
                .filter_map(|c| c.get(1)?.as_str().parse::<u32>().ok())
                .max()
        })
    }

    /// Sum of every detected year range, in whole years.
    ///
    /// Overlapping or repeated ranges are all counted.
    pub fn from_date_ranges(&self, text: &str) -> u32 {
        let now = self.reference_year.unwrap_or_else(|| chrono::Local::now().year());
        let mut months: i64 = 0;

        for caps in YEAR_RANGE_RE.captures_iter(text) {
            months += span_months(&caps[1], &caps[2]);
        }
        for caps in OPEN_RANGE_RE.captures_iter(text) {
            months += span_months(&caps[1], &now.to_string());
        }
        for caps in MONTH_RANGE_RE.captures_iter(text) {
            months += span_months(&caps[2], &caps[4]);
        }

        if months <= 0 {
            return 0;
        }
        u32::try_from(months / 12).unwrap_or(u32::MAX)
    }
}

fn span_months(start: &str, end: &str) -> i64 {
    match (start.parse::<i64>(), end.parse::<i64>()) {
        (Ok(start), Ok(end)) => (end - start) * 12,
        _ => 0,
    }
}

fn compile_counting_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    let re = Regex::new(pattern)
        .map_err(|source| ConfigError::InvalidPattern { field: "experience", source })?;
    if re.captures_len() < 2 {
        return Err(ConfigError::MissingCapture {
            field: "experience",
            pattern: pattern.to_string(),
        });
    }
    Ok(re)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator() -> ExperienceEstimator {
        ExperienceEstimator::default().with_reference_year(2024)
    }

    #[test]
    fn explicit_phrase_beats_date_ranges() {
        let text = "Senior engineer with 5 years of experience.\nAcme Corp 2015-2020";
        assert_eq!(estimator().estimate(text), 5);
    }

    #[test]
    fn maximum_within_the_winning_pattern() {
        let text = "3+ years of experience in Go, 7 yrs experience in Python";
        assert_eq!(estimator().estimate(text), 7);
    }

    #[test]
    fn earlier_pattern_wins_even_with_smaller_value() {
        // "12 years" alone only matches the bare pattern, which is tried last.
        let text = "Experience: 4 years\nCompany founded 12 years ago";
        assert_eq!(estimator().estimate(text), 4);
    }

    #[test]
    fn bare_year_count() {
        assert_eq!(estimator().estimate("Worked 2 YEARS at Initech"), 2);
    }

    #[test]
    fn open_range_uses_reference_year() {
        assert_eq!(estimator().estimate("Acme 2018 - present"), 6);
        assert_eq!(estimator().estimate("Acme 2020 – Current"), 4);
    }

    #[test]
    fn ranges_are_summed_with_overlap() {
        let text = "Acme 2010-2015\nInitech 2014 - 2016\nUmbrella 01/2019 - 06/2021";
        // 5 + 2 + 2 years, the 2014-2015 overlap counted twice
        assert_eq!(estimator().estimate(text), 9);
    }

    #[test]
    fn non_positive_total_is_zero() {
        assert_eq!(estimator().estimate("2020-2015"), 0);
        assert_eq!(estimator().estimate("no dates at all"), 0);
    }

    #[test]
    fn overflowing_counts_are_ignored() {
        assert_eq!(estimator().from_phrases("99999999999 years"), None);
    }

    #[test]
    fn custom_patterns_need_a_capture_group() {
        let config = ParserConfig {
            experience_patterns: Some(vec![r"\d+ winters".into()]),
            ..ParserConfig::default()
        };
        assert!(matches!(
            ExperienceEstimator::new(&config),
            Err(ConfigError::MissingCapture { .. })
        ));

        let config = ParserConfig {
            experience_patterns: Some(vec![r"(\d+) winters".into()]),
            reference_year: Some(2024),
            ..ParserConfig::default()
        };
        let est = ExperienceEstimator::new(&config).unwrap();
        assert_eq!(est.estimate("survived 3 winters, 10 years total"), 3);
    }
}
