//! Named-entity recognition over banking utterances.
//!
//! [`RuleBasedRecognizer`] labels spans with regular expressions and small
//! gazetteers. Spans never overlap: a span that intersects an earlier one is
//! dropped, and the label passes run in a fixed priority order (dates, times,
//! money, locations, products, organizations, capitalized names).

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, LazyLock};

use log::trace;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, SimpleAnalyzer};
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::error::Result;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b\d{1,2}[/-]\d{1,2}[/-]\d{4}\b".to_string(),
        r"(?i)\b\d{4}[/-]\d{1,2}[/-]\d{1,2}\b".to_string(),
        format!(r"(?i)\b\d{{1,2}}\s+{MONTH}\.?\s+\d{{4}}\b"),
        format!(r"(?i)\b{MONTH}\.?\s+\d{{1,2}},\s*\d{{4}}\b"),
        r"(?i)\b\d+\s+(?:days?|weeks?|months?|years?)\s+ago\b".to_string(),
        r"(?i)\b(?:today|yesterday|(?:last|past|this)\s+(?:week|month|year))\b".to_string(),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("date pattern is valid"))
    .collect()
});

static TIME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b\d{1,2}:\d{2}(?:\s*[ap]\.?m\b\.?)?",
        r"(?i)\b\d{1,2}\s*[ap]\.?m\b\.?",
        r"(?i)\b(?:morning|afternoon|evening|tonight|noon|midnight)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("time pattern is valid"))
    .collect()
});

static MONEY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:₹|\$|\b(?:rs\.?|inr))\s*\d[\d,]*(?:\.\d+)?(?:\s*(?:lakhs?|crores?|k)\b)?",
        r"(?i)\b\d[\d,]*(?:\.\d+)?\s*(?:rupees?|rs\b|inr\b|lakhs?\b|crores?\b|k\b)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("money pattern is valid"))
    .collect()
});

const CALENDAR_WORDS: &[&str] = &[
    "jan", "january", "feb", "february", "mar", "march", "apr", "april", "may", "jun", "june",
    "jul", "july", "aug", "august", "sep", "sept", "september", "oct", "october", "nov",
    "november", "dec", "december", "monday", "tuesday", "wednesday", "thursday", "friday",
    "saturday", "sunday",
];

const DEFAULT_LOCATIONS: &[&str] = &[
    "Mumbai", "Navi Mumbai", "Delhi", "New Delhi", "Bangalore", "Bengaluru", "Chennai",
    "Hyderabad", "Kolkata", "Pune", "Ahmedabad", "Jaipur", "Lucknow", "Coimbatore", "Madurai",
    "Kochi", "Chandigarh", "Nagpur", "Indore", "Bhopal", "Surat", "Patna", "Guwahati", "Mysore",
    "Noida", "Gurgaon", "Avinashi Road", "RS Puram", "Gandhipuram", "Peelamedu",
];

const DEFAULT_ORGANIZATIONS: &[&str] = &[
    "CGBank", "RBI", "Reserve Bank of India", "NPCI", "SBI", "HDFC", "ICICI", "Axis Bank",
    "Kotak", "SEBI",
];

const DEFAULT_PRODUCTS: &[&str] = &[
    "Visa", "Mastercard", "Master Card", "RuPay", "Platinum", "Titanium", "Signature",
    "Classic", "Infinite",
];

/// Entity categories the recognizer can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLabel {
    Money,
    Date,
    Time,
    Location,
    Organization,
    Product,
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityLabel::Money => "MONEY",
            EntityLabel::Date => "DATE",
            EntityLabel::Time => "TIME",
            EntityLabel::Location => "LOCATION",
            EntityLabel::Organization => "ORG",
            EntityLabel::Product => "PRODUCT",
        };
        f.write_str(name)
    }
}

/// A labelled span of the utterance. Offsets are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

impl EntitySpan {
    fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }
}

/// Trait for named-entity recognizers.
pub trait EntityRecognizer: Send + Sync {
    /// Labelled spans in the order they appear in the text.
    fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>>;

    /// Get the name of this recognizer.
    fn name(&self) -> &'static str;
}

/// Word lists for the gazetteer-driven labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gazetteers {
    pub locations: Vec<String>,
    pub organizations: Vec<String>,
    pub products: Vec<String>,
}

impl Default for Gazetteers {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            locations: owned(DEFAULT_LOCATIONS),
            organizations: owned(DEFAULT_ORGANIZATIONS),
            products: owned(DEFAULT_PRODUCTS),
        }
    }
}

/// Compile a case-insensitive whole-phrase alternation, longest entry first.
fn gazetteer_pattern(words: &[String]) -> Result<Option<Regex>> {
    let mut words: Vec<&str> = words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return Ok(None);
    }
    words.sort_by_key(|w| std::cmp::Reverse(w.len()));

    let alternation = words
        .iter()
        .map(|w| regex::escape(w).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Ok(Some(Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))?))
}

/// Regex and gazetteer entity recognizer.
#[derive(Clone)]
pub struct RuleBasedRecognizer {
    analyzer: Arc<dyn Analyzer>,
    stop_words: StopFilter,
    locations: Option<Regex>,
    organizations: Option<Regex>,
    products: Option<Regex>,
    location_words: HashSet<String>,
}

impl RuleBasedRecognizer {
    /// Create a recognizer with the built-in gazetteers.
    pub fn new() -> Result<Self> {
        Self::with_gazetteers(Gazetteers::default())
    }

    /// Create a recognizer with custom gazetteers.
    pub fn with_gazetteers(gazetteers: Gazetteers) -> Result<Self> {
        let location_words = gazetteers
            .locations
            .iter()
            .flat_map(|l| l.split_whitespace())
            .map(|w| w.to_lowercase())
            .collect();

        Ok(Self {
            analyzer: Arc::new(SimpleAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))),
            stop_words: StopFilter::new(),
            locations: gazetteer_pattern(&gazetteers.locations)?,
            organizations: gazetteer_pattern(&gazetteers.organizations)?,
            products: gazetteer_pattern(&gazetteers.products)?,
            location_words,
        })
    }

    fn push_matches(spans: &mut Vec<EntitySpan>, pattern: &Regex, text: &str, label: EntityLabel) {
        for m in pattern.find_iter(text) {
            if spans.iter().any(|s| s.overlaps(m.start(), m.end())) {
                continue;
            }
            spans.push(EntitySpan {
                text: m.as_str().to_string(),
                label,
                start: m.start(),
                end: m.end(),
            });
        }
    }

    fn is_sentence_start(text: &str, offset: usize) -> bool {
        let before = text[..offset].trim_end();
        before.is_empty() || before.ends_with(|c: char| matches!(c, '.' | '!' | '?'))
    }

    /// Runs of capitalized words that no other pass claimed.
    fn capitalized_runs(&self, text: &str, spans: &[EntitySpan]) -> Result<Vec<EntitySpan>> {
        let mut runs = Vec::new();
        let mut current: Option<(usize, usize)> = None;

        for token in self.analyzer.analyze(text)? {
            let lower = token.text.to_lowercase();
            let candidate = token.text.chars().next().is_some_and(char::is_uppercase)
                && !Self::is_sentence_start(text, token.start_offset)
                && !self.stop_words.is_stop_word(&lower)
                && !CALENDAR_WORDS.contains(&lower.as_str())
                && !self.location_words.contains(&lower)
                && !spans
                    .iter()
                    .any(|s| s.overlaps(token.start_offset, token.end_offset));

            current = match (current, candidate) {
                (Some((start, end)), true)
                    if text[end..token.start_offset].chars().all(char::is_whitespace) =>
                {
                    Some((start, token.end_offset))
                }
                (previous, true) => {
                    runs.extend(previous);
                    Some((token.start_offset, token.end_offset))
                }
                (previous, false) => {
                    runs.extend(previous);
                    None
                }
            };
        }
        runs.extend(current);

        Ok(runs
            .into_iter()
            .map(|(start, end)| EntitySpan {
                text: text[start..end].to_string(),
                label: EntityLabel::Organization,
                start,
                end,
            })
            .collect())
    }
}

impl EntityRecognizer for RuleBasedRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>> {
        let mut spans = Vec::new();

        for pattern in DATE_PATTERNS.iter() {
            Self::push_matches(&mut spans, pattern, text, EntityLabel::Date);
        }
        for pattern in TIME_PATTERNS.iter() {
            Self::push_matches(&mut spans, pattern, text, EntityLabel::Time);
        }
        for pattern in MONEY_PATTERNS.iter() {
            Self::push_matches(&mut spans, pattern, text, EntityLabel::Money);
        }
        let gazetteers = [
            (&self.locations, EntityLabel::Location),
            (&self.products, EntityLabel::Product),
            (&self.organizations, EntityLabel::Organization),
        ];
        for (pattern, label) in gazetteers {
            if let Some(pattern) = pattern {
                Self::push_matches(&mut spans, pattern, text, label);
            }
        }

        let runs = self.capitalized_runs(text, &spans)?;
        spans.extend(runs);
        spans.sort_by_key(|s| s.start);

        trace!("Recognized {} entities in {:?}", spans.len(), text);
        Ok(spans)
    }

    fn name(&self) -> &'static str {
        "rule_based"
    }
}

impl fmt::Debug for RuleBasedRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleBasedRecognizer")
            .field("analyzer", &self.analyzer.name())
            .field("locations", &self.locations.as_ref().map(|r| r.as_str().len()))
            .field("organizations", &self.organizations.as_ref().map(|r| r.as_str().len()))
            .field("products", &self.products.as_ref().map(|r| r.as_str().len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(text: &str) -> Vec<(EntityLabel, String)> {
        RuleBasedRecognizer::new()
            .unwrap()
            .recognize(text)
            .unwrap()
            .into_iter()
            .map(|s| (s.label, s.text))
            .collect()
    }

    #[test]
    fn test_money_spans() {
        assert_eq!(
            labels("send ₹1,500 and rs. 200 and 5 lakh"),
            vec![
                (EntityLabel::Money, "₹1,500".to_string()),
                (EntityLabel::Money, "rs. 200".to_string()),
                (EntityLabel::Money, "5 lakh".to_string()),
            ]
        );
        assert_eq!(
            labels("loan of INR 2 crore"),
            vec![(EntityLabel::Money, "INR 2 crore".to_string())]
        );
    }

    #[test]
    fn test_date_spans() {
        let spans = labels("from 01/04/2024 to 2024-04-30, also 5 March 2024 and 3 days ago");
        let dates: Vec<&str> = spans
            .iter()
            .filter(|(l, _)| *l == EntityLabel::Date)
            .map(|(_, t)| t.as_str())
            .collect();

        assert_eq!(dates, vec!["01/04/2024", "2024-04-30", "5 March 2024", "3 days ago"]);
    }

    #[test]
    fn test_relative_date_and_time() {
        assert_eq!(
            labels("transactions last month at 10:30 am"),
            vec![
                (EntityLabel::Date, "last month".to_string()),
                (EntityLabel::Time, "10:30 am".to_string()),
            ]
        );
        assert_eq!(labels("call me this evening")[0].0, EntityLabel::Time);
    }

    #[test]
    fn test_gazetteers() {
        assert_eq!(
            labels("nearest atm in rs puram, Coimbatore"),
            vec![
                (EntityLabel::Location, "rs puram".to_string()),
                (EntityLabel::Location, "Coimbatore".to_string()),
            ]
        );
        assert_eq!(
            labels("is my Visa card issued by CGBank"),
            vec![
                (EntityLabel::Product, "Visa".to_string()),
                (EntityLabel::Organization, "CGBank".to_string()),
            ]
        );
    }

    #[test]
    fn test_capitalized_runs() {
        assert_eq!(
            labels("I want a loan from Bajaj Finserv in March"),
            vec![(EntityLabel::Organization, "Bajaj Finserv".to_string())]
        );
        // Sentence-initial words and stop words are not names.
        assert!(labels("Show My balance").is_empty());
    }

    #[test]
    fn test_custom_gazetteers() {
        let recognizer = RuleBasedRecognizer::with_gazetteers(Gazetteers {
            locations: vec!["Salem".into()],
            organizations: vec![],
            products: vec![],
        })
        .unwrap();

        let spans = recognizer.recognize("branch in salem").unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, EntityLabel::Location);
        assert_eq!(spans[0].start, 10);
        assert_eq!(recognizer.name(), "rule_based");
    }

    #[test]
    fn test_label_display() {
        assert_eq!(EntityLabel::Organization.to_string(), "ORG");
        assert_eq!(EntityLabel::Money.to_string(), "MONEY");
    }
}
