//! Per-utterance entity collection.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entity::amount::money_value;
use crate::entity::recognizer::{EntityLabel, EntityRecognizer, EntitySpan};
use crate::error::Result;

static ACCOUNT_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(student|nri|senior|savings|current|business)\s?account\b")
        .expect("account pattern is valid")
});

static LOAN_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(home|personal|car|auto|education|student|business)\s?loan\b")
        .expect("loan pattern is valid")
});

static SCHEME_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(pm\s+kisan|pm\s+svanidhi|standup\s+india|mudra)\b")
        .expect("scheme pattern is valid")
});

static CARD_NETWORK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(visa|mastercard|master\s+card|rupay)\b").expect("network pattern is valid")
});

static CARD_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(debit|credit)\s?card\b").expect("card pattern is valid")
});

/// Entities found in one utterance. Every list is present, possibly empty,
/// and may hold duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityBag {
    pub amounts: Vec<f64>,
    pub dates: Vec<String>,
    pub account_types: Vec<String>,
    pub loan_types: Vec<String>,
    pub scheme_names: Vec<String>,
    pub card_types: Vec<String>,
    pub locations: Vec<String>,
    pub time_periods: Vec<String>,
}

impl EntityBag {
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
            && self.dates.is_empty()
            && self.account_types.is_empty()
            && self.loan_types.is_empty()
            && self.scheme_names.is_empty()
            && self.card_types.is_empty()
            && self.locations.is_empty()
            && self.time_periods.is_empty()
    }

    /// Total number of entities across all lists.
    pub fn len(&self) -> usize {
        self.amounts.len()
            + self.dates.len()
            + self.account_types.len()
            + self.loan_types.len()
            + self.scheme_names.len()
            + self.card_types.len()
            + self.locations.len()
            + self.time_periods.len()
    }

    /// Build a bag from recognizer spans, then run the banking patterns.
    pub fn from_spans(utterance: &str, spans: &[EntitySpan]) -> Self {
        let mut bag = EntityBag::default();
        let message = utterance.to_lowercase();

        for span in spans {
            match span.label {
                EntityLabel::Money => {
                    if let Some(value) = money_value(&span.text) {
                        bag.amounts.push(value);
                    }
                }
                EntityLabel::Date => bag.dates.push(span.text.clone()),
                EntityLabel::Organization | EntityLabel::Product => {
                    if message.contains("account") {
                        bag.account_types.push(span.text.clone());
                    } else if message.contains("loan") {
                        bag.loan_types.push(span.text.clone());
                    } else if message.contains("scheme") || message.contains("program") {
                        bag.scheme_names.push(span.text.clone());
                    } else if message.contains("card") {
                        bag.card_types.push(span.text.clone());
                    }
                }
                EntityLabel::Location => bag.locations.push(span.text.clone()),
                EntityLabel::Time => bag.time_periods.push(span.text.clone()),
            }
        }

        bag.apply_patterns(&message);
        bag
    }

    fn apply_patterns(&mut self, message: &str) {
        for captures in ACCOUNT_TYPE.captures_iter(message) {
            self.account_types.push(format!("{} account", &captures[1]));
        }
        for captures in LOAN_TYPE.captures_iter(message) {
            self.loan_types.push(format!("{} loan", &captures[1]));
        }
        for captures in SCHEME_NAME.captures_iter(message) {
            let name = captures[1].split_whitespace().collect::<Vec<_>>().join(" ");
            self.scheme_names.push(name);
        }
        for captures in CARD_NETWORK.captures_iter(message) {
            let network = match &captures[1] {
                "visa" => "visa",
                "rupay" => "rupay",
                _ => "mastercard",
            };
            self.card_types.push(network.to_string());
        }
        for captures in CARD_TYPE.captures_iter(message) {
            self.card_types.push(format!("{} card", &captures[1]));
        }
    }
}

/// Recognize spans in the utterance and collect them into a bag.
///
/// Blank input yields an empty bag without running the recognizer.
pub fn extract_entities(recognizer: &dyn EntityRecognizer, utterance: &str) -> Result<EntityBag> {
    if utterance.trim().is_empty() {
        return Ok(EntityBag::default());
    }
    let spans = recognizer.recognize(utterance)?;
    Ok(EntityBag::from_spans(utterance, &spans))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::recognizer::RuleBasedRecognizer;

    fn extract(utterance: &str) -> EntityBag {
        let recognizer = RuleBasedRecognizer::new().unwrap();
        extract_entities(&recognizer, utterance).unwrap()
    }

    #[test]
    fn test_empty_input() {
        let bag = extract("   ");
        assert!(bag.is_empty());
        assert_eq!(bag.len(), 0);
    }

    #[test]
    fn test_amounts_and_dates() {
        let bag = extract("I paid ₹2,500 on 01/05/2024 and 3 lakh last month");

        assert_eq!(bag.amounts, vec![2500.0, 300_000.0]);
        assert_eq!(bag.dates, vec!["01/05/2024", "last month"]);
    }

    #[test]
    fn test_account_and_loan_patterns() {
        let bag = extract("compare a savings account with a homeloan");

        assert_eq!(bag.account_types, vec!["savings account"]);
        assert_eq!(bag.loan_types, vec!["home loan"]);
    }

    #[test]
    fn test_schemes() {
        let bag = extract("tell me about pm kisan and mudra");
        assert_eq!(bag.scheme_names, vec!["pm kisan", "mudra"]);
    }

    #[test]
    fn test_cards_keep_duplicates() {
        let bag = extract("is my Visa debit card accepted");

        // The product span is routed by the word "card", then the patterns
        // add the canonical network and the card type.
        assert_eq!(bag.card_types, vec!["Visa", "visa", "debit card"]);
    }

    #[test]
    fn test_master_card_is_canonical() {
        let bag = extract("apply for a master card credit card");
        assert!(bag.card_types.contains(&"mastercard".to_string()));
        assert!(bag.card_types.contains(&"credit card".to_string()));
    }

    #[test]
    fn test_organization_routing() {
        let bag = extract("open an account with CGBank");
        assert_eq!(bag.account_types, vec!["CGBank"]);

        let bag = extract("does RBI regulate the loan rate");
        assert_eq!(bag.loan_types, vec!["RBI"]);
    }

    #[test]
    fn test_locations_and_times() {
        let bag = extract("atm near Gandhipuram open at 9 pm");

        assert_eq!(bag.locations, vec!["Gandhipuram"]);
        assert_eq!(bag.time_periods, vec!["9 pm"]);
    }
}
