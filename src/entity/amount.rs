//! Amount parsing and amount-range filters.

use std::sync::LazyLock;

use log::trace;
use regex::Regex;
use serde::{Deserialize, Serialize};

const CURRENCY: &str = r"(?:₹|rs\.?|inr)?";
const NUMBER: &str = r"([\d,]+\.?\d*)";
const MAGNITUDE: &str = r"(?:\s*(lakhs?|crores?|k)\b)?";

static NUMBER_IN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("number pattern is valid"));

static GREATER_THAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:greater than|more than|above|over|higher than)\s*{CURRENCY}\s*{NUMBER}{MAGNITUDE}"
    ))
    .expect("greater-than pattern is valid")
});

static LESS_THAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:less than|below|under|lower than)\s*{CURRENCY}\s*{NUMBER}{MAGNITUDE}"
    ))
    .expect("less-than pattern is valid")
});

static BETWEEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\bbetween\s*{CURRENCY}\s*{NUMBER}{MAGNITUDE}\s*(?:and|to)\s*{CURRENCY}\s*{NUMBER}{MAGNITUDE}"
    ))
    .expect("between pattern is valid")
});

static EXACTLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:exactly|precisely|amount of)\s*{CURRENCY}\s*{NUMBER}{MAGNITUDE}"
    ))
    .expect("exact-amount pattern is valid")
});

/// Inclusive bounds on the absolute value of a transaction amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AmountFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
}

impl AmountFilters {
    pub fn is_empty(&self) -> bool {
        self.min_amount.is_none() && self.max_amount.is_none()
    }
}

/// Parse a comma-grouped decimal number such as `1,500.50`.
///
/// Returns `None` for anything that does not yield a finite number.
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            trace!("Skipping unparseable amount {text:?}");
            None
        }
    }
}

/// Value of a money expression such as `₹1,500`, `5 lakh` or `2k`.
pub fn money_value(text: &str) -> Option<f64> {
    let number = NUMBER_IN_TEXT.find(text)?;
    let value = parse_amount(number.as_str())?;

    let rest = text[number.end()..].trim_start().to_lowercase();
    Some(value * magnitude(&rest))
}

/// Multiplier for the word following a number: lakh, crore or k.
fn magnitude(rest: &str) -> f64 {
    if rest.starts_with("lakh") {
        100_000.0
    } else if rest.starts_with("crore") {
        10_000_000.0
    } else if rest == "k" {
        1_000.0
    } else {
        1.0
    }
}

/// Number in `group`, scaled by the magnitude word captured right after it.
fn captured_amount(captures: &regex::Captures<'_>, group: usize) -> Option<f64> {
    let value = parse_amount(captures.get(group)?.as_str())?;
    let multiplier = captures
        .get(group + 1)
        .map_or(1.0, |m| magnitude(&m.as_str().to_lowercase()));
    Some(value * multiplier)
}

/// Extract amount bounds from an utterance.
///
/// Patterns are applied in order (greater than, less than, between, exactly)
/// and a later match overwrites a bound set by an earlier one. Only the first
/// occurrence of each pattern is used. Magnitude words scale the number the
/// same way [`money_value`] does, so "under 5 lakh" caps at 500000.
///
/// ```
/// use rexa::entity::extract_amount_filters;
///
/// let filters = extract_amount_filters("transactions above ₹1,000 and below ₹5,000");
/// assert_eq!(filters.min_amount, Some(1000.0));
/// assert_eq!(filters.max_amount, Some(5000.0));
/// ```
pub fn extract_amount_filters(utterance: &str) -> AmountFilters {
    let mut filters = AmountFilters::default();

    if let Some(amount) = GREATER_THAN
        .captures(utterance)
        .and_then(|c| captured_amount(&c, 1))
    {
        filters.min_amount = Some(amount);
    }

    if let Some(amount) = LESS_THAN
        .captures(utterance)
        .and_then(|c| captured_amount(&c, 1))
    {
        filters.max_amount = Some(amount);
    }

    if let Some((low, high)) = BETWEEN.captures(utterance).and_then(|c| {
        Some((captured_amount(&c, 1)?, captured_amount(&c, 3)?))
    }) {
        filters.min_amount = Some(low);
        filters.max_amount = Some(high);
    }

    if let Some(amount) = EXACTLY
        .captures(utterance)
        .and_then(|c| captured_amount(&c, 1))
    {
        filters.min_amount = Some(amount - 1.0);
        filters.max_amount = Some(amount + 1.0);
    }

    filters
}
