//! Filtering transactions by amount, date and category.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entity::amount::AmountFilters;
use crate::entity::date::DateFilters;
use crate::transaction::types::{Category, Transaction};

/// Category words matched at the start of a word in an utterance.
static CATEGORY_PATTERNS: LazyLock<Vec<(Regex, Category)>> = LazyLock::new(|| {
    Category::ALL
        .into_iter()
        .filter(|c| *c != Category::Other)
        .map(|category| {
            let mut words: Vec<String> = vec![regex::escape(&category.as_str().to_lowercase())];
            words.extend(category.keywords().iter().map(|k| regex::escape(k)));
            let pattern = format!(r"(?i)\b(?:{})", words.join("|"));
            (
                Regex::new(&pattern).expect("category pattern is valid"),
                category,
            )
        })
        .collect()
});

/// Combined search criteria. Every present field must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl TransactionFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(amount: AmountFilters, date: DateFilters, category: Option<Category>) -> Self {
        Self {
            min_amount: amount.min_amount,
            max_amount: amount.max_amount,
            start_date: date.start_date,
            end_date: date.end_date,
            category: category.map(|c| c.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_amount.is_none()
            && self.max_amount.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.category.is_none()
    }

    /// Whether one transaction satisfies every present criterion.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let magnitude = transaction.amount.abs();

        self.min_amount.is_none_or(|min| magnitude >= min)
            && self.max_amount.is_none_or(|max| magnitude <= max)
            && self.start_date.is_none_or(|start| transaction.date >= start)
            && self.end_date.is_none_or(|end| transaction.date <= end)
            && self.category.as_deref().is_none_or(|wanted| {
                transaction
                    .category
                    .as_deref()
                    .unwrap_or("")
                    .eq_ignore_ascii_case(wanted)
            })
    }
}

/// Keep the transactions matching `filters`, in their original order.
///
/// ```
/// use chrono::NaiveDate;
/// use rexa::transaction::{Transaction, TransactionFilters, filter_transactions};
///
/// let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let transactions = vec![
///     Transaction::new(day, "Rent", -1500.0).unwrap(),
///     Transaction::new(day, "Refund", 500.0).unwrap(),
/// ];
/// let filters = TransactionFilters { min_amount: Some(1000.0), ..Default::default() };
///
/// let kept = filter_transactions(&transactions, &filters);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].description, "Rent");
/// ```
pub fn filter_transactions(
    transactions: &[Transaction],
    filters: &TransactionFilters,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| filters.matches(t))
        .cloned()
        .collect()
}

/// The first category named in the utterance, by category name or keyword.
pub fn extract_category_filter(utterance: &str) -> Option<Category> {
    CATEGORY_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(utterance))
        .map(|(_, category)| *category)
}
