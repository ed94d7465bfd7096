//! Entity extraction: labelled spans, the per-utterance entity bag, and the
//! amount and date filters used to search transactions.

pub mod amount;
pub mod bag;
pub mod date;
pub mod recognizer;

pub use amount::{AmountFilters, extract_amount_filters, money_value, parse_amount};
pub use bag::{EntityBag, extract_entities};
pub use date::{
    DateFilters, ParsedDate, extract_date_filters, extract_date_filters_at, parse_date_expression,
};
pub use recognizer::{EntityLabel, EntityRecognizer, EntitySpan, Gazetteers, RuleBasedRecognizer};
