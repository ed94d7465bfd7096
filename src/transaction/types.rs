//! Transaction records and spending categories.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, RexaError};

/// Spending category of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Salary,
    Transfer,
    Utilities,
    FoodAndDining,
    Entertainment,
    Healthcare,
    Education,
    Travel,
    Shopping,
    Other,
}

impl Category {
    /// Every category, in description-matching order.
    pub const ALL: [Category; 10] = [
        Category::Salary,
        Category::Transfer,
        Category::Utilities,
        Category::FoodAndDining,
        Category::Entertainment,
        Category::Healthcare,
        Category::Education,
        Category::Travel,
        Category::Shopping,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Salary => "Salary",
            Category::Transfer => "Transfer",
            Category::Utilities => "Utilities",
            Category::FoodAndDining => "Food & Dining",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }

    /// Description fragments that select this category.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Salary => &["salary"],
            Category::Transfer => &["transfer", "send", "received"],
            Category::Utilities => &["electric", "water", "gas", "bill"],
            Category::FoodAndDining => &["food", "restaurant", "coffee", "dining"],
            Category::Entertainment => &["movie", "concert", "game", "entertain"],
            Category::Healthcare => &["medical", "hospital", "pharmacy"],
            Category::Education => &["school", "college", "tuition", "education"],
            Category::Travel => &["flight", "hotel", "travel", "vacation"],
            Category::Shopping => &["amazon", "flipkart", "shopping", "store"],
            Category::Other => &[],
        }
    }

    /// Categorize a transaction description: the first category with a
    /// keyword contained in the lowercased description, else `Other`.
    pub fn from_description(description: &str) -> Category {
        let description = description.to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.keywords().iter().any(|k| description.contains(k)))
            .unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = RexaError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RexaError::invalid_record(format!("unknown category: {s}")))
    }
}

/// A single ledger entry. Debits carry a negative amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(
        serialize_with = "serialize_date",
        deserialize_with = "deserialize_date"
    )]
    pub date: NaiveDateTime,
    pub description: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Transaction {
    /// Create a validated transaction.
    pub fn new<S: Into<String>>(date: NaiveDateTime, description: S, amount: f64) -> Result<Self> {
        let transaction = Transaction {
            date,
            description: description.into(),
            amount,
            balance: None,
            category: None,
        };
        transaction.validate()?;
        Ok(transaction)
    }

    pub fn with_balance(mut self, balance: f64) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Check the record invariants: finite amounts and a description.
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(RexaError::invalid_record("transaction description is empty"));
        }
        if !self.amount.is_finite() {
            return Err(RexaError::invalid_record(format!(
                "transaction amount is not finite: {}",
                self.amount
            )));
        }
        if self.balance.is_some_and(|b| !b.is_finite()) {
            return Err(RexaError::invalid_record("transaction balance is not finite"));
        }
        Ok(())
    }

    /// Fill in a missing category from the description.
    pub fn categorized(mut self) -> Self {
        if self.category.is_none() {
            self.category = Some(Category::from_description(&self.description).to_string());
        }
        self
    }

    pub fn is_debit(&self) -> bool {
        self.amount < 0.0
    }
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a record date: an ISO date-time, or a bare `YYYY-MM-DD` at midnight.
pub fn parse_record_date(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    for format in DATE_TIME_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(date);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|e| RexaError::invalid_record(format!("invalid transaction date {text:?}: {e}")))
}

fn serialize_date<S: Serializer>(
    date: &NaiveDateTime,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.format("%Y-%m-%dT%H:%M:%S").to_string())
}

fn deserialize_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<NaiveDateTime, D::Error> {
    let text = String::deserialize(deserializer)?;
    parse_record_date(&text).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_time(NaiveTime::MIN)
    }

    #[test]
    fn test_categorize_description() {
        assert_eq!(Category::from_description("Monthly SALARY credit"), Category::Salary);
        assert_eq!(Category::from_description("Money received from Ravi"), Category::Transfer);
        assert_eq!(Category::from_description("Electricity Bill"), Category::Utilities);
        assert_eq!(Category::from_description("Coffee Day"), Category::FoodAndDining);
        assert_eq!(Category::from_description("Apollo Pharmacy"), Category::Healthcare);
        assert_eq!(Category::from_description("Amazon order"), Category::Shopping);
        assert_eq!(Category::from_description("ATM withdrawal"), Category::Other);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(Category::FoodAndDining.to_string(), "Food & Dining");
        assert_eq!("food & dining".parse::<Category>().unwrap(), Category::FoodAndDining);
        assert!("groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_transaction_validation() {
        assert!(Transaction::new(date(2024, 1, 1), "Coffee", -120.0).is_ok());
        assert!(Transaction::new(date(2024, 1, 1), "  ", -120.0).is_err());
        assert!(Transaction::new(date(2024, 1, 1), "Coffee", f64::NAN).is_err());
        assert!(
            Transaction::new(date(2024, 1, 1), "Coffee", 1.0)
                .unwrap()
                .with_balance(f64::INFINITY)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_categorized_keeps_existing() {
        let txn = Transaction::new(date(2024, 1, 1), "Netflix", -499.0)
            .unwrap()
            .with_category("Entertainment")
            .categorized();
        assert_eq!(txn.category.as_deref(), Some("Entertainment"));

        let txn = Transaction::new(date(2024, 1, 1), "Hotel booking", -4200.0)
            .unwrap()
            .categorized();
        assert_eq!(txn.category.as_deref(), Some("Travel"));
        assert!(txn.is_debit());
    }

    #[test]
    fn test_record_dates() {
        assert_eq!(parse_record_date("2024-03-05").unwrap(), date(2024, 3, 5));
        assert_eq!(
            parse_record_date("2024-03-05T10:15:00").unwrap(),
            date(2024, 3, 5) + chrono::Duration::minutes(615)
        );
        assert!(parse_record_date("05/03/2024").is_err());
    }

    #[test]
    fn test_transaction_json() {
        let json = r#"{"date": "2024-03-05", "description": "Salary", "amount": 50000}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(txn.date, date(2024, 3, 5));
        assert_eq!(txn.amount, 50000.0);
        assert!(txn.category.is_none());

        let out = serde_json::to_string(&txn).unwrap();
        assert!(out.contains(r#""date":"2024-03-05T00:00:00""#));
        assert!(!out.contains("balance"));
    }
}
