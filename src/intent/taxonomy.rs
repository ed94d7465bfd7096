//! The banking intent taxonomy.
//!
//! An [`IntentTaxonomy`] is an ordered list of intents, each with the
//! representative phrases that describe it. Order matters: when two intents
//! score the same similarity, the one listed first wins.

use std::collections::HashSet;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RexaError};

/// Intent that triggers amount, date and category filter extraction.
pub const FILTER_TRANSACTIONS: &str = "filter_transactions";

/// Intent that also triggers filter extraction.
pub const TRANSACTION_HISTORY: &str = "transaction_history";

/// Naturally phrased banking questions added to the vectorizer corpus so the
/// IDF weights reflect ordinary question wording and not only keywords.
pub const SUPPLEMENTARY_CORPUS: &[&str] = &[
    "how can I check my current account balance",
    "where is the closest CGBank ATM location to me",
    "what are the current interest rates for savings accounts",
    "how do I transfer money to another person's account",
    "I've lost my debit card what should I do now",
    "what documents are required to open a new bank account",
    "what is the process to apply for a home loan",
    "what government schemes are available for farmers",
    "how can I generate my monthly account statement",
    "what is the customer support phone number for CGBank",
    "can you help me understand my spending patterns",
    "what are the benefits of a senior citizen account",
    "how do I activate my new debit card",
    "what is the daily withdrawal limit at ATMs",
    "how can I improve my financial health",
    "how to enable netbanking",
    "what services are available in netbanking",
];

const BANKING_INTENTS: &[(&str, &[&str])] = &[
    (
        "balance_inquiry",
        &[
            "balance", "account balance", "how much money", "check balance", "current balance",
            "what do i have", "funds available", "available balance", "remaining balance",
            "account summary", "show me my money", "what's my balance",
            "how much is in my account", "account funds", "current funds",
        ],
    ),
    (
        "transaction_history",
        &[
            "transaction", "history", "statement", "recent transactions", "last transactions",
            "past payments", "my spending", "past expenses", "payment history",
            "transaction details", "transaction summary", "show my transactions",
            "where has my money gone", "past purchases", "account activity",
            "account statement", "bank statement",
        ],
    ),
    (
        "fund_transfer",
        &[
            "transfer", "send money", "transfer money", "transfer funds", "move money",
            "pay someone", "send to friend", "wire transfer", "remit", "send cash",
            "make a payment", "pay a contact", "send funds", "money transfer", "online payment",
        ],
    ),
    (
        "bill_payment",
        &[
            "pay bill", "bill payment", "utility bill", "electricity bill", "water bill",
            "gas bill", "phone bill", "internet bill", "credit card bill", "mobile recharge",
            "pay utilities", "clear my bills", "pay my dues", "settle bills",
        ],
    ),
    (
        "bank_info",
        &[
            "about cgbank", "bank information", "bank details", "what is cgbank",
            "bank services", "products offered", "bank features", "branch locations",
            "contact bank", "bank timings", "working hours", "bank address", "about the bank",
            "bank overview", "bank description",
        ],
    ),
    (
        "loan_info",
        &[
            "loan", "borrow", "credit", "home loan", "personal loan", "car loan",
            "education loan", "interest rates", "eligibility", "how to apply", "mortgage",
            "vehicle loan", "student loan", "business loan", "get a loan", "loan options",
            "loan products", "loan details",
        ],
    ),
    (
        "scheme_info",
        &[
            "government scheme", "scheme details", "scheme information", "subsidy",
            "farmer benefits", "women benefits", "agricultural scheme", "pm kisan",
            "mudra loan", "standup india", "pm svanidhi", "government benefit",
            "subsidy scheme", "welfare scheme", "financial aid",
        ],
    ),
    (
        "account_info",
        &[
            "account", "account type", "student account", "nri account", "senior account",
            "how to open new acc", "account types", "new account", "create account",
            "open account", "account opening", "how to create account", "bank account",
            "savings account", "current account", "account features", "account benefits",
        ],
    ),
    (
        "monthly_report",
        &[
            "monthly report", "monthly statement", "monthly summary", "monthly transactions",
            "monthly spending", "monthly analysis", "report for month", "statement for month",
            "account summary", "financial summary", "monthly overview", "spending report",
        ],
    ),
    (
        FILTER_TRANSACTIONS,
        &[
            "transactions above", "transactions below", "transactions between",
            "transactions greater than", "transactions less than", "transactions from",
            "transactions to", "transactions in", "show transactions", "find transactions",
            "search transactions", "filter my transactions", "specific transactions",
            "transactions by amount", "transactions by date", "transactions in range",
        ],
    ),
    (
        "atm_info",
        &[
            "atm", "atm location", "nearest atm", "atm near me", "atm card",
            "atm withdrawal limit", "atm charges", "atm limit", "atm pin", "cash machine",
            "where can i withdraw", "find atm", "atm locator", "cash withdrawal", "atm services",
        ],
    ),
    (
        "card_info",
        &[
            "debit card", "credit card", "card details", "card limit", "card activation",
            "card lost", "card stolen", "card block", "card replacement", "card upgrade",
            "new card", "card services", "card benefits", "card features", "card management",
        ],
    ),
    (
        "card_management",
        &[
            "activate card", "block card", "hotlist card", "report card", "card limit",
            "change pin", "card security", "card features", "card benefits", "card rewards",
        ],
    ),
    (
        "netbanking_info",
        &[
            "netbanking", "online banking", "internet banking", "digital banking",
            "banking app", "mobile banking", "netbanking features", "online services",
            "digital services", "enable netbanking",
        ],
    ),
    (
        "customer_support",
        &[
            "contact support", "customer service", "help desk", "support number", "complaint",
            "grievance", "issue", "problem", "help", "assistance", "talk to someone",
            "get help", "customer care", "support team", "report problem", "file complaint",
        ],
    ),
    (
        "interest_rates",
        &[
            "interest rate", "savings rate", "fd rate", "fixed deposit rate", "loan rate",
            "deposit rate", "current account rate", "rd rate", "account interest",
            "earning rate", "yield", "return on deposit", "bank rates", "financial rates",
        ],
    ),
    (
        "security_info",
        &[
            "security", "fraud", "scam", "phishing", "safe banking", "account security",
            "secure login", "two factor authentication", "2fa", "security tips",
            "protect account", "prevent fraud", "banking safety", "secure transactions",
        ],
    ),
    (
        "investment_info",
        &[
            "investment", "fd", "fixed deposit", "rd", "recurring deposit", "mutual fund",
            "insurance", "wealth management", "financial planning", "investment options",
            "grow money", "savings plan", "retirement plan", "financial future",
            "investment advice",
        ],
    ),
    (
        "financial_advice",
        &[
            "financial advice", "money tips", "saving tips", "budgeting help",
            "financial planning", "money management", "wealth building", "how to save",
            "financial guidance", "money advice", "financial wellness", "smart banking",
        ],
    ),
];

/// A single intent and its representative phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentEntry {
    /// Intent identifier, e.g. `balance_inquiry`.
    pub name: String,
    /// Phrases that describe the intent.
    pub phrases: Vec<String>,
}

impl IntentEntry {
    pub fn new<S: Into<String>>(name: S, phrases: Vec<String>) -> Self {
        Self {
            name: name.into(),
            phrases,
        }
    }

    /// All phrases joined by a single space.
    pub fn pseudo_document(&self) -> String {
        self.phrases.join(" ")
    }
}

/// Immutable ordered mapping from intent name to phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentTaxonomy {
    entries: Vec<IntentEntry>,
}

impl IntentTaxonomy {
    /// The built-in CGBank taxonomy.
    pub fn banking() -> Self {
        let entries = BANKING_INTENTS
            .iter()
            .map(|(name, phrases)| {
                IntentEntry::new(*name, phrases.iter().map(|p| p.to_string()).collect())
            })
            .collect();
        Self { entries }
    }

    /// Build a taxonomy from caller-supplied entries.
    ///
    /// Fails if there are no entries, a name is blank or repeated, or an intent
    /// has no non-blank phrase.
    pub fn from_entries(entries: Vec<IntentEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(RexaError::taxonomy("taxonomy must contain at least one intent"));
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(RexaError::taxonomy("intent name must not be empty"));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(RexaError::taxonomy(format!(
                    "duplicate intent name: {}",
                    entry.name
                )));
            }
            if entry.phrases.iter().all(|p| p.trim().is_empty()) {
                return Err(RexaError::taxonomy(format!(
                    "intent {} has no phrases",
                    entry.name
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Parse a JSON array of `{ "name": ..., "phrases": [...] }` objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<IntentEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Load a taxonomy from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let taxonomy = Self::from_json_str(&content)?;
        debug!(
            "Loaded {} intents from {}",
            taxonomy.len(),
            path.display()
        );
        Ok(taxonomy)
    }

    pub fn entries(&self) -> &[IntentEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &IntentEntry> {
        self.entries.iter()
    }

    /// Intent names in taxonomy order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn phrases(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.phrases.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Documents the vectorizer is fitted on: every phrase, every intent
    /// name, then the supplementary corpus.
    pub fn training_documents(&self) -> Vec<String> {
        let mut documents = Vec::new();
        for entry in &self.entries {
            documents.extend(entry.phrases.iter().cloned());
            documents.push(entry.name.clone());
        }
        documents.extend(SUPPLEMENTARY_CORPUS.iter().map(|s| s.to_string()));
        documents
    }
}

impl Default for IntentTaxonomy {
    fn default() -> Self {
        Self::banking()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banking_taxonomy_order() {
        let taxonomy = IntentTaxonomy::banking();
        let names: Vec<&str> = taxonomy.names().collect();

        assert_eq!(names.len(), 19);
        assert_eq!(names[0], "balance_inquiry");
        assert_eq!(names[9], FILTER_TRANSACTIONS);
        assert_eq!(names[18], "financial_advice");
        assert!(taxonomy.contains("netbanking_info"));
        assert!(!taxonomy.contains("greeting"));
    }

    #[test]
    fn test_banking_taxonomy_is_valid() {
        let taxonomy = IntentTaxonomy::banking();
        assert!(IntentTaxonomy::from_entries(taxonomy.entries().to_vec()).is_ok());
    }

    #[test]
    fn test_pseudo_document() {
        let entry = IntentEntry::new("atm", vec!["atm".into(), "cash machine".into()]);
        assert_eq!(entry.pseudo_document(), "atm cash machine");
    }

    #[test]
    fn test_training_documents() {
        let taxonomy = IntentTaxonomy::banking();
        let documents = taxonomy.training_documents();
        let phrase_count: usize = taxonomy.iter().map(|e| e.phrases.len()).sum();

        assert_eq!(
            documents.len(),
            phrase_count + taxonomy.len() + SUPPLEMENTARY_CORPUS.len()
        );
        assert_eq!(SUPPLEMENTARY_CORPUS.len(), 17);
        assert!(documents.contains(&"balance_inquiry".to_string()));
    }

    #[test]
    fn test_validation_errors() {
        assert!(IntentTaxonomy::from_entries(vec![]).is_err());
        assert!(
            IntentTaxonomy::from_entries(vec![IntentEntry::new(" ", vec!["x".into()])]).is_err()
        );
        assert!(
            IntentTaxonomy::from_entries(vec![
                IntentEntry::new("a", vec!["x".into()]),
                IntentEntry::new("a", vec!["y".into()]),
            ])
            .is_err()
        );
        assert!(IntentTaxonomy::from_entries(vec![IntentEntry::new("a", vec![" ".into()])]).is_err());
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {"name": "atm_info", "phrases": ["atm", "nearest atm"]},
            {"name": "loan_info", "phrases": ["loan"]}
        ]"#;
        let taxonomy = IntentTaxonomy::from_json_str(json).unwrap();

        assert_eq!(taxonomy.len(), 2);
        assert_eq!(taxonomy.phrases("atm_info").unwrap().len(), 2);
        assert!(taxonomy.phrases("missing").is_none());

        assert!(IntentTaxonomy::from_json_str("{not json").is_err());
    }
}
