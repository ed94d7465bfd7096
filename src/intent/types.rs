//! Result types produced by intent classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The outcome of classifying an utterance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResolvedIntent {
    /// The utterance greets the assistant.
    Greeting,
    /// The utterance thanks the assistant.
    Thanks,
    /// A taxonomy intent.
    Intent(String),
    /// Nothing matched confidently.
    None,
}

impl ResolvedIntent {
    /// Wire name: `greeting`, `thanks`, the intent name, or `none`.
    pub fn as_str(&self) -> &str {
        match self {
            ResolvedIntent::Greeting => "greeting",
            ResolvedIntent::Thanks => "thanks",
            ResolvedIntent::Intent(name) => name,
            ResolvedIntent::None => "none",
        }
    }

    /// The taxonomy intent name, if this is a taxonomy intent.
    pub fn intent_name(&self) -> Option<&str> {
        match self {
            ResolvedIntent::Intent(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ResolvedIntent::None)
    }
}

impl fmt::Display for ResolvedIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ResolvedIntent {
    fn from(value: String) -> Self {
        match value.as_str() {
            "greeting" => ResolvedIntent::Greeting,
            "thanks" => ResolvedIntent::Thanks,
            "none" | "" => ResolvedIntent::None,
            _ => ResolvedIntent::Intent(value),
        }
    }
}

impl From<ResolvedIntent> for String {
    fn from(value: ResolvedIntent) -> Self {
        match value {
            ResolvedIntent::Intent(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

/// Intent plus confidence in `[0, 1]`.
///
/// A `None` intent still carries the best similarity seen, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub intent: ResolvedIntent,
    pub confidence: f64,
}

impl ClassificationResult {
    pub fn new(intent: ResolvedIntent, confidence: f64) -> Self {
        Self { intent, confidence }
    }

    pub fn greeting() -> Self {
        Self::new(ResolvedIntent::Greeting, 1.0)
    }

    pub fn thanks() -> Self {
        Self::new(ResolvedIntent::Thanks, 1.0)
    }

    pub fn none(confidence: f64) -> Self {
        Self::new(ResolvedIntent::None, confidence)
    }
}

/// Similarity of an utterance to one intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentScore {
    pub intent: String,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_intent_names() {
        assert_eq!(ResolvedIntent::Greeting.as_str(), "greeting");
        assert_eq!(ResolvedIntent::Thanks.to_string(), "thanks");
        assert_eq!(ResolvedIntent::None.as_str(), "none");

        let atm = ResolvedIntent::Intent("atm_info".to_string());
        assert_eq!(atm.as_str(), "atm_info");
        assert_eq!(atm.intent_name(), Some("atm_info"));
        assert_eq!(ResolvedIntent::Greeting.intent_name(), None);
    }

    #[test]
    fn test_resolved_intent_serde() {
        let result = ClassificationResult::new(ResolvedIntent::Intent("loan_info".into()), 0.5);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"intent":"loan_info","confidence":0.5}"#);

        let parsed: ClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);

        let none: ResolvedIntent = serde_json::from_str(r#""none""#).unwrap();
        assert!(none.is_none());
    }
}
