//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, RexaArgs};
use crate::error::Result;
use crate::transaction::{Transaction, TransactionFilters};

/// Result structure for classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationOutput {
    pub utterance: String,
    pub intent: String,
    pub confidence: f64,
}

/// Result structure for transaction search.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchOutput {
    pub account: String,
    pub filters: TransactionFilters,
    pub total_matches: usize,
    pub transactions: Vec<Transaction>,
}

/// One row of the intent listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct IntentSummary {
    pub name: String,
    pub phrase_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrases: Option<Vec<String>>,
}

/// Result structure for listing intents.
#[derive(Debug, Serialize, Deserialize)]
pub struct IntentsOutput {
    pub intents: Vec<IntentSummary>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &RexaArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &RexaArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    for line in render_human(&value) {
        println!("{line}");
    }
    Ok(())
}

/// Render a serialized result as lines of text.
fn render_human(value: &serde_json::Value) -> Vec<String> {
    match value.as_object() {
        Some(obj) if obj.get("transactions").is_some_and(|t| t.is_array()) => {
            render_search_results(obj)
        }
        Some(obj) if obj.get("intents").is_some_and(|t| t.is_array()) => render_intents(obj),
        _ => render_generic(value, 0),
    }
}

/// Render search results as a listing plus a total.
fn render_search_results(obj: &serde_json::Map<String, serde_json::Value>) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(filters) = obj.get("filters").and_then(|f| f.as_object()) {
        if filters.is_empty() {
            lines.push("Filters: none".to_string());
        } else {
            let parts: Vec<String> = filters
                .iter()
                .map(|(key, val)| format!("{key}={}", format_value(val)))
                .collect();
            lines.push(format!("Filters: {}", parts.join(", ")));
        }
    }

    if let Some(transactions) = obj.get("transactions").and_then(|t| t.as_array()) {
        for transaction in transactions {
            let date = transaction.get("date").map(format_value).unwrap_or_default();
            let amount = transaction
                .get("amount")
                .and_then(|a| a.as_f64())
                .unwrap_or(0.0);
            let description = transaction
                .get("description")
                .map(format_value)
                .unwrap_or_default();
            let category = transaction
                .get("category")
                .map(format_value)
                .unwrap_or_default();
            lines.push(format!("{date}  {amount:>12.2}  {description} [{category}]"));
        }
    }

    if let Some(total) = obj.get("total_matches").and_then(|t| t.as_u64()) {
        lines.push(format!("Total matches: {total}"));
    }
    lines
}

/// Render the intent listing, one intent per line.
fn render_intents(obj: &serde_json::Map<String, serde_json::Value>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(intents) = obj.get("intents").and_then(|i| i.as_array()) {
        for intent in intents {
            let name = intent.get("name").map(format_value).unwrap_or_default();
            let count = intent
                .get("phrase_count")
                .and_then(|c| c.as_u64())
                .unwrap_or(0);
            lines.push(format!("{name} ({count} phrases)"));
            if let Some(phrases) = intent.get("phrases").and_then(|p| p.as_array()) {
                for phrase in phrases {
                    lines.push(format!("  - {}", format_value(phrase)));
                }
            }
        }
    }
    lines
}

/// Render generic data as indented `key: value` lines.
fn render_generic(value: &serde_json::Value, indent: usize) -> Vec<String> {
    let spaces = "  ".repeat(indent);
    match value {
        serde_json::Value::Object(obj) => {
            let mut lines = Vec::new();
            for (key, val) in obj {
                if val.is_object() {
                    lines.push(format!("{spaces}{key}:"));
                    lines.extend(render_generic(val, indent + 1));
                } else {
                    lines.push(format!("{spaces}{key}: {}", format_value(val)));
                }
            }
            lines
        }
        _ => vec![format!("{spaces}{}", format_value(value))],
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &RexaArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_value() {
        assert_eq!(
            format_value(&serde_json::Value::String("test".to_string())),
            "test"
        );
        assert_eq!(
            format_value(&serde_json::Value::Number(serde_json::Number::from(42))),
            "42"
        );
        assert_eq!(format_value(&json!(["savings account", "fd"])), "[savings account, fd]");
        assert_eq!(format_value(&serde_json::Value::Null), "null");
    }

    #[test]
    fn test_render_generic_nested() {
        let value = json!({
            "classification": {"intent": "atm_info", "confidence": 0.5},
            "personal": false
        });
        let lines = render_human(&value);

        assert_eq!(
            lines,
            vec![
                "classification:",
                "  confidence: 0.5",
                "  intent: atm_info",
                "personal: false",
            ]
        );
    }

    #[test]
    fn test_render_search_results() {
        let value = json!({
            "account": "alice",
            "filters": {"min_amount": 500.0},
            "total_matches": 1,
            "transactions": [
                {"date": "2024-05-03T00:00:00", "description": "Rent", "amount": -1500.0, "category": "Other"}
            ]
        });
        let lines = render_human(&value);

        assert_eq!(lines[0], "Filters: min_amount=500.0");
        assert!(lines[1].contains("-1500.00"));
        assert!(lines[1].ends_with("Rent [Other]"));
        assert_eq!(lines[2], "Total matches: 1");
    }

    #[test]
    fn test_render_intents() {
        let value = json!({
            "intents": [
                {"name": "atm_info", "phrase_count": 2, "phrases": ["atm", "nearest atm"]},
                {"name": "loan_info", "phrase_count": 3}
            ]
        });
        let lines = render_human(&value);

        assert_eq!(lines[0], "atm_info (2 phrases)");
        assert_eq!(lines[1], "  - atm");
        assert_eq!(lines[3], "loan_info (3 phrases)");
    }
}
