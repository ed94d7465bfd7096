//! Analyzer used to normalize banking utterances and taxonomy phrases.

use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lemma::LemmaFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::remove_empty::RemoveEmptyFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

/// Word tokenization, lowercasing, English stop-word removal and
/// lemmatization.
pub struct BankingAnalyzer {
    inner: PipelineAnalyzer,
}

impl BankingAnalyzer {
    pub fn new() -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::new()?);
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::default()))
            .add_filter(Arc::new(LemmaFilter::new()))
            .add_filter(Arc::new(RemoveEmptyFilter::new()))
            .with_name("banking");

        Ok(Self { inner: analyzer })
    }
}

impl Default for BankingAnalyzer {
    fn default() -> Self {
        Self::new().expect("Banking analyzer should be creatable with default settings")
    }
}

impl Analyzer for BankingAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "banking"
    }
}

impl Debug for BankingAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BankingAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banking_analyzer() {
        let analyzer = BankingAnalyzer::new().unwrap();

        let terms = analyzer.terms("What is my current balance?").unwrap();

        assert_eq!(terms, vec!["current", "balance"]);
    }

    #[test]
    fn test_plurals_collapse() {
        let analyzer = BankingAnalyzer::new().unwrap();

        assert_eq!(
            analyzer.terms("Show my recent transactions").unwrap(),
            vec!["show", "recent", "transaction"]
        );
        assert_eq!(analyzer.terms("I LOST my Cards").unwrap(), vec!["lose", "card"]);
    }

    #[test]
    fn test_only_stop_words() {
        let analyzer = BankingAnalyzer::new().unwrap();

        assert!(analyzer.terms("what is it").unwrap().is_empty());
        assert!(analyzer.terms("").unwrap().is_empty());
    }

    #[test]
    fn test_banking_analyzer_name() {
        let analyzer = BankingAnalyzer::new().unwrap();

        assert_eq!(analyzer.name(), "banking");
    }
}
