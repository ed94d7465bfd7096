//! Core analyzer trait definition.
//!
//! An [`Analyzer`] turns raw text into the normalized terms the intent
//! vectorizer counts. The same analyzer must be used for the taxonomy
//! phrases and for the query, otherwise their vocabularies drift apart.
//!
//! ```text
//! Utterance → Tokenizer → Filter 1 → ... → Filter N → Terms
//! ```
//!
//! # Examples
//!
//! ```
//! use rexa::analysis::analyzer::Analyzer;
//! use rexa::analysis::analyzer::BankingAnalyzer;
//!
//! let analyzer = BankingAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer.analyze("What is my current balance?").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "current");
//! assert_eq!(tokens[1].text, "balance");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// Analyzers are shared between the resolver and the vectorizer, so they
/// must be `Send + Sync`.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Analyze the text and collect only the term strings.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}
