//! Lemmatization filter.
//!
//! Reduces inflected words to a base form so "cards", "card" and "loans" /
//! "loan" share a vocabulary term.
//!
//! # Examples
//!
//! ```
//! use rexa::analysis::token_filter::Filter;
//! use rexa::analysis::token_filter::lemma::LemmaFilter;
//! use rexa::analysis::token::Token;
//!
//! let filter = LemmaFilter::new();
//! let tokens = vec![Token::new("transactions", 0), Token::new("lost", 1)];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result[0].text, "transaction");
//! assert_eq!(result[1].text, "lose");
//! ```

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Trait for reducing a word to its base form.
pub trait Lemmatizer: Send + Sync {
    /// Return the base form of a lowercase word.
    fn lemmatize(&self, word: &str) -> String;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

static IRREGULAR_FORMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("has", "have"),
        ("had", "have"),
        ("did", "do"),
        ("does", "do"),
        ("was", "be"),
        ("were", "be"),
        ("is", "be"),
        ("are", "be"),
        ("gone", "go"),
        ("went", "go"),
        ("lost", "lose"),
        ("children", "child"),
        ("women", "woman"),
        ("men", "man"),
    ]
    .into_iter()
    .collect()
});

/// Suffix-rule English lemmatizer.
///
/// Looks up a small table of irregular forms first, then strips plural
/// suffixes. Words of three characters or fewer are returned unchanged.
#[derive(Clone, Debug, Default)]
pub struct EnglishLemmatizer;

impl EnglishLemmatizer {
    /// Create a new English lemmatizer.
    pub fn new() -> Self {
        EnglishLemmatizer
    }
}

impl Lemmatizer for EnglishLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        if let Some(base) = IRREGULAR_FORMS.get(word) {
            return (*base).to_string();
        }

        // Byte lengths are fine here: every suffix below is ASCII.
        let len = word.len();
        if word.chars().count() <= 3 {
            return word.to_string();
        }

        if len > 4 && word.ends_with("ies") {
            return format!("{}y", &word[..len - 3]);
        }
        if word.ends_with("sses") {
            return word[..len - 2].to_string();
        }
        if word.ends_with("xes") || word.ends_with("ches") || word.ends_with("shes") {
            return word[..len - 2].to_string();
        }
        if word.ends_with('s')
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
        {
            return word[..len - 1].to_string();
        }

        word.to_string()
    }

    fn name(&self) -> &'static str {
        "english"
    }
}

/// A filter that replaces each token's text with its lemma.
#[derive(Clone)]
pub struct LemmaFilter {
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl LemmaFilter {
    /// Create a new lemma filter with the English lemmatizer.
    pub fn new() -> Self {
        Self::with_lemmatizer(Arc::new(EnglishLemmatizer::new()))
    }

    /// Create a new lemma filter with a custom lemmatizer.
    pub fn with_lemmatizer(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        LemmaFilter { lemmatizer }
    }

    /// Get the lemmatizer used by this filter.
    pub fn lemmatizer(&self) -> &dyn Lemmatizer {
        self.lemmatizer.as_ref()
    }
}

impl Default for LemmaFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LemmaFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaFilter")
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let lemmatizer = Arc::clone(&self.lemmatizer);
        let filtered_tokens: Vec<Token> = tokens
            .map(|token| {
                if token.is_stopped() {
                    token
                } else {
                    let lemma = lemmatizer.lemmatize(&token.text);
                    token.with_text(lemma)
                }
            })
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_suffixes() {
        let lemmatizer = EnglishLemmatizer::new();

        assert_eq!(lemmatizer.lemmatize("cards"), "card");
        assert_eq!(lemmatizer.lemmatize("policies"), "policy");
        assert_eq!(lemmatizer.lemmatize("addresses"), "address");
        assert_eq!(lemmatizer.lemmatize("taxes"), "tax");
        assert_eq!(lemmatizer.lemmatize("branches"), "branch");
        assert_eq!(lemmatizer.lemmatize("wishes"), "wish");
    }

    #[test]
    fn test_words_left_alone() {
        let lemmatizer = EnglishLemmatizer::new();

        assert_eq!(lemmatizer.lemmatize("atm"), "atm");
        assert_eq!(lemmatizer.lemmatize("ties"), "tie");
        assert_eq!(lemmatizer.lemmatize("address"), "address");
        assert_eq!(lemmatizer.lemmatize("status"), "status");
        assert_eq!(lemmatizer.lemmatize("analysis"), "analysis");
        assert_eq!(lemmatizer.lemmatize("balance"), "balance");
    }

    #[test]
    fn test_irregular_forms() {
        let lemmatizer = EnglishLemmatizer::new();

        assert_eq!(lemmatizer.lemmatize("lost"), "lose");
        assert_eq!(lemmatizer.lemmatize("was"), "be");
        assert_eq!(lemmatizer.lemmatize("children"), "child");
    }

    #[test]
    fn test_lemma_filter_skips_stopped_tokens() {
        let filter = LemmaFilter::new();
        let tokens = vec![Token::new("loans", 0), Token::new("rates", 1).stop()];

        let result: Vec<Token> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result[0].text, "loan");
        assert_eq!(result[1].text, "rates");
    }

    #[test]
    fn test_filter_name() {
        let filter = LemmaFilter::new();
        assert_eq!(filter.name(), "lemma");
        assert_eq!(filter.lemmatizer().name(), "english");
    }
}
