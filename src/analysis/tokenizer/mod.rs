//! Tokenizer implementations for text analysis.
//!
//! - [`RegexTokenizer`] splits on a word-character pattern. It feeds the
//!   intent scoring pipeline and the greeting and thanks scans.
//! - [`UnicodeWordTokenizer`] follows UAX #29 word boundaries and keeps
//!   contractions and comma-grouped numbers whole. The entity recognizer uses
//!   it to find capitalized names.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod unicode_word;

pub use regex::RegexTokenizer;
pub use unicode_word::UnicodeWordTokenizer;
