//! Text analysis for banking utterances.
//!
//! Tokenizers split an utterance into [`Token`]s, filters normalize them and
//! analyzers chain the two. The intent vectorizer and the entity recognizer
//! both consume analyzer output.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
