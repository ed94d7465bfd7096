//! Intent resolution: the banking taxonomy, TF-IDF similarity and the
//! resolver facade.

pub mod classifier;
pub mod personal;
pub mod resolver;
pub mod taxonomy;
pub mod tfidf;
pub mod types;

pub use classifier::{IntentClassifier, TfIdfIntentClassifier};
pub use personal::is_personal_query;
pub use resolver::{IntentResolver, Resolution};
pub use taxonomy::{
    FILTER_TRANSACTIONS, IntentEntry, IntentTaxonomy, SUPPLEMENTARY_CORPUS, TRANSACTION_HISTORY,
};
pub use tfidf::{TfIdfVectorizer, cosine_similarity};
pub use types::{ClassificationResult, IntentScore, ResolvedIntent};
