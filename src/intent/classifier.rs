//! Similarity-based intent classifier.

use std::sync::Arc;

use log::debug;

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;
use crate::intent::taxonomy::IntentTaxonomy;
use crate::intent::tfidf::{TfIdfVectorizer, cosine_similarity};
use crate::intent::types::IntentScore;

/// Scores an utterance against every intent it knows about.
pub trait IntentClassifier: Send + Sync {
    /// Similarity to each intent, in taxonomy order.
    fn scores(&self, text: &str) -> Result<Vec<IntentScore>>;

    /// The highest-scoring intent. Ties go to the earliest intent.
    fn predict(&self, text: &str) -> Result<Option<IntentScore>> {
        let mut best: Option<IntentScore> = None;
        for score in self.scores(text)? {
            match &best {
                Some(current) if score.score <= current.score => {}
                _ => best = Some(score),
            }
        }
        Ok(best)
    }

    /// Get the name of this classifier.
    fn name(&self) -> &'static str;
}

/// Compares the TF-IDF vector of an utterance with each intent's
/// pseudo-document vector.
#[derive(Debug)]
pub struct TfIdfIntentClassifier {
    vectorizer: TfIdfVectorizer,
    /// Intent name and cached pseudo-document vector, in taxonomy order.
    prototypes: Vec<(String, Vec<f64>)>,
}

impl TfIdfIntentClassifier {
    /// Fit a vectorizer over the taxonomy's training documents and cache the
    /// vector of every intent.
    pub fn new(taxonomy: &IntentTaxonomy, analyzer: Arc<dyn Analyzer>) -> Result<Self> {
        let mut vectorizer = TfIdfVectorizer::new(analyzer);
        vectorizer.fit(&taxonomy.training_documents())?;

        let prototypes = taxonomy
            .iter()
            .map(|entry| {
                let features = vectorizer.transform(&entry.pseudo_document())?;
                Ok((entry.name.clone(), features))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Fitted intent vectorizer: {} documents, {} terms, {} intents",
            vectorizer.n_documents(),
            vectorizer.vocabulary_size(),
            prototypes.len()
        );

        Ok(Self {
            vectorizer,
            prototypes,
        })
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    pub fn intent_count(&self) -> usize {
        self.prototypes.len()
    }
}

impl IntentClassifier for TfIdfIntentClassifier {
    fn scores(&self, text: &str) -> Result<Vec<IntentScore>> {
        let query = self.vectorizer.transform(text)?;

        Ok(self
            .prototypes
            .iter()
            .map(|(intent, prototype)| IntentScore {
                intent: intent.clone(),
                score: cosine_similarity(&query, prototype),
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "tfidf"
    }
}
