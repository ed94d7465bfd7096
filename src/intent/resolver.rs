//! The resolver facade: classification, entity extraction and transaction
//! search behind one immutable value.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use log::{debug, trace};
use serde::Serialize;

use crate::analysis::analyzer::{Analyzer, BankingAnalyzer, PipelineAnalyzer};
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::config::ResolverConfig;
use crate::entity::amount::{AmountFilters, extract_amount_filters};
use crate::entity::bag::{EntityBag, extract_entities};
use crate::entity::date::{DateFilters, extract_date_filters_at};
use crate::entity::recognizer::{EntityRecognizer, RuleBasedRecognizer};
use crate::error::Result;
use crate::intent::classifier::{IntentClassifier, TfIdfIntentClassifier};
use crate::intent::personal::is_personal_query;
use crate::intent::taxonomy::{FILTER_TRANSACTIONS, IntentTaxonomy, TRANSACTION_HISTORY};
use crate::intent::types::{ClassificationResult, ResolvedIntent};
use crate::transaction::filter::{TransactionFilters, extract_category_filter, filter_transactions};
use crate::transaction::store::TransactionSource;
use crate::transaction::types::Transaction;

/// Everything the resolver knows about one utterance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub utterance: String,
    pub classification: ClassificationResult,
    pub entities: EntityBag,
    /// Search criteria, present only for transaction intents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<TransactionFilters>,
    /// Whether answering needs the caller's own data.
    pub personal: bool,
}

/// Maps utterances to intents and extracts the entities they mention.
///
/// Immutable after construction and safe to share behind an `Arc`.
///
/// ```
/// use rexa::intent::{IntentResolver, ResolvedIntent};
///
/// let resolver = IntentResolver::with_defaults().unwrap();
///
/// let result = resolver.classify("What is my current balance?").unwrap();
/// assert_eq!(result.intent, ResolvedIntent::Intent("balance_inquiry".into()));
///
/// let result = resolver.classify("hello there").unwrap();
/// assert_eq!(result.intent, ResolvedIntent::Greeting);
/// ```
pub struct IntentResolver {
    config: ResolverConfig,
    taxonomy: IntentTaxonomy,
    /// Lowercased words for the greeting and thanks checks.
    surface: PipelineAnalyzer,
    greeting_words: HashSet<String>,
    thanks_words: HashSet<String>,
    classifier: Arc<dyn IntentClassifier>,
    recognizer: Arc<dyn EntityRecognizer>,
}

impl IntentResolver {
    /// Build a resolver with the TF-IDF classifier and the rule-based
    /// recognizer.
    pub fn new(taxonomy: IntentTaxonomy, config: ResolverConfig) -> Result<Self> {
        let analyzer: Arc<dyn Analyzer> = Arc::new(BankingAnalyzer::new()?);
        let classifier = Arc::new(TfIdfIntentClassifier::new(&taxonomy, analyzer)?);
        let recognizer = Arc::new(RuleBasedRecognizer::new()?);
        Self::with_components(taxonomy, config, classifier, recognizer)
    }

    /// Built-in banking taxonomy with the default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(IntentTaxonomy::banking(), ResolverConfig::default())
    }

    /// Build from a configuration, loading its taxonomy file if it names one.
    pub fn from_config(config: ResolverConfig) -> Result<Self> {
        let taxonomy = config.load_taxonomy()?;
        Self::new(taxonomy, config)
    }

    /// Build around caller-supplied classifier and recognizer.
    pub fn with_components(
        taxonomy: IntentTaxonomy,
        config: ResolverConfig,
        classifier: Arc<dyn IntentClassifier>,
        recognizer: Arc<dyn EntityRecognizer>,
    ) -> Result<Self> {
        config.validate()?;

        let surface = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()?))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("surface");
        let greeting_words = word_set(&config.greeting_words);
        let thanks_words = word_set(&config.thanks_words);

        debug!(
            "Built intent resolver: {} intents, classifier {}, recognizer {}, threshold {}",
            taxonomy.len(),
            classifier.name(),
            recognizer.name(),
            config.threshold
        );

        Ok(IntentResolver {
            config,
            taxonomy,
            surface,
            greeting_words,
            thanks_words,
            classifier,
            recognizer,
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn taxonomy(&self) -> &IntentTaxonomy {
        &self.taxonomy
    }

    pub fn classifier(&self) -> &dyn IntentClassifier {
        self.classifier.as_ref()
    }

    pub fn recognizer(&self) -> &dyn EntityRecognizer {
        self.recognizer.as_ref()
    }

    /// Resolve an utterance to `greeting`, `thanks`, an intent of the
    /// taxonomy, or `none`.
    pub fn classify(&self, utterance: &str) -> Result<ClassificationResult> {
        if utterance.trim().is_empty() {
            return Ok(ClassificationResult::none(0.0));
        }

        let words = self.surface.terms(utterance)?;
        let window = self.config.greeting_window.unwrap_or(words.len());
        if words.iter().take(window).any(|w| self.greeting_words.contains(w)) {
            trace!("Greeting override for {utterance:?}");
            return Ok(ClassificationResult::greeting());
        }
        if words.iter().any(|w| self.thanks_words.contains(w)) {
            trace!("Thanks override for {utterance:?}");
            return Ok(ClassificationResult::thanks());
        }

        let Some(best) = self.classifier.predict(utterance)? else {
            return Ok(ClassificationResult::none(0.0));
        };
        debug!(
            "Best intent for {utterance:?}: {} ({:.3})",
            best.intent, best.score
        );

        if best.score > self.config.threshold && self.taxonomy.contains(&best.intent) {
            Ok(ClassificationResult::new(
                ResolvedIntent::Intent(best.intent),
                best.score,
            ))
        } else {
            Ok(ClassificationResult::none(best.score))
        }
    }

    pub fn extract_entities(&self, utterance: &str) -> Result<EntityBag> {
        extract_entities(self.recognizer.as_ref(), utterance)
    }

    pub fn extract_amount_filters(&self, utterance: &str) -> AmountFilters {
        extract_amount_filters(utterance)
    }

    /// Date bounds relative to the local clock.
    pub fn extract_date_filters(&self, utterance: &str) -> Result<DateFilters> {
        self.extract_date_filters_at(utterance, Local::now().naive_local())
    }

    pub fn extract_date_filters_at(
        &self,
        utterance: &str,
        now: NaiveDateTime,
    ) -> Result<DateFilters> {
        extract_date_filters_at(self.recognizer.as_ref(), utterance, now)
    }

    /// Amount, date and category criteria of a search utterance.
    pub fn extract_transaction_filters(&self, utterance: &str) -> Result<TransactionFilters> {
        self.extract_transaction_filters_at(utterance, Local::now().naive_local())
    }

    pub fn extract_transaction_filters_at(
        &self,
        utterance: &str,
        now: NaiveDateTime,
    ) -> Result<TransactionFilters> {
        let amount = extract_amount_filters(utterance);
        let date = self.extract_date_filters_at(utterance, now)?;
        let category = extract_category_filter(utterance);
        Ok(TransactionFilters::from_parts(amount, date, category))
    }

    pub fn filter_transactions(
        &self,
        transactions: &[Transaction],
        filters: &TransactionFilters,
    ) -> Vec<Transaction> {
        filter_transactions(transactions, filters)
    }

    pub fn is_personal_query(&self, utterance: &str) -> bool {
        is_personal_query(utterance)
    }

    /// Transactions of `account` matching the criteria in `utterance`.
    pub fn search(
        &self,
        source: &dyn TransactionSource,
        account: &str,
        utterance: &str,
    ) -> Result<Vec<Transaction>> {
        self.search_at(source, account, utterance, Local::now().naive_local())
    }

    pub fn search_at(
        &self,
        source: &dyn TransactionSource,
        account: &str,
        utterance: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<Transaction>> {
        let filters = self.extract_transaction_filters_at(utterance, now)?;
        let transactions = source.transactions(account)?;
        let matched = filter_transactions(&transactions, &filters);
        debug!(
            "Search on {account}: {} of {} transactions match",
            matched.len(),
            transactions.len()
        );
        Ok(matched)
    }

    /// Classify and extract in one call. The caller identity is accepted
    /// and not used.
    pub fn resolve(&self, utterance: &str, caller: Option<&str>) -> Result<Resolution> {
        self.resolve_at(utterance, caller, Local::now().naive_local())
    }

    pub fn resolve_at(
        &self,
        utterance: &str,
        _caller: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<Resolution> {
        let classification = self.classify(utterance)?;
        let entities = self.extract_entities(utterance)?;

        let filters = match classification.intent.intent_name() {
            Some(FILTER_TRANSACTIONS | TRANSACTION_HISTORY) => {
                Some(self.extract_transaction_filters_at(utterance, now)?)
            }
            _ => None,
        };

        Ok(Resolution {
            utterance: utterance.to_string(),
            classification,
            entities,
            filters,
            personal: is_personal_query(utterance),
        })
    }
}

fn word_set(words: &[String]) -> HashSet<String> {
    words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

impl std::fmt::Debug for IntentResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentResolver")
            .field("config", &self.config)
            .field("intents", &self.taxonomy.len())
            .field("classifier", &self.classifier.name())
            .field("recognizer", &self.recognizer.name())
            .finish()
    }
}
