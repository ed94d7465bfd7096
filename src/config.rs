//! Resolver configuration.
//!
//! Every field has a default, so a configuration file only needs to name the
//! values it changes:
//!
//! ```
//! use rexa::config::ResolverConfig;
//!
//! let config = ResolverConfig::from_json_str(r#"{"threshold": 0.5}"#).unwrap();
//! assert_eq!(config.threshold, 0.5);
//! assert_eq!(config.greeting_window, None);
//! ```

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RexaError};
use crate::intent::taxonomy::IntentTaxonomy;

/// Default similarity an intent must exceed to be returned.
pub const DEFAULT_THRESHOLD: f64 = 0.35;

/// Configuration of an [`IntentResolver`](crate::intent::IntentResolver).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Similarity an intent must strictly exceed, within `[0, 1]`.
    pub threshold: f64,

    /// Number of leading tokens scanned for a greeting. `None` scans the
    /// whole utterance.
    pub greeting_window: Option<usize>,

    /// Words that resolve an utterance to `greeting`.
    pub greeting_words: Vec<String>,

    /// Words that resolve an utterance to `thanks`.
    pub thanks_words: Vec<String>,

    /// JSON taxonomy replacing the built-in banking intents.
    pub taxonomy_path: Option<PathBuf>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            threshold: DEFAULT_THRESHOLD,
            greeting_window: None,
            greeting_words: ["hello", "hi", "hey", "greetings"]
                .into_iter()
                .map(String::from)
                .collect(),
            thanks_words: ["thanks", "thank", "appreciate"]
                .into_iter()
                .map(String::from)
                .collect(),
            taxonomy_path: None,
        }
    }
}

impl ResolverConfig {
    /// Load a configuration file and validate it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        debug!("Loaded resolver configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ResolverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Limit the greeting scan to the first `window` tokens.
    pub fn with_greeting_window(mut self, window: usize) -> Self {
        self.greeting_window = Some(window);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(RexaError::invalid_config(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        if self.greeting_window == Some(0) {
            return Err(RexaError::invalid_config(
                "greeting_window must be positive",
            ));
        }
        if self.greeting_words.iter().all(|w| w.trim().is_empty()) {
            return Err(RexaError::invalid_config("greeting_words is empty"));
        }
        if self.thanks_words.iter().all(|w| w.trim().is_empty()) {
            return Err(RexaError::invalid_config("thanks_words is empty"));
        }
        Ok(())
    }

    /// The configured taxonomy, or the built-in banking intents.
    pub fn load_taxonomy(&self) -> Result<IntentTaxonomy> {
        match &self.taxonomy_path {
            Some(path) => IntentTaxonomy::from_path(path),
            None => Ok(IntentTaxonomy::banking()),
        }
    }
}
