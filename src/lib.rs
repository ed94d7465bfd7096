//! # Rexa
//!
//! Intent resolution and entity extraction for a banking assistant.
//!
//! ## Features
//!
//! - Greeting and thanks overrides ahead of classification
//! - TF-IDF cosine similarity against a banking intent taxonomy
//! - Rule-based recognition of money, dates, places and products
//! - Amount, date and category filters for transaction search
//!
//! ```
//! use rexa::prelude::*;
//!
//! let resolver = IntentResolver::with_defaults().unwrap();
//! let filters = resolver.extract_amount_filters("transactions between 500 and 1500");
//!
//! assert_eq!(filters.min_amount, Some(500.0));
//! assert_eq!(filters.max_amount, Some(1500.0));
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod intent;
pub mod transaction;

pub mod prelude {
    pub use crate::config::ResolverConfig;
    pub use crate::entity::{AmountFilters, DateFilters, EntityBag};
    pub use crate::error::{Result, RexaError};
    pub use crate::intent::{ClassificationResult, IntentResolver, Resolution, ResolvedIntent};
    pub use crate::transaction::{Transaction, TransactionFilters, TransactionSource};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
