//! Read-only transaction repositories.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Result, RexaError};
use crate::transaction::types::Transaction;

/// Source of an account's transactions.
pub trait TransactionSource: Send + Sync {
    /// Transactions of `account`. Unknown accounts are an error.
    fn transactions(&self, account: &str) -> Result<Vec<Transaction>>;

    /// Account identifiers known to this source, sorted.
    fn accounts(&self) -> Vec<String>;
}

/// Transactions held in memory, keyed by account.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionSource {
    ledgers: HashMap<String, Vec<Transaction>>,
}

impl InMemoryTransactionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the ledger of an account. Missing categories are
    /// derived from the descriptions.
    pub fn with_account<S: Into<String>>(mut self, account: S, transactions: Vec<Transaction>) -> Self {
        let transactions = transactions.into_iter().map(Transaction::categorized).collect();
        self.ledgers.insert(account.into(), transactions);
        self
    }

    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }
}

impl TransactionSource for InMemoryTransactionSource {
    fn transactions(&self, account: &str) -> Result<Vec<Transaction>> {
        self.ledgers
            .get(account)
            .cloned()
            .ok_or_else(|| RexaError::store(format!("unknown account: {account}")))
    }

    fn accounts(&self) -> Vec<String> {
        let mut accounts: Vec<String> = self.ledgers.keys().cloned().collect();
        accounts.sort();
        accounts
    }
}

/// Transactions loaded from a JSON document of the form
/// `{ "<account>": [ { "date", "description", "amount", "balance"?, "category"? } ] }`.
#[derive(Debug, Clone)]
pub struct JsonTransactionStore {
    path: Option<PathBuf>,
    inner: InMemoryTransactionSource,
}

impl JsonTransactionStore {
    /// Load and validate every record of the file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RexaError::store(format!("failed to read {}: {e}", path.display()))
        })?;
        let mut store = Self::from_json_str(&content)?;
        store.path = Some(path.to_path_buf());
        debug!(
            "Loaded {} accounts from {}",
            store.inner.len(),
            path.display()
        );
        Ok(store)
    }

    /// Parse a JSON document already in memory.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<Transaction>> = serde_json::from_str(json)?;

        let mut inner = InMemoryTransactionSource::new();
        for (account, transactions) in raw {
            for (index, transaction) in transactions.iter().enumerate() {
                transaction.validate().map_err(|e| {
                    RexaError::invalid_record(format!("{account}[{index}]: {e}"))
                })?;
            }
            if transactions.is_empty() {
                warn!("Account {account} has no transactions");
            }
            inner = inner.with_account(account, transactions);
        }

        Ok(Self { path: None, inner })
    }

    /// The file this store was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl TransactionSource for JsonTransactionStore {
    fn transactions(&self, account: &str) -> Result<Vec<Transaction>> {
        self.inner.transactions(account)
    }

    fn accounts(&self) -> Vec<String> {
        self.inner.accounts()
    }
}
