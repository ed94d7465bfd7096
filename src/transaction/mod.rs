//! Transactions: typed records, search filters and read-only sources.

pub mod filter;
pub mod store;
pub mod types;

pub use filter::{TransactionFilters, extract_category_filter, filter_transactions};
pub use store::{InMemoryTransactionSource, JsonTransactionStore, TransactionSource};
pub use types::{Category, Transaction, parse_record_date};
