//! Analyzer implementations that combine tokenizers and filters.

pub mod analyzer;
pub mod banking;
pub mod pipeline;
pub mod simple;

pub use analyzer::Analyzer;
pub use banking::BankingAnalyzer;
pub use pipeline::PipelineAnalyzer;
pub use simple::SimpleAnalyzer;
