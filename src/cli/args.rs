//! Command line argument parsing for the Rexa CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Rexa - intent resolution and entity extraction for banking queries
#[derive(Parser, Debug, Clone)]
#[command(name = "rexa")]
#[command(about = "Resolve banking questions to intents, entities and transaction filters")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct RexaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug, 4=trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Similarity an intent must exceed (overrides the config file)
    #[arg(short, long, global = true, env = "REXA_THRESHOLD")]
    pub threshold: Option<f64>,

    /// Resolver configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", global = true, env = "REXA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl RexaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Log level for the binary's logger.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error, // Quiet mode
            1 => LevelFilter::Warn,  // Default
            2 => LevelFilter::Info,  // Verbose
            3 => LevelFilter::Debug, // Very verbose
            _ => LevelFilter::Trace, // Skipped fragments (4+)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify an utterance
    Classify(UtteranceArgs),

    /// Extract entities from an utterance
    Entities(UtteranceArgs),

    /// Extract transaction search filters from an utterance
    Filters(UtteranceArgs),

    /// Classify, extract and build filters in one pass
    Resolve(ResolveArgs),

    /// Filter an account's transactions from a JSON store
    Search(SearchArgs),

    /// List the intents of the taxonomy
    Intents(IntentsArgs),
}

/// A single utterance to process
#[derive(Parser, Debug, Clone)]
pub struct UtteranceArgs {
    /// The utterance, quoted
    #[arg(value_name = "UTTERANCE")]
    pub utterance: String,
}

/// Arguments for resolving an utterance
#[derive(Parser, Debug, Clone)]
pub struct ResolveArgs {
    /// The utterance, quoted
    #[arg(value_name = "UTTERANCE")]
    pub utterance: String,

    /// Caller identity token
    #[arg(long)]
    pub caller: Option<String>,
}

/// Arguments for searching transactions
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Transaction store file (JSON object of account -> transactions)
    #[arg(short, long, value_name = "STORE_FILE")]
    pub store: PathBuf,

    /// Account whose transactions are searched
    #[arg(short, long)]
    pub account: String,

    /// The search utterance, quoted
    #[arg(value_name = "UTTERANCE")]
    pub utterance: String,

    /// Maximum number of transactions to print
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for listing intents
#[derive(Parser, Debug, Clone)]
pub struct IntentsArgs {
    /// Include each intent's keyword phrases
    #[arg(long)]
    pub phrases: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
