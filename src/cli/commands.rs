//! Command implementations for the Rexa CLI.

use chrono::Local;
use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ResolverConfig;
use crate::error::Result;
use crate::intent::IntentResolver;
use crate::transaction::JsonTransactionStore;

/// Execute a CLI command.
pub fn execute_command(args: RexaArgs) -> Result<()> {
    let config = load_config(&args)?;

    match &args.command {
        Command::Classify(classify_args) => classify(classify_args, config, &args),
        Command::Entities(entity_args) => entities(entity_args, config, &args),
        Command::Filters(filter_args) => filters(filter_args, config, &args),
        Command::Resolve(resolve_args) => resolve(resolve_args, config, &args),
        Command::Search(search_args) => search(search_args, config, &args),
        Command::Intents(intents_args) => list_intents(intents_args, config, &args),
    }
}

/// Resolver configuration from the config file, with CLI overrides applied.
pub fn load_config(args: &RexaArgs) -> Result<ResolverConfig> {
    let mut config = match &args.config {
        Some(path) => ResolverConfig::from_path(path)?,
        None => ResolverConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    config.validate()?;
    Ok(config)
}

fn build_resolver(config: ResolverConfig) -> Result<IntentResolver> {
    let resolver = IntentResolver::from_config(config)?;
    info!("Loaded {} intents", resolver.taxonomy().len());
    Ok(resolver)
}

/// Classify an utterance.
fn classify(args: &UtteranceArgs, config: ResolverConfig, cli_args: &RexaArgs) -> Result<()> {
    let resolver = build_resolver(config)?;
    let result = resolver.classify(&args.utterance)?;

    output_result(
        "Classification",
        &ClassificationOutput {
            utterance: args.utterance.clone(),
            intent: result.intent.to_string(),
            confidence: result.confidence,
        },
        cli_args,
    )
}

/// Extract entities from an utterance.
fn entities(args: &UtteranceArgs, config: ResolverConfig, cli_args: &RexaArgs) -> Result<()> {
    let resolver = build_resolver(config)?;
    let bag = resolver.extract_entities(&args.utterance)?;

    output_result("Entities", &bag, cli_args)
}

/// Extract transaction filters from an utterance.
fn filters(args: &UtteranceArgs, config: ResolverConfig, cli_args: &RexaArgs) -> Result<()> {
    let resolver = build_resolver(config)?;
    let filters = resolver.extract_transaction_filters(&args.utterance)?;

    output_result("Transaction filters", &filters, cli_args)
}

/// Resolve an utterance in one pass.
fn resolve(args: &ResolveArgs, config: ResolverConfig, cli_args: &RexaArgs) -> Result<()> {
    let resolver = build_resolver(config)?;
    let resolution = resolver.resolve(&args.utterance, args.caller.as_deref())?;

    output_result("Resolution", &resolution, cli_args)
}

/// Search an account's transactions.
fn search(args: &SearchArgs, config: ResolverConfig, cli_args: &RexaArgs) -> Result<()> {
    let resolver = build_resolver(config)?;
    let store = JsonTransactionStore::open(&args.store)?;

    // One clock reading so the reported filters are the ones applied.
    let now = Local::now().naive_local();
    let filters = resolver.extract_transaction_filters_at(&args.utterance, now)?;
    let mut matched = resolver.search_at(&store, &args.account, &args.utterance, now)?;
    let total_matches = matched.len();
    if let Some(limit) = args.limit {
        matched.truncate(limit);
    }

    output_result(
        &format!("Search results for {}", args.account),
        &SearchOutput {
            account: args.account.clone(),
            filters,
            total_matches,
            transactions: matched,
        },
        cli_args,
    )
}

/// List the taxonomy. No classifier is built.
fn list_intents(args: &IntentsArgs, config: ResolverConfig, cli_args: &RexaArgs) -> Result<()> {
    let taxonomy = config.load_taxonomy()?;

    let intents = taxonomy
        .iter()
        .map(|entry| IntentSummary {
            name: entry.name.clone(),
            phrase_count: entry.phrases.len(),
            phrases: args.phrases.then(|| entry.phrases.clone()),
        })
        .collect();

    output_result("Intents", &IntentsOutput { intents }, cli_args)
}
