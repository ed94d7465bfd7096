use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use rexa::config::ResolverConfig;
use rexa::error::Result;
use rexa::intent::{IntentResolver, IntentTaxonomy, ResolvedIntent};

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap()
}

fn intent(name: &str) -> ResolvedIntent {
    ResolvedIntent::Intent(name.to_string())
}

#[test]
fn banking_utterances_resolve_to_their_intents() -> Result<()> {
    let resolver = IntentResolver::with_defaults()?;

    let cases = [
        ("What is my current balance?", "balance_inquiry"),
        ("where is the nearest atm", "atm_info"),
        ("I want to transfer money to my friend", "fund_transfer"),
        ("how do I apply for a home loan", "loan_info"),
        ("show transactions above 500", "filter_transactions"),
        ("my debit card is lost", "card_info"),
        ("how to enable netbanking", "netbanking_info"),
        ("what are the fd interest rates", "interest_rates"),
        ("tell me about pm kisan scheme", "scheme_info"),
        ("is there a monthly report for me", "monthly_report"),
        ("how can I protect my account from fraud", "security_info"),
        ("pay my electricity bill", "bill_payment"),
        ("what account types do you offer", "account_info"),
        ("block my card", "card_management"),
    ];

    for (utterance, expected) in cases {
        let result = resolver.classify(utterance)?;
        assert_eq!(result.intent, intent(expected), "utterance: {utterance}");
        assert!(result.confidence > 0.35 && result.confidence <= 1.0);
    }
    Ok(())
}

#[test]
fn greeting_overrides_banking_keywords() -> Result<()> {
    let resolver = IntentResolver::with_defaults()?;

    for utterance in ["hello", "Hey, block my card", "show my balance please hi"] {
        let result = resolver.classify(utterance)?;
        assert_eq!(result.intent, ResolvedIntent::Greeting, "utterance: {utterance}");
        assert_eq!(result.confidence, 1.0);
    }
    assert_eq!(
        resolver.classify("thanks for the transfer")?.intent,
        ResolvedIntent::Thanks
    );
    Ok(())
}

#[test]
fn unrelated_and_empty_input_resolve_to_none() -> Result<()> {
    let resolver = IntentResolver::with_defaults()?;

    let result = resolver.classify("xyz qwerty unrelated gibberish")?;
    assert_eq!(result.intent, ResolvedIntent::None);

    for utterance in ["", "    "] {
        let resolution = resolver.resolve_at(utterance, None, fixed_now())?;
        assert_eq!(resolution.classification.intent, ResolvedIntent::None);
        assert_eq!(resolution.classification.confidence, 0.0);
        assert!(resolution.entities.is_empty());
        assert!(resolution.filters.is_none());
    }
    Ok(())
}

#[test]
fn resolve_collects_search_filters() -> Result<()> {
    let resolver = IntentResolver::with_defaults()?;
    let resolution = resolver.resolve_at("show transactions above 500", Some("token-123"), fixed_now())?;

    assert_eq!(resolution.classification.intent, intent("filter_transactions"));
    let filters = resolution
        .filters
        .as_ref()
        .expect("transaction intents carry filters");
    assert_eq!(filters.min_amount, Some(500.0));
    assert!(filters.start_date.is_none());

    let json = serde_json::to_value(&resolution)?;
    assert_eq!(json["classification"]["intent"], "filter_transactions");
    assert_eq!(json["filters"]["min_amount"], 500.0);
    Ok(())
}

#[test]
fn amount_and_date_filters_from_utterances() -> Result<()> {
    let resolver = IntentResolver::with_defaults()?;

    let amounts = resolver.extract_amount_filters("transactions above ₹1,000 and below ₹5,000");
    assert_eq!(amounts.min_amount, Some(1000.0));
    assert_eq!(amounts.max_amount, Some(5000.0));

    let amounts = resolver.extract_amount_filters("transactions between 500 and 1500");
    assert_eq!(amounts.min_amount, Some(500.0));
    assert_eq!(amounts.max_amount, Some(1500.0));

    let dates = resolver.extract_date_filters_at("transactions last month", fixed_now())?;
    assert_eq!(dates.start_date, Some(fixed_now() - Duration::days(30)));
    assert_eq!(dates.end_date, Some(fixed_now()));
    Ok(())
}

#[test]
fn entities_are_grouped_by_category() -> Result<()> {
    let resolver = IntentResolver::with_defaults()?;

    let bag = resolver.extract_entities("I paid ₹2,500 on 01/05/2024 and 3 lakh last month")?;
    assert_eq!(bag.amounts, vec![2500.0, 300_000.0]);
    assert_eq!(bag.dates, vec!["01/05/2024", "last month"]);

    let bag = resolver.extract_entities("tell me about pm kisan and mudra")?;
    assert_eq!(bag.scheme_names, vec!["pm kisan", "mudra"]);
    Ok(())
}

#[test]
fn personal_queries_are_flagged() -> Result<()> {
    let resolver = IntentResolver::with_defaults()?;

    assert!(resolver.is_personal_query("What's my balance?"));
    assert!(resolver.is_personal_query("show me my card details"));
    assert!(!resolver.is_personal_query("where is the nearest atm"));
    Ok(())
}

#[test]
fn taxonomy_file_replaces_builtin_intents() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let taxonomy_path = dir.path().join("intents.json");
    std::fs::write(
        &taxonomy_path,
        r#"[
            {"name": "weather", "phrases": ["weather forecast", "rain today"]},
            {"name": "news", "phrases": ["latest headlines", "breaking news"]}
        ]"#,
    )?;

    let config = ResolverConfig {
        taxonomy_path: Some(taxonomy_path),
        ..ResolverConfig::default()
    };
    let resolver = IntentResolver::from_config(config)?;

    assert_eq!(resolver.taxonomy().len(), 2);
    assert_eq!(resolver.classify("will it rain today")?.intent, intent("weather"));
    assert_eq!(
        resolver.classify("What is my current balance?")?.intent,
        ResolvedIntent::None
    );
    Ok(())
}

#[test]
fn resolver_is_shareable_between_threads() -> Result<()> {
    let resolver = Arc::new(IntentResolver::new(
        IntentTaxonomy::banking(),
        ResolverConfig::default(),
    )?);

    let results: Vec<ResolvedIntent> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["block my card", "pay my electricity bill"]
            .into_iter()
            .map(|utterance| {
                let resolver = Arc::clone(&resolver);
                scope.spawn(move || resolver.classify(utterance).map(|r| r.intent))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Result<Vec<_>>>()
    })?;

    assert_eq!(results, vec![intent("card_management"), intent("bill_payment")]);
    Ok(())
}
