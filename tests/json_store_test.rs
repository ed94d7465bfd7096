use rexa::error::{Result, RexaError};
use rexa::transaction::{JsonTransactionStore, TransactionSource};

const LEDGER: &str = r#"{
    "acc-001": [
        {"date": "2024-06-01", "description": "Salary credit", "amount": 65000, "balance": 70000},
        {"date": "2024-06-02T18:45:00", "description": "Electricity bill", "amount": -1800},
        {"date": "2024-06-05", "description": "Gift", "amount": -300, "category": "Personal"}
    ],
    "acc-002": []
}"#;

#[test]
fn json_store_loads_and_categorizes_records() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, LEDGER)?;

    let store = JsonTransactionStore::open(&path)?;
    assert_eq!(store.path(), Some(path.as_path()));
    assert_eq!(store.accounts(), vec!["acc-001", "acc-002"]);

    let transactions = store.transactions("acc-001")?;
    let categories: Vec<Option<&str>> = transactions
        .iter()
        .map(|t| t.category.as_deref())
        .collect();
    assert_eq!(
        categories,
        vec![Some("Salary"), Some("Utilities"), Some("Personal")]
    );
    assert_eq!(transactions[0].balance, Some(70000.0));
    assert_eq!(transactions[1].date.format("%H:%M").to_string(), "18:45");
    Ok(())
}

#[test]
fn json_store_errors() -> Result<()> {
    let dir = tempfile::tempdir()?;

    assert!(matches!(
        JsonTransactionStore::open(dir.path().join("missing.json")),
        Err(RexaError::Store(_))
    ));

    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json")?;
    assert!(matches!(
        JsonTransactionStore::open(&path),
        Err(RexaError::Json(_))
    ));

    let store = JsonTransactionStore::from_json_str(LEDGER)?;
    assert!(matches!(
        store.transactions("acc-404"),
        Err(RexaError::Store(_))
    ));
    Ok(())
}
