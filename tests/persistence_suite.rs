mod common;

use std::fs;

use common::draft;
use pocket_ledger::{
    core::LedgerManager,
    ledger::{TransactionDraft, TransactionKind, TransactionUpdate},
    storage::{JsonStorage, StorageBackend, StorageError},
};
use tempfile::TempDir;

#[test]
fn saved_ledger_reloads_field_for_field() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("financial_data.json");

    let mut manager = LedgerManager::new(Box::new(JsonStorage::new(&path)));
    manager
        .create(
            draft(TransactionKind::Income, 1234.56, "Salary", "2024/01/15")
                .with_description("January pay"),
        )
        .unwrap();
    manager
        .create(draft(TransactionKind::Expense, 0.1 + 0.2, "Coffee", "2024/01/16"))
        .unwrap();
    manager
        .create(draft(TransactionKind::Expense, 19.99, "Books", "2024/02/01"))
        .unwrap();
    manager
        .update(3, TransactionUpdate::parse("description", "Rust book").unwrap())
        .unwrap();

    let expected = manager.snapshot();
    let (reopened, report) = LedgerManager::open(Box::new(JsonStorage::new(&path)));
    assert_eq!(reopened.snapshot(), expected);
    assert_eq!(report.loaded, 3);
    assert!(report.warnings.is_empty());
}

#[test]
fn file_uses_documented_field_names() {
    let temp = TempDir::new().unwrap();
    let storage = JsonStorage::new(temp.path().join("data.json"));
    let mut manager = LedgerManager::new(Box::new(storage.clone()));
    manager
        .create(draft(TransactionKind::Expense, 42.5, "Food", "2024/03/09"))
        .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(storage.path()).unwrap()).unwrap();
    let record = &json[0];
    assert_eq!(record["id"], 1);
    assert_eq!(record["kind"], "expense");
    assert_eq!(record["amount"], 42.5);
    assert_eq!(record["category"], "Food");
    assert_eq!(record["date"], "2024/03/09");
}

#[test]
fn missing_file_opens_empty_without_warnings() {
    let temp = TempDir::new().unwrap();
    let storage = JsonStorage::new(temp.path().join("absent.json"));
    assert!(matches!(storage.load(), Err(StorageError::Missing(_))));

    let (manager, report) = LedgerManager::open(Box::new(storage));
    assert!(manager.list().is_empty());
    assert!(report.warnings.is_empty());
}

#[test]
fn corrupt_file_degrades_to_empty_with_warning() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("financial_data.json");
    fs::write(&path, "{ not json").unwrap();

    let (mut manager, report) = LedgerManager::open(Box::new(JsonStorage::new(&path)));
    assert!(manager.list().is_empty());
    assert_eq!(report.warnings.len(), 1);
    let backup = temp.path().join("financial_data.json.corrupt");
    assert_eq!(fs::read_to_string(&backup).unwrap(), "{ not json");

    // the next mutation overwrites the unreadable file
    manager
        .create(TransactionDraft::new(TransactionKind::Income, 10.0, "Gift"))
        .unwrap();
    let (reopened, report) = LedgerManager::open(Box::new(JsonStorage::new(&path)));
    assert_eq!(reopened.list().len(), 1);
    assert!(report.warnings.is_empty());
    assert_eq!(fs::read_to_string(&backup).unwrap(), "{ not json");
}

#[test]
fn one_undecodable_record_does_not_cost_the_others() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("financial_data.json");
    fs::write(
        &path,
        r#"[
            {"id": 1, "kind": "income", "amount": 1000.0, "category": "Salary", "description": "", "date": "2024/01/01"},
            {"id": 2, "kind": "expense", "amount": 3.0, "category": "Snacks", "description": "", "date": "2024-01-02"},
            {"id": 3, "kind": "expense", "amount": 25.0, "category": "Travel", "description": "", "date": "2024/01/03"}
        ]"#,
    )
    .unwrap();

    let (mut manager, report) = LedgerManager::open(Box::new(JsonStorage::new(&path)));
    assert_eq!(report.loaded, 2);
    assert!(report.warnings.iter().any(|w| w.contains("2024-01-02")), "{:?}", report.warnings);
    let ids: Vec<u32> = manager.list().iter().map(|txn| txn.id).collect();
    assert_eq!(ids, vec![1, 2]);

    manager
        .create(draft(TransactionKind::Expense, 1.5, "Gum", "2024/01/04"))
        .unwrap();
    let (reopened, _) = LedgerManager::open(Box::new(JsonStorage::new(&path)));
    let categories: Vec<&str> = reopened
        .list()
        .iter()
        .map(|txn| txn.category.as_str())
        .collect();
    assert_eq!(categories, vec!["Salary", "Travel", "Gum"]);
}

#[test]
fn legacy_records_are_repaired_on_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("financial_data.json");
    fs::write(
        &path,
        r#"[
            {"id": 1, "type": "income", "amount": 500.0, "category": "Salary", "description": "", "date": "2024/01/01"},
            {"id": 4, "type": "expense", "amount": -3.0, "category": "Food", "description": "", "date": "2024/01/02"},
            {"id": 7, "type": "expense", "amount": 25.0, "category": "Travel", "date": "2024/01/03"}
        ]"#,
    )
    .unwrap();

    let (manager, report) = LedgerManager::open(Box::new(JsonStorage::new(&path)));
    let ids: Vec<u32> = manager.list().iter().map(|txn| txn.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(manager.list()[1].category, "Travel");
    assert_eq!(manager.list()[1].description, "");
    assert_eq!(report.warnings.len(), 2);
}

#[test]
fn save_leaves_no_temporary_file_behind() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("financial_data.json");
    let storage = JsonStorage::new(&path);
    storage.save(&[]).unwrap();

    assert!(path.exists());
    let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
