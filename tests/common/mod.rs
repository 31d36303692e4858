#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;

use pocket_ledger::{
    core::LedgerManager,
    ledger::{Transaction, TransactionDraft, TransactionKind, TxnDate},
    storage::{LoadedRecords, StorageBackend, StorageError},
};

/// In-memory backend whose saved state stays observable after the manager takes ownership.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    pub saved: Rc<RefCell<Vec<Transaction>>>,
    pub saves: Rc<Cell<usize>>,
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<LoadedRecords, StorageError> {
        Ok(self.saved.borrow().clone().into())
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), StorageError> {
        *self.saved.borrow_mut() = transactions.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}

/// Backend that refuses every write.
pub struct FailingStorage;

impl StorageBackend for FailingStorage {
    fn load(&self) -> Result<LoadedRecords, StorageError> {
        Ok(LoadedRecords::default())
    }

    fn save(&self, _transactions: &[Transaction]) -> Result<(), StorageError> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only volume").into())
    }

    fn describe(&self) -> String {
        "failing".into()
    }
}

pub fn draft(kind: TransactionKind, amount: f64, category: &str, date: &str) -> TransactionDraft {
    TransactionDraft::new(kind, amount, category).with_date(TxnDate::parse(date).unwrap())
}

/// Salary then groceries, both in January 2024.
pub fn seeded_manager() -> (LedgerManager, MemoryStorage) {
    let storage = MemoryStorage::default();
    let mut manager = LedgerManager::new(Box::new(storage.clone()));
    manager
        .create(draft(TransactionKind::Income, 1000.0, "Salary", "2024/01/15"))
        .unwrap();
    manager
        .create(draft(TransactionKind::Expense, 300.0, "Food", "2024/01/20"))
        .unwrap();
    (manager, storage)
}
