use crate::errors::{LedgerError, Result};
use crate::ledger::{Ledger, Transaction, TransactionDraft, TransactionUpdate};
use crate::storage::{StorageBackend, StorageError};

/// Outcome of opening the backing store.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub source: String,
    pub loaded: usize,
    pub warnings: Vec<String>,
}

/// A mutation that took effect in memory, plus the result of persisting it.
///
/// A failed save is not rolled back, so callers must surface `save_error`.
#[derive(Debug)]
pub struct Committed<T> {
    pub value: T,
    pub save_error: Option<LedgerError>,
}

impl<T> Committed<T> {
    pub fn is_persisted(&self) -> bool {
        self.save_error.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Facade that coordinates ledger state and persistence.
pub struct LedgerManager {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
}

impl LedgerManager {
    /// Starts from an empty ledger without reading the backend.
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            ledger: Ledger::new(),
            storage,
        }
    }

    /// Loads the backend; any failure degrades to an empty ledger.
    pub fn open(storage: Box<dyn StorageBackend>) -> (Self, LoadReport) {
        let source = storage.describe();
        let mut report = LoadReport {
            source: source.clone(),
            ..LoadReport::default()
        };

        let ledger = match storage.load() {
            Ok(loaded) => {
                report.warnings.extend(loaded.skipped);
                let (ledger, warnings) = Ledger::from_records(loaded.records);
                report.warnings.extend(warnings);
                ledger
            }
            Err(StorageError::Missing(_)) => {
                tracing::info!(source = %source, "no data file yet, starting empty");
                Ledger::new()
            }
            Err(err) => {
                let err = LedgerError::from(err);
                tracing::warn!(source = %source, error = %err, "failed to load transactions");
                report
                    .warnings
                    .push(format!("could not load `{source}`: {err}; starting empty"));
                Ledger::new()
            }
        };

        for warning in &report.warnings {
            tracing::warn!(source = %source, "{warning}");
        }
        report.loaded = ledger.len();
        tracing::info!(source = %source, count = report.loaded, "ledger opened");
        (Self { ledger, storage }, report)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn list(&self) -> &[Transaction] {
        self.ledger.list()
    }

    /// Owned copy of the current transactions for queries and reports.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.ledger.list().to_vec()
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Transaction> {
        self.ledger.find_by_id(id)
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn create(&mut self, draft: TransactionDraft) -> Result<Committed<Transaction>> {
        let created = self.ledger.create(draft)?;
        tracing::debug!(id = created.id, kind = %created.kind, "transaction created");
        Ok(self.commit(created))
    }

    pub fn update(&mut self, id: u32, update: TransactionUpdate) -> Result<Committed<Transaction>> {
        let field = update.field_name();
        let updated = self.ledger.update(id, update)?;
        tracing::debug!(id, field, "transaction updated");
        Ok(self.commit(updated))
    }

    pub fn delete(&mut self, id: u32) -> Result<Committed<Transaction>> {
        let removed = self.ledger.delete(id)?;
        tracing::debug!(id, remaining = self.ledger.len(), "transaction deleted");
        Ok(self.commit(removed))
    }

    pub fn save(&self) -> Result<()> {
        self.storage.save(self.ledger.list())?;
        tracing::info!(
            destination = %self.storage.describe(),
            count = self.ledger.len(),
            "ledger saved"
        );
        Ok(())
    }

    fn commit<T>(&self, value: T) -> Committed<T> {
        let save_error = match self.save() {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(error = %err, "save failed; in-memory changes kept");
                Some(err)
            }
        };
        Committed { value, save_error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{TransactionKind, TxnDate};
    use crate::storage::LoadedRecords;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        saved: RefCell<Vec<Vec<Transaction>>>,
        fail_saves: Cell<bool>,
    }

    struct RecordingStorage(Rc<Recorder>);

    impl StorageBackend for RecordingStorage {
        fn load(&self) -> crate::storage::Result<LoadedRecords> {
            Ok(LoadedRecords::default())
        }

        fn save(&self, transactions: &[Transaction]) -> crate::storage::Result<()> {
            if self.0.fail_saves.get() {
                return Err(std::io::Error::other("disk full").into());
            }
            self.0.saved.borrow_mut().push(transactions.to_vec());
            Ok(())
        }

        fn describe(&self) -> String {
            "memory".into()
        }
    }

    fn manager() -> (LedgerManager, Rc<Recorder>) {
        let recorder = Rc::new(Recorder::default());
        let storage = RecordingStorage(Rc::clone(&recorder));
        (LedgerManager::new(Box::new(storage)), recorder)
    }

    fn draft(amount: f64) -> TransactionDraft {
        TransactionDraft::new(TransactionKind::Expense, amount, "Food")
            .with_date(TxnDate::parse("2024/03/01").unwrap())
    }

    #[test]
    fn create_persists_full_collection() {
        let (mut manager, recorder) = manager();
        manager.create(draft(1.0)).unwrap();
        let committed = manager.create(draft(2.0)).unwrap();
        assert!(committed.is_persisted());
        let saved = recorder.saved.borrow();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[1].len(), 2);
    }

    #[test]
    fn validation_failure_skips_save() {
        let (mut manager, recorder) = manager();
        let err = manager.create(draft(0.0)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        assert!(recorder.saved.borrow().is_empty());
    }

    #[test]
    fn delete_of_missing_id_does_not_save() {
        let (mut manager, recorder) = manager();
        manager.create(draft(1.0)).unwrap();
        let err = manager.delete(5).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(5)));
        assert_eq!(recorder.saved.borrow().len(), 1);
        assert_eq!(manager.list().len(), 1);
    }

    #[test]
    fn failed_save_keeps_mutation_and_reports_error() {
        let (mut manager, recorder) = manager();
        recorder.fail_saves.set(true);
        let committed = manager.create(draft(3.0)).unwrap();
        assert!(!committed.is_persisted());
        assert!(matches!(
            committed.save_error,
            Some(LedgerError::Persistence(_))
        ));
        assert_eq!(manager.list().len(), 1);
    }
}
