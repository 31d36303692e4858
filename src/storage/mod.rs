pub mod json_backend;

use std::path::PathBuf;

use thiserror::Error;

use crate::{errors::LedgerError, ledger::Transaction};

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("data file `{0}` does not exist")]
    Missing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("data file is unreadable ({source}); original kept at `{}`", .backup.display())]
    Corrupt {
        backup: PathBuf,
        source: serde_json::Error,
    },
}

/// Records decoded from a backend, plus a reason for each record it had to skip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedRecords {
    pub records: Vec<Transaction>,
    pub skipped: Vec<String>,
}

impl From<Vec<Transaction>> for LoadedRecords {
    fn from(records: Vec<Transaction>) -> Self {
        Self {
            records,
            skipped: Vec::new(),
        }
    }
}

impl From<StorageError> for LedgerError {
    fn from(err: StorageError) -> Self {
        LedgerError::Persistence(err.to_string())
    }
}

/// Abstraction over persistence backends that hold the full transaction list.
pub trait StorageBackend {
    fn load(&self) -> Result<LoadedRecords>;
    /// Replaces the stored collection with `transactions`.
    fn save(&self, transactions: &[Transaction]) -> Result<()>;
    /// Human-readable location, used in log and status messages.
    fn describe(&self) -> String;
}

pub use json_backend::JsonStorage;
