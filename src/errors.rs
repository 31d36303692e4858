use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid kind: {0}")]
    InvalidKind(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Transaction not found: {0}")]
    NotFound(u32),
    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Persistence(err.to_string())
    }
}

impl LedgerError {
    /// True for errors raised while validating caller input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidAmount(_)
                | LedgerError::InvalidDate(_)
                | LedgerError::InvalidCategory(_)
                | LedgerError::InvalidKind(_)
                | LedgerError::InvalidArgument(_)
        )
    }
}
