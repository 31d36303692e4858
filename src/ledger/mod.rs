//! Ledger domain models, persistence-friendly types, and helpers.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use ledger::Ledger;
pub use transaction::{
    parse_amount, validate_amount, validate_category, Transaction, TransactionDraft,
    TransactionKind, TransactionUpdate, TxnDate, DATE_FORMAT, MAX_AMOUNT,
};
