//! Ledger state management, persistence coordination, and read-side services.

pub mod ledger_manager;
pub mod services;
pub mod utils;

pub use ledger_manager::{Committed, LedgerManager, LoadReport};
