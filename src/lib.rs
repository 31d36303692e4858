#![doc(test(attr(deny(warnings))))]

//! Pocket Ledger records income and expense transactions, keeps them in a JSON
//! file, and derives summaries, category and monthly breakdowns, and charts.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod presentation;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Pocket Ledger tracing initialized.");
    });
}
