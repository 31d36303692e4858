pub mod query_service;
pub mod summary_service;

pub use query_service::{QueryService, TransactionFilter};
pub use summary_service::{
    CategoryBreakdown, CategoryShare, LedgerSummary, MonthlyTotals, SummaryService,
};
