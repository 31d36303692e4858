//! Read-only search filters over a transaction snapshot.

use std::str::FromStr;

use crate::errors::{LedgerError, Result};
use crate::ledger::{Transaction, TransactionKind, TxnDate};

/// Pure filters; results keep the snapshot's relative order.
pub struct QueryService;

impl QueryService {
    /// Case-insensitive containment match on the category label.
    pub fn by_category<'a>(
        transactions: &'a [Transaction],
        term: &str,
    ) -> Result<Vec<&'a Transaction>> {
        let needle = search_term(term, "category")?;
        Ok(transactions
            .iter()
            .filter(|txn| txn.category.to_lowercase().contains(&needle))
            .collect())
    }

    pub fn by_exact_date<'a>(
        transactions: &'a [Transaction],
        date: &str,
    ) -> Result<Vec<&'a Transaction>> {
        if date.trim().is_empty() {
            return Err(invalid("date search term cannot be empty"));
        }
        let date = TxnDate::parse(date).map_err(|err| invalid(err.to_string()))?;
        Ok(transactions.iter().filter(|txn| txn.date == date).collect())
    }

    pub fn by_kind(transactions: &[Transaction], kind: TransactionKind) -> Vec<&Transaction> {
        transactions.iter().filter(|txn| txn.kind == kind).collect()
    }

    /// Case-insensitive containment match on the free-form description.
    pub fn by_description<'a>(
        transactions: &'a [Transaction],
        term: &str,
    ) -> Result<Vec<&'a Transaction>> {
        let needle = search_term(term, "description")?;
        Ok(transactions
            .iter()
            .filter(|txn| txn.description.to_lowercase().contains(&needle))
            .collect())
    }

    pub fn apply<'a>(
        transactions: &'a [Transaction],
        filter: &TransactionFilter,
    ) -> Result<Vec<&'a Transaction>> {
        match filter {
            TransactionFilter::Category(term) => Self::by_category(transactions, term),
            TransactionFilter::Date(date) => Self::by_exact_date(transactions, date),
            TransactionFilter::Kind(kind) => Ok(Self::by_kind(transactions, *kind)),
            TransactionFilter::Description(term) => Self::by_description(transactions, term),
        }
    }
}

/// A search request naming one field and its term.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionFilter {
    Category(String),
    Date(String),
    Kind(TransactionKind),
    Description(String),
}

impl TransactionFilter {
    pub fn parse(field: &str, term: &str) -> Result<Self> {
        match field.trim().to_ascii_lowercase().as_str() {
            "category" => Ok(Self::Category(term.to_string())),
            "date" => Ok(Self::Date(term.to_string())),
            "kind" | "type" => Ok(Self::Kind(TransactionKind::from_str(term)?)),
            "description" => Ok(Self::Description(term.to_string())),
            other => Err(invalid(format!(
                "cannot search by `{other}`; use category, date, kind, or description"
            ))),
        }
    }
}

fn search_term(term: &str, field: &str) -> Result<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return Err(invalid(format!("{field} search term cannot be empty")));
    }
    Ok(trimmed.to_lowercase())
}

fn invalid(message: impl Into<String>) -> LedgerError {
    LedgerError::InvalidArgument(message.into())
}
