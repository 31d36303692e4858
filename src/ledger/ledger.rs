use crate::errors::{LedgerError, Result};

use super::transaction::{Transaction, TransactionDraft, TransactionUpdate};

/// Ordered, in-memory collection of transactions with dense `1..N` ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from persisted records, repairing what the record rules reject.
    pub fn from_records(records: Vec<Transaction>) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let mut transactions = Vec::with_capacity(records.len());
        for record in records {
            match record.validate() {
                Ok(()) => transactions.push(record),
                Err(err) => warnings.push(format!("dropped transaction {}: {}", record.id, err)),
            }
        }

        let mut ledger = Self { transactions };
        if !ledger.has_dense_ids() {
            warnings.push("transaction ids were not a dense 1..N sequence; renumbered".into());
            ledger.renumber();
        }
        (ledger, warnings)
    }

    pub fn create(&mut self, draft: TransactionDraft) -> Result<Transaction> {
        let transaction = draft.into_transaction(self.next_id())?;
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn update(&mut self, id: u32, update: TransactionUpdate) -> Result<Transaction> {
        let transaction = self
            .transactions
            .iter_mut()
            .find(|txn| txn.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        update.apply(transaction)?;
        Ok(transaction.clone())
    }

    /// Removes the transaction and renumbers the remainder to `1..N`.
    pub fn delete(&mut self, id: u32) -> Result<Transaction> {
        let position = self
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        let removed = self.transactions.remove(position);
        self.renumber();
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn next_id(&self) -> u32 {
        self.transactions.len() as u32 + 1
    }

    fn has_dense_ids(&self) -> bool {
        self.transactions
            .iter()
            .enumerate()
            .all(|(idx, txn)| txn.id == idx as u32 + 1)
    }

    fn renumber(&mut self) {
        for (idx, txn) in self.transactions.iter_mut().enumerate() {
            txn.id = idx as u32 + 1;
        }
    }
}
