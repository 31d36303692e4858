use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::ledger::{Transaction, TransactionKind};

/// Overall totals for a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub income_count: usize,
    pub expense_count: usize,
    /// Share of income kept, in percent. `None` when there is no income.
    pub savings_ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub kind: TransactionKind,
    pub total: f64,
    pub entries: Vec<CategoryShare>,
}

impl CategoryBreakdown {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    /// `YYYY/MM`
    pub month: String,
    pub income: f64,
    pub expense: f64,
}

impl MonthlyTotals {
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

pub struct SummaryService;

impl SummaryService {
    pub fn summary(transactions: &[Transaction]) -> LedgerSummary {
        let mut summary = LedgerSummary {
            total_income: 0.0,
            total_expense: 0.0,
            balance: 0.0,
            income_count: 0,
            expense_count: 0,
            savings_ratio: None,
        };
        for txn in transactions {
            match txn.kind {
                TransactionKind::Income => {
                    summary.total_income += txn.amount;
                    summary.income_count += 1;
                }
                TransactionKind::Expense => {
                    summary.total_expense += txn.amount;
                    summary.expense_count += 1;
                }
            }
        }
        summary.balance = summary.total_income - summary.total_expense;
        if summary.total_income > 0.0 {
            summary.savings_ratio = Some(summary.balance / summary.total_income * 100.0);
        }
        summary
    }

    /// Groups one kind by exact category label, largest amount first.
    pub fn category_breakdown(
        transactions: &[Transaction],
        kind: TransactionKind,
    ) -> CategoryBreakdown {
        let mut order: Vec<(String, f64)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for txn in transactions.iter().filter(|txn| txn.kind == kind) {
            match index.get(txn.category.as_str()) {
                Some(&slot) => order[slot].1 += txn.amount,
                None => {
                    index.insert(txn.category.as_str(), order.len());
                    order.push((txn.category.clone(), txn.amount));
                }
            }
        }

        // stable: ties stay in first-encounter order
        order.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let total: f64 = order.iter().map(|(_, amount)| amount).sum();
        let entries = order
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                percentage: if total > 0.0 {
                    amount / total * 100.0
                } else {
                    0.0
                },
                category,
                amount,
            })
            .collect();

        CategoryBreakdown {
            kind,
            total,
            entries,
        }
    }

    /// Income and expense per `YYYY/MM`, oldest month first.
    pub fn monthly_breakdown(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
        let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();
        for txn in transactions {
            let entry = months.entry(txn.month_key()).or_insert((0.0, 0.0));
            match txn.kind {
                TransactionKind::Income => entry.0 += txn.amount,
                TransactionKind::Expense => entry.1 += txn.amount,
            }
        }
        months
            .into_iter()
            .map(|(month, (income, expense))| MonthlyTotals {
                month,
                income,
                expense,
            })
            .collect()
    }
}
