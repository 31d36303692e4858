//! Tabular text views of transactions and aggregation results.

use crate::core::services::{CategoryBreakdown, LedgerSummary, MonthlyTotals};
use crate::ledger::{Transaction, TransactionKind};

use super::table::{Table, TableColumn};

const DESCRIPTION_WIDTH: usize = 32;
const CATEGORY_WIDTH: usize = 24;

/// Number formatting shared by tables and charts.
#[derive(Debug, Clone)]
pub struct Formatter {
    pub currency_symbol: String,
    pub plain: bool,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            plain: false,
        }
    }
}

impl Formatter {
    pub fn new(currency_symbol: impl Into<String>, plain: bool) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            plain,
        }
    }

    pub fn amount(&self, value: f64) -> String {
        if value < 0.0 {
            format!("-{}{:.2}", self.currency_symbol, value.abs())
        } else {
            format!("{}{:.2}", self.currency_symbol, value)
        }
    }

    /// One decimal, matching pie-chart labels.
    pub fn share(&self, value: f64) -> String {
        format!("{value:.1}%")
    }

    fn table(&self, columns: Vec<TableColumn>) -> Table {
        let mut table = Table::new(columns);
        table.plain = self.plain;
        table
    }
}

pub fn transactions_table<'a, I>(transactions: I, fmt: &Formatter) -> Table
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut table = fmt.table(vec![
        TableColumn::right("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Kind"),
        TableColumn::left("Category").max_width(CATEGORY_WIDTH),
        TableColumn::right("Amount"),
        TableColumn::left("Description").max_width(DESCRIPTION_WIDTH),
    ]);
    for txn in transactions {
        table.push_row(vec![
            txn.id.to_string(),
            txn.date.to_string(),
            txn.kind.to_string(),
            txn.category.clone(),
            fmt.amount(txn.amount),
            txn.description.clone(),
        ]);
    }
    table
}

pub fn summary_table(summary: &LedgerSummary, fmt: &Formatter) -> Table {
    let mut table = fmt.table(vec![TableColumn::left("Metric"), TableColumn::right("Value")]);
    let ratio = summary
        .savings_ratio
        .map(|ratio| format!("{ratio:.2}%"))
        .unwrap_or_else(|| "n/a".into());
    let rows = [
        ("Total income", fmt.amount(summary.total_income)),
        ("Total expense", fmt.amount(summary.total_expense)),
        ("Balance", fmt.amount(summary.balance)),
        ("Income entries", summary.income_count.to_string()),
        ("Expense entries", summary.expense_count.to_string()),
        ("Savings ratio", ratio),
    ];
    for (label, value) in rows {
        table.push_row(vec![label.to_string(), value]);
    }
    table
}

pub fn category_table(breakdown: &CategoryBreakdown, fmt: &Formatter) -> Table {
    let mut table = fmt.table(vec![
        TableColumn::left("Category").max_width(CATEGORY_WIDTH),
        TableColumn::right("Amount"),
        TableColumn::right("Share"),
    ]);
    for entry in &breakdown.entries {
        table.push_row(vec![
            entry.category.clone(),
            fmt.amount(entry.amount),
            fmt.share(entry.percentage),
        ]);
    }
    table
}

pub fn monthly_table(months: &[MonthlyTotals], fmt: &Formatter) -> Table {
    let mut table = fmt.table(vec![
        TableColumn::left("Month"),
        TableColumn::right("Income"),
        TableColumn::right("Expense"),
        TableColumn::right("Balance"),
    ]);
    for month in months {
        table.push_row(vec![
            month.month.clone(),
            fmt.amount(month.income),
            fmt.amount(month.expense),
            fmt.amount(month.balance()),
        ]);
    }
    table
}

pub fn category_heading(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "Income by category",
        TransactionKind::Expense => "Expenses by category",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::SummaryService;
    use crate::ledger::{Ledger, TransactionDraft, TxnDate};

    fn scenario() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .create(
                TransactionDraft::new(TransactionKind::Income, 1000.0, "Salary")
                    .with_date(TxnDate::parse("2024/01/15").unwrap()),
            )
            .unwrap();
        ledger
            .create(
                TransactionDraft::new(TransactionKind::Expense, 300.0, "Food")
                    .with_description("Weekly groceries")
                    .with_date(TxnDate::parse("2024/01/20").unwrap()),
            )
            .unwrap();
        ledger
    }

    #[test]
    fn amounts_keep_sign_outside_symbol() {
        let fmt = Formatter::default();
        assert_eq!(fmt.amount(700.0), "$700.00");
        assert_eq!(fmt.amount(-50.5), "-$50.50");
        assert_eq!(fmt.share(33.333), "33.3%");
    }

    #[test]
    fn summary_table_shows_savings_ratio() {
        let ledger = scenario();
        let summary = SummaryService::summary(ledger.list());
        let rendered = summary_table(&summary, &Formatter::new("$", true)).render();
        assert!(rendered.contains("Balance"));
        assert!(rendered.contains("$700.00"));
        assert!(rendered.contains("70.00%"));
    }

    #[test]
    fn summary_table_marks_missing_ratio() {
        let summary = SummaryService::summary(&[]);
        let rendered = summary_table(&summary, &Formatter::new("$", true)).render();
        assert!(rendered.contains("n/a"));
    }

    #[test]
    fn transactions_table_lists_every_row() {
        let ledger = scenario();
        let table = transactions_table(ledger.list(), &Formatter::new("$", true));
        assert_eq!(table.rows.len(), 2);
        let rendered = table.render();
        assert!(rendered.contains("2024/01/20"));
        assert!(rendered.contains("Weekly groceries"));
    }

    #[test]
    fn monthly_table_includes_balance_column() {
        let ledger = scenario();
        let months = SummaryService::monthly_breakdown(ledger.list());
        let table = monthly_table(&months, &Formatter::new("$", true));
        assert_eq!(
            table.rows[0],
            vec!["2024/01", "$1000.00", "$300.00", "$700.00"]
        );
    }
}
