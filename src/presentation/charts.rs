//! Chart series shapes and a text renderer for them.

use colored::Colorize;

use crate::core::services::{CategoryBreakdown, MonthlyTotals};
use crate::ledger::TransactionKind;

use super::reports::Formatter;

const DEFAULT_BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTone {
    Positive,
    Negative,
}

impl ChartTone {
    pub fn hint(&self) -> &'static str {
        match self {
            ChartTone::Positive => "positive-tone",
            ChartTone::Negative => "negative-tone",
        }
    }

    pub fn for_kind(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => ChartTone::Positive,
            TransactionKind::Expense => ChartTone::Negative,
        }
    }
}

/// Category to amount mapping for a pie-style chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries {
    pub title: String,
    pub tone: ChartTone,
    pub points: Vec<(String, f64)>,
}

impl CategorySeries {
    pub fn from_breakdown(breakdown: &CategoryBreakdown) -> Self {
        let title = match breakdown.kind {
            TransactionKind::Income => "Distribution of income by category",
            TransactionKind::Expense => "Distribution of expenses by category",
        };
        Self {
            title: title.to_string(),
            tone: ChartTone::for_kind(breakdown.kind),
            points: breakdown
                .entries
                .iter()
                .map(|entry| (entry.category.clone(), entry.amount))
                .collect(),
        }
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|(_, value)| value).sum()
    }
}

/// Per-month income and expense for a grouped bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries {
    pub title: String,
    pub months: Vec<String>,
    pub incomes: Vec<f64>,
    pub expenses: Vec<f64>,
}

impl MonthlySeries {
    pub fn from_monthly(months: &[MonthlyTotals]) -> Self {
        Self {
            title: "Income vs. expense by month".to_string(),
            months: months.iter().map(|m| m.month.clone()).collect(),
            incomes: months.iter().map(|m| m.income).collect(),
            expenses: months.iter().map(|m| m.expense).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

/// Seam for anything that can draw the two series shapes.
pub trait ChartRenderer {
    fn render_category(&self, series: &CategorySeries) -> String;
    fn render_monthly(&self, series: &MonthlySeries) -> String;
}

/// Draws proportional horizontal bars in the terminal.
pub struct TextChartRenderer {
    pub width: usize,
    pub format: Formatter,
}

impl TextChartRenderer {
    pub fn new(format: Formatter) -> Self {
        Self {
            width: DEFAULT_BAR_WIDTH,
            format,
        }
    }

    fn bar(&self, value: f64, max: f64, tone: ChartTone) -> String {
        let len = if max > 0.0 {
            ((value / max) * self.width as f64).round() as usize
        } else {
            0
        };
        let glyph = if self.format.plain { "#" } else { "█" };
        let bar = glyph.repeat(len);
        if self.format.plain {
            return bar;
        }
        match tone {
            ChartTone::Positive => bar.green().to_string(),
            ChartTone::Negative => bar.red().to_string(),
        }
    }
}

impl ChartRenderer for TextChartRenderer {
    fn render_category(&self, series: &CategorySeries) -> String {
        let mut lines = vec![series.title.clone()];
        let total = series.total();
        let max = series
            .points
            .iter()
            .map(|(_, value)| *value)
            .fold(0.0_f64, f64::max);
        let label_width = series
            .points
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);

        for (label, value) in &series.points {
            let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
            lines.push(format!(
                "{:<label_width$} {} {} ({})",
                label,
                self.bar(*value, max, series.tone),
                self.format.amount(*value),
                self.format.share(share),
            ));
        }
        lines.join("\n")
    }

    fn render_monthly(&self, series: &MonthlySeries) -> String {
        let mut lines = vec![series.title.clone()];
        let max = series
            .incomes
            .iter()
            .chain(series.expenses.iter())
            .copied()
            .fold(0.0_f64, f64::max);
        let month_width = series
            .months
            .iter()
            .map(|m| m.chars().count())
            .max()
            .unwrap_or(0);

        for (idx, month) in series.months.iter().enumerate() {
            let income = series.incomes.get(idx).copied().unwrap_or(0.0);
            let expense = series.expenses.get(idx).copied().unwrap_or(0.0);
            lines.push(format!(
                "{:<month_width$} income  {} {}",
                month,
                self.bar(income, max, ChartTone::Positive),
                self.format.amount(income),
            ));
            lines.push(format!(
                "{:<month_width$} expense {} {}",
                "",
                self.bar(expense, max, ChartTone::Negative),
                self.format.amount(expense),
            ));
        }
        lines.join("\n")
    }
}
