//! Turns aggregation results into text tables and chart series.

pub mod charts;
pub mod reports;
pub mod table;

pub use charts::{CategorySeries, ChartRenderer, ChartTone, MonthlySeries, TextChartRenderer};
pub use reports::{
    category_heading, category_table, monthly_table, summary_table, transactions_table, Formatter,
};
pub use table::{Alignment, Table, TableColumn};
