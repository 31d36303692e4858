use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::SummaryService;
use crate::ledger::TransactionKind;
use crate::presentation::{
    category_heading, category_table, monthly_table, summary_table, CategorySeries,
    ChartRenderer, MonthlySeries, TextChartRenderer,
};

const CATEGORIES_USAGE: &str = "categories [income|expense]";
const CHART_USAGE: &str = "chart <expense|income|monthly>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("summary", "Show totals, balance and savings ratio", "summary", cmd_summary),
        CommandEntry::new(
            "categories",
            "Break totals down by category",
            CATEGORIES_USAGE,
            cmd_categories,
        ),
        CommandEntry::new("monthly", "Show income and expense per month", "monthly", cmd_monthly),
        CommandEntry::new("chart", "Draw a chart in the terminal", CHART_USAGE, cmd_chart),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = SummaryService::summary(context.manager.list());
    output::section("Financial summary");
    context.print_table(&summary_table(&summary, &context.format));
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = match args.first() {
        Some(raw) => raw.parse::<TransactionKind>()?,
        None => TransactionKind::Expense,
    };
    let breakdown = SummaryService::category_breakdown(context.manager.list(), kind);
    output::section(category_heading(kind));
    if breakdown.is_empty() {
        output::info(format!("No {kind} transactions recorded."));
        return Ok(());
    }
    context.print_table(&category_table(&breakdown, &context.format));
    output::info(format!("Total: {}", context.format.amount(breakdown.total)));
    Ok(())
}

fn cmd_monthly(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let months = SummaryService::monthly_breakdown(context.manager.list());
    output::section("Monthly breakdown");
    if months.is_empty() {
        output::info("No transactions recorded yet.");
        return Ok(());
    }
    context.print_table(&monthly_table(&months, &context.format));
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(which) = args.first().map(|raw| raw.to_lowercase()) else {
        return Err(CommandError::InvalidArguments(format!("Usage: {CHART_USAGE}")));
    };
    let transactions = context.manager.list();
    if transactions.is_empty() {
        output::warning("No transaction found!");
        return Ok(());
    }

    let renderer = TextChartRenderer::new(context.format.clone());
    let rendered = match which.as_str() {
        "monthly" => {
            let months = SummaryService::monthly_breakdown(transactions);
            renderer.render_monthly(&MonthlySeries::from_monthly(&months))
        }
        other => {
            let kind: TransactionKind = other.parse()?;
            let breakdown = SummaryService::category_breakdown(transactions, kind);
            if breakdown.is_empty() {
                output::info(format!("No {kind} transactions to chart."));
                return Ok(());
            }
            renderer.render_category(&CategorySeries::from_breakdown(&breakdown))
        }
    };
    output::block(rendered);
    Ok(())
}
