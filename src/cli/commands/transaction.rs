use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::{QueryService, TransactionFilter};
use crate::errors::LedgerError;
use crate::ledger::{parse_amount, TransactionDraft, TransactionKind, TransactionUpdate, TxnDate};
use crate::presentation::transactions_table;

use super::parse_id;

const ADD_USAGE: &str = "add <income|expense> <amount> <category> [description] [YYYY/MM/DD]";
const SHOW_USAGE: &str = "show <id>";
const EDIT_USAGE: &str = "edit <id> <kind|amount|category|description|date> <value>";
const DELETE_USAGE: &str = "delete <id>";
const SEARCH_USAGE: &str = "search <category|date|kind|description> <term>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new("list", "Show the transaction history", "list", cmd_list),
        CommandEntry::new("show", "Show one transaction", SHOW_USAGE, cmd_show),
        CommandEntry::new("edit", "Change one field of a transaction", EDIT_USAGE, cmd_edit),
        CommandEntry::new("delete", "Remove a transaction", DELETE_USAGE, cmd_delete),
        CommandEntry::new("search", "Find transactions by field", SEARCH_USAGE, cmd_search),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !(3..=5).contains(&args.len()) {
        return Err(CommandError::InvalidArguments(format!("Usage: {ADD_USAGE}")));
    }
    let kind: TransactionKind = args[0].parse()?;
    let amount = parse_amount(args[1])?;
    let mut draft = TransactionDraft::new(kind, amount, args[2]);

    match &args[3..] {
        [] => {}
        // a lone date-shaped argument is the date and must be valid
        [single] if looks_like_date(single) => draft = draft.with_date(TxnDate::parse(single)?),
        [single] => draft = draft.with_description(*single),
        [description, date, ..] => {
            draft = draft
                .with_description(*description)
                .with_date(TxnDate::parse(date)?);
        }
    }

    let committed = context.manager.create(draft)?;
    context.report_commit(&committed, "added");
    Ok(())
}

/// Three digit groups joined by `/`, `-` or `.`, with a four-digit year first.
fn looks_like_date(token: &str) -> bool {
    let parts: Vec<&str> = token.split(['/', '-', '.']).collect();
    match parts.as_slice() {
        [year, month, day] => {
            year.len() == 4
                && (1..=2).contains(&month.len())
                && (1..=2).contains(&day.len())
                && parts.iter().all(|part| part.chars().all(|c| c.is_ascii_digit()))
        }
        _ => false,
    }
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let transactions = context.manager.list();
    if transactions.is_empty() {
        output::info("No transactions recorded yet.");
        return Ok(());
    }
    output::section("Transaction history");
    context.print_table(&transactions_table(transactions, &context.format));
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(args, SHOW_USAGE)?;
    match context.manager.find_by_id(id) {
        Some(txn) => context.print_table(&transactions_table([txn], &context.format)),
        None => output::warning(format!("Transaction {id} not found.")),
    }
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(format!("Usage: {EDIT_USAGE}")));
    }
    let id = parse_id(args, EDIT_USAGE)?;
    let value = args[2..].join(" ");
    let update = TransactionUpdate::parse(args[1], &value)?;
    let committed = context.manager.update(id, update)?;
    context.report_commit(&committed, "updated");
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(args, DELETE_USAGE)?;
    let Some(txn) = context.manager.find_by_id(id) else {
        return Err(LedgerError::NotFound(id).into());
    };
    let prompt = format!(
        "Delete transaction {} ({} {} {})?",
        txn.id,
        txn.kind,
        context.format.amount(txn.amount),
        txn.category
    );
    if !context.confirm(&prompt, false)? {
        output::info("Deletion cancelled.");
        return Ok(());
    }
    let committed = context.manager.delete(id)?;
    context.report_commit(&committed, "deleted");
    if !context.manager.list().is_empty() {
        output::info("Remaining transactions were renumbered.");
    }
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(format!("Usage: {SEARCH_USAGE}")));
    }
    let term = args[1..].join(" ");
    let filter = TransactionFilter::parse(args[0], &term)?;
    let found = QueryService::apply(context.manager.list(), &filter)?;
    if found.is_empty() {
        output::info(format!("No transactions found for {} `{}`.", args[0], term));
        return Ok(());
    }
    output::section(format!("{} result(s)", found.len()));
    context.print_table(&transactions_table(found, &context.format));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::looks_like_date;

    #[test]
    fn date_shaped_tokens_are_recognised() {
        for token in ["2024/01/05", "2024-01-05", "2024.1.5", "2024/02/30"] {
            assert!(looks_like_date(token), "{token}");
        }
        for token in ["lunch", "2024", "24/01/05", "2024/01/05/1", "20a4/01/05", "2024//05"] {
            assert!(!looks_like_date(token), "{token}");
        }
    }
}
