use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const CONFIG_USAGE: &str = "config [currency <symbol> | plain <on|off>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("save", "Write the ledger to disk now", "save", cmd_save),
        CommandEntry::new("config", "Show or change display preferences", CONFIG_USAGE, cmd_config),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.manager.save()?;
    output::success(format!(
        "Saved {} transaction(s) to {}.",
        context.manager.list().len(),
        context.manager.storage().describe()
    ));
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::section("Configuration");
            output::info(format!("  Currency symbol: {}", context.config.currency_symbol));
            output::info(format!(
                "  Plain mode     : {}",
                if context.config.plain_mode { "on" } else { "off" }
            ));
            output::info(format!(
                "  Data file      : {}",
                context.config_manager.data_file(&context.config).display()
            ));
            return Ok(());
        }
        [key, rest @ ..] if !rest.is_empty() => {
            let value = rest.join(" ");
            match key.to_lowercase().as_str() {
                "currency" => {
                    let symbol = value.trim();
                    if symbol.is_empty() {
                        return Err(CommandError::InvalidArguments(
                            "Currency symbol cannot be empty".into(),
                        ));
                    }
                    context.config.currency_symbol = symbol.to_string();
                }
                "plain" => {
                    context.config.plain_mode = parse_toggle(&value)?;
                }
                _ => {
                    return Err(CommandError::InvalidArguments(format!("Usage: {CONFIG_USAGE}")))
                }
            }
        }
        _ => return Err(CommandError::InvalidArguments(format!("Usage: {CONFIG_USAGE}"))),
    }

    context.apply_config();
    context.config_manager.save(&context.config)?;
    output::success("Preferences updated.");
    Ok(())
}

fn parse_toggle(value: &str) -> Result<bool, CommandError> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "Expected `on` or `off`, got `{other}`"
        ))),
    }
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        match context.registry.get(&name) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(args[0]),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
