//! Shell context, dispatch, and CLI error types.

use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    core::{Committed, LedgerManager},
    errors::LedgerError,
    ledger::Transaction,
    presentation::{Formatter, Table},
    storage::JsonStorage,
};

use super::commands;
use super::output::{self, OutputPreferences};
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure of a single command; the shell reports it and keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Prompt failed: {0}")]
    Prompt(String),
    #[error("Exit requested")]
    ExitRequested,
}

impl From<dialoguer::Error> for CommandError {
    fn from(err: dialoguer::Error) -> Self {
        CommandError::Prompt(err.to_string())
    }
}

/// Failure that stops the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Command(#[from] CommandError),
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: LedgerManager,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub format: Formatter,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                output::warning(format!(
                    "Could not read `{}` ({err}); using defaults.",
                    config_manager.path().display()
                ));
                Config::default()
            }
        };

        let storage = JsonStorage::new(config_manager.data_file(&config));
        let (manager, report) = LedgerManager::open(Box::new(storage));

        let context = Self::with_parts(mode, manager, config_manager, config);
        for warning in &report.warnings {
            output::warning(warning);
        }
        if mode == CliMode::Interactive {
            output::info(format!(
                "Loaded {} transaction(s) from `{}`.",
                report.loaded, report.source
            ));
        }
        Ok(context)
    }

    pub fn with_parts(
        mode: CliMode,
        manager: LedgerManager,
        config_manager: ConfigManager,
        config: Config,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        let mut context = Self {
            mode,
            registry,
            manager,
            config_manager,
            format: Formatter::default(),
            config,
            last_command: None,
            running: true,
        };
        context.apply_config();
        context
    }

    /// Pushes display settings from `config` into the formatter and output helpers.
    pub fn apply_config(&mut self) {
        self.format = Formatter::new(self.config.currency_symbol.clone(), self.config.plain_mode);
        output::set_preferences(OutputPreferences {
            plain_mode: self.config.plain_mode,
        });
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }

    /// Asks for confirmation interactively; scripts always proceed.
    pub(crate) fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(CommandError::from)
    }

    /// Prints the outcome of a persisted mutation, flagging a failed save.
    pub(crate) fn report_commit(&self, committed: &Committed<Transaction>, action: &str) {
        output::success(format!("Transaction {} {}.", committed.value.id, action));
        if let Some(err) = &committed.save_error {
            output::warning(format!(
                "The change is kept in memory but was not saved: {err}"
            ));
        }
    }

    pub(crate) fn print_table(&self, table: &Table) {
        output::table(table);
    }
}
