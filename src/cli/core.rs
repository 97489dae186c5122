//! Shell context, command dispatch, and shared CLI helpers.

use std::{env, path::PathBuf, time::Duration};

use chrono::{Local, NaiveDate};
use strsim::levenshtein;

use crate::{
    config::{Config, ConfigManager},
    core::services::ServiceError,
    core::{LedgerManager, LoadOutcome},
    errors::LedgerError,
    ledger::Ledger,
    storage::JsonStorage,
    upload::{UploadError, DEFAULT_UPLOAD_DELAY},
};

use super::commands;
use super::help;
use super::io as cli_io;
use super::registry::CommandRegistry;

/// Environment variable pointing the shell at an alternate app directory.
pub const HOME_ENV: &str = "BILLKEEP_HOME";
/// Environment variable that switches the shell into script mode.
pub const SCRIPT_ENV: &str = "BILLKEEP_CLI_SCRIPT";
/// Environment variable overriding the simulated upload delay (milliseconds).
pub const UPLOAD_DELAY_ENV: &str = "BILLKEEP_UPLOAD_DELAY_MS";

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

/// Failures surfaced by individual commands; none of them stop the shell.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Failures that terminate the whole shell.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Shared shell runtime state: the one ledger manager every command mutates,
/// the user config, and the command registry.
pub struct ShellContext {
    mode: CliMode,
    pub running: bool,
    manager: LedgerManager,
    config: Config,
    config_manager: ConfigManager,
    pub(crate) registry: CommandRegistry,
    upload_delay: Duration,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let root = env::var_os(HOME_ENV).map(PathBuf::from);
        let storage = JsonStorage::new(root, None)?;
        let config_manager = ConfigManager::new(storage.base_dir())?;
        let config = config_manager.load().unwrap_or_else(|err| {
            tracing::warn!(%err, "config unreadable, using defaults");
            Config::default()
        });
        let manager = LedgerManager::open(Box::new(storage))?;

        let context = Self {
            mode,
            running: true,
            manager,
            config,
            config_manager,
            registry: CommandRegistry::new(commands::all_definitions()),
            upload_delay: upload_delay_from_env(),
        };
        context.report_startup();
        Ok(context)
    }

    fn report_startup(&self) {
        match self.manager.last_outcome() {
            LoadOutcome::Loaded => cli_io::print_info(format!(
                "Loaded ledger from {}.",
                self.manager.snapshot_path().display()
            )),
            LoadOutcome::Seeded => {
                cli_io::print_info("No saved ledger found. Starting with sample data.")
            }
            LoadOutcome::FellBack => cli_io::print_warning(
                "Saved ledger could not be read. Starting with sample data.",
            ),
        }
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn ledger(&self) -> &Ledger {
        self.manager.ledger()
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        self.manager.ledger_mut()
    }

    pub fn manager(&self) -> &LedgerManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut LedgerManager {
        &mut self.manager
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub fn upload_delay(&self) -> Duration {
        self.upload_delay
    }

    /// Writes the snapshot after a mutation; every mutating command calls
    /// this so persistence rides along with the event that changed state.
    pub fn save_snapshot(&self) -> CommandResult {
        self.manager.save()?;
        Ok(())
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Formats an amount with the configured currency symbol.
    pub fn format_amount(&self, value: f64) -> String {
        let symbol = match self.config.currency.as_str() {
            "EUR" => "\u{20ac}",
            "GBP" => "\u{a3}",
            _ => "$",
        };
        format!("{}{:.2}", symbol, value)
    }

    /// Asks for confirmation in interactive mode; script mode says yes.
    pub fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(prompt, false)?)
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
        if let Some(entry) = self.registry.get(command) {
            let handler = entry.handler;
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
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action("Exit shell?", true).map_err(|err| {
            CliError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                err.to_string(),
            ))
        })
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_info("Use `help <command>` for usage details.");
            }
            other => cli_io::print_error(other.to_string()),
        }
    }

    pub fn print_help_overview(&self) {
        help::print_overview(&self.registry);
    }

    pub fn print_help_for(&self, name: &str) {
        match self.registry.get(name) {
            Some(entry) => help::print_command(entry),
            None => self.suggest_command(name),
        }
    }
}

fn upload_delay_from_env() -> Duration {
    env::var(UPLOAD_DELAY_ENV)
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_UPLOAD_DELAY)
}

/// Formats a date the way the dashboard tables do (`Jun 15, 2023`).
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Parses `YYYY-MM-DD`, the format dates use everywhere in the shell.
pub fn parse_date(value: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a date (expected YYYY-MM-DD)", value))
    })
}

/// Parses a positive amount the way the add-bill form does.
pub fn parse_amount(value: &str) -> Result<f64, CommandError> {
    let amount: f64 = value.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a number", value))
    })?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CommandError::InvalidArguments(
            "Amount must be a positive number".into(),
        ));
    }
    Ok(amount)
}

pub fn parse_id(value: &str) -> Result<u64, CommandError> {
    value.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a numeric id", value))
    })
}

/// First argument as an id, or a usage error.
pub fn required_id(args: &[&str], usage: &str) -> Result<u64, CommandError> {
    match args.first() {
        Some(value) => parse_id(value),
        None => Err(CommandError::InvalidArguments(format!("usage: {}", usage))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_and_rejects_noise() {
        assert!(parse_date("2025-03-27").is_ok());
        assert!(parse_date("27/03/2025").is_err());
        assert!(parse_date("soon").is_err());
    }

    #[test]
    fn parse_amount_requires_a_positive_number() {
        assert_eq!(parse_amount("125.50").unwrap(), 125.50);
        assert!(parse_amount("-3").is_err());
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("abc").is_err());
    }
}
