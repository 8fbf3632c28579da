//! Shell state, dispatch, and error reporting.

use std::{
    cell::{Ref, RefCell, RefMut},
    env, io,
    path::PathBuf,
    rc::Rc,
};

use chrono::{DateTime, FixedOffset, NaiveDate};
use dialoguer::Confirm;
use spendview_config::{Config, ConfigError, ConfigManager};
use spendview_core::{
    attach, Clock, CoreError, FixedClock, MemoryStore, RecomputeController, RecordStore,
    SystemClock,
};
use spendview_domain::{FilterState, Surface};
use strsim::levenshtein;
use tracing::warn;

pub use crate::errors::CliError;
use crate::errors::SpendError;
use crate::utils::persistence;

use super::commands;
use super::output::{self, OutputPreferences};
use super::registry::CommandRegistry;

/// Set to run the shell non-interactively over stdin.
pub const SCRIPT_ENV_VAR: &str = "SPENDVIEW_CLI_SCRIPT";
/// RFC 3339 instant that pins the shell clock.
pub const NOW_ENV_VAR: &str = "SPENDVIEW_NOW";

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

/// Wall clock, or a pinned instant taken from `SPENDVIEW_NOW`.
#[derive(Debug, Clone, Copy)]
pub enum ShellClock {
    System(SystemClock),
    Fixed(FixedClock),
}

impl ShellClock {
    pub fn from_env() -> Result<Self, CliError> {
        match env::var(NOW_ENV_VAR) {
            Ok(raw) if !raw.trim().is_empty() => DateTime::parse_from_rfc3339(raw.trim())
                .map(|now| ShellClock::Fixed(FixedClock(now)))
                .map_err(|err| CliError::Input(format!("{NOW_ENV_VAR}: {err}"))),
            _ => Ok(ShellClock::System(SystemClock)),
        }
    }
}

impl Clock for ShellClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self {
            ShellClock::System(clock) => clock.now(),
            ShellClock::Fixed(clock) => clock.now(),
        }
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    pub last_command: Option<String>,
    pub(crate) registry: CommandRegistry,
    pub(crate) store: MemoryStore,
    pub(crate) controller: Rc<RefCell<RecomputeController<ShellClock>>>,
    pub(crate) clock: ShellClock,
    pub(crate) config_manager: ConfigManager,
    pub(crate) config: Config,
    pub(crate) snapshot_path: Option<PathBuf>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
        });

        let clock = ShellClock::from_env()?;
        let controller = Rc::new(RefCell::new(
            RecomputeController::new(Surface::Dashboard, clock)
                .with_filters(surface_defaults(&config, Surface::Dashboard)),
        ));
        let mut store = MemoryStore::new();
        attach(&mut store, &controller);

        let mut registry = CommandRegistry::new();
        for entry in commands::all_entries() {
            registry.register(entry);
        }

        let mut context = Self {
            mode,
            running: true,
            last_command: None,
            registry,
            store,
            controller,
            clock,
            config_manager,
            config,
            snapshot_path: None,
        };
        context.auto_load_last();
        Ok(context)
    }

    fn auto_load_last(&mut self) {
        if self.mode != CliMode::Interactive {
            return;
        }
        let Some(path) = self.config.last_snapshot.clone() else {
            return;
        };
        match persistence::load_snapshot_from_file(&path) {
            Ok(records) => {
                let count = records.len();
                self.store.replace_all(records);
                output::success(format!(
                    "Automatically loaded {} expenses from `{}`.",
                    count,
                    path.display()
                ));
                self.snapshot_path = Some(path);
            }
            Err(err) => warn!(path = %path.display(), error = %err, "last snapshot not loaded"),
        }
    }

    pub(crate) fn controller(&self) -> Ref<'_, RecomputeController<ShellClock>> {
        self.controller.borrow()
    }

    pub(crate) fn controller_mut(&self) -> RefMut<'_, RecomputeController<ShellClock>> {
        self.controller.borrow_mut()
    }

    /// Default date for new entries. Date-only entries are stored at UTC
    /// midnight, so the UTC date keeps them from landing after `now`.
    pub(crate) fn default_entry_date(&self) -> NaiveDate {
        self.clock.utc_today()
    }

    /// Starting selections for `surface`, honoring the configured dashboard preferences.
    pub(crate) fn surface_defaults(&self, surface: Surface) -> FilterState {
        surface_defaults(&self.config, surface)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        format!("spendview [{}]> ", self.controller().surface())
    }

    /// Full id for `input`, which may be any unique prefix of a stored id.
    pub(crate) fn resolve_id(&self, input: &str) -> Result<String, CommandError> {
        let needle = input.trim();
        if needle.is_empty() {
            return Err(CommandError::InvalidArguments("expense id is required".into()));
        }
        if self.store.get(needle).is_some() {
            return Ok(needle.to_string());
        }
        let matches: Vec<String> = self
            .store
            .snapshot()
            .into_iter()
            .filter(|record| record.id.starts_with(needle))
            .map(|record| record.id)
            .collect();
        match matches.as_slice() {
            [only] => Ok(only.clone()),
            [] => Err(SpendError::ExpenseNotFound(needle.to_string()).into()),
            _ => Err(CommandError::InvalidArguments(format!(
                "id prefix `{}` matches {} expenses",
                needle,
                matches.len()
            ))),
        }
    }

    pub(crate) fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager.save(&self.config)?;
        Ok(())
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

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    /// Asks before destructive actions. Script mode always proceeds.
    pub(crate) fn confirm_action(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        self.confirm_action("Exit shell?").map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(&message);
                output::info("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Io(err) if self.mode == CliMode::Script => Err(err.into()),
            other => {
                output::error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn print_warning(&self, message: &str) {
        output::warning(message);
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }
}

fn surface_defaults(config: &Config, surface: Surface) -> FilterState {
    let defaults = surface.default_filters().with_sort(config.default_sort);
    match surface {
        Surface::Dashboard => defaults.with_time_window(config.dashboard_window),
        Surface::Filters => defaults,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] SpendError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        CommandError::Core(SpendError::from(err))
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::Core(SpendError::from(err))
    }
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(inner) => CommandError::Core(inner),
            CliError::Input(message) | CliError::Command(message) => {
                CommandError::InvalidArguments(message)
            }
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

#[cfg(test)]
pub(crate) fn process_script(lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::new(CliMode::Script)?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}
