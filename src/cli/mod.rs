mod commands;
pub mod core;
mod help;
pub mod output;
mod registry;
mod shell;

pub use self::core::{CliMode, CommandError, ShellContext};
pub use shell::run_cli;
