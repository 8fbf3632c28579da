pub mod records;
pub mod system;
pub mod view;

use crate::cli::core::CommandError;
use crate::cli::registry::{CommandEntry, CommandGroup};

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let groups = [
        (CommandGroup::Records, records::entries()),
        (CommandGroup::View, view::entries()),
        (CommandGroup::System, system::entries()),
    ];
    groups
        .into_iter()
        .flat_map(|(group, entries)| entries.into_iter().map(move |entry| entry.in_group(group)))
        .collect()
}

/// Positional arguments plus `--name value` options.
pub(crate) struct CommandArgs<'a> {
    positional: Vec<&'a str>,
    options: Vec<(&'a str, &'a str)>,
}

impl<'a> CommandArgs<'a> {
    pub fn parse(args: &[&'a str], allowed: &[&str]) -> Result<Self, CommandError> {
        let mut positional = Vec::new();
        let mut options = Vec::new();
        let mut iter = args.iter().copied();
        while let Some(arg) = iter.next() {
            let Some(name) = arg.strip_prefix("--") else {
                positional.push(arg);
                continue;
            };
            if !allowed.contains(&name) {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown option `--{}`",
                    name
                )));
            }
            let value = iter.next().ok_or_else(|| {
                CommandError::InvalidArguments(format!("option `--{}` needs a value", name))
            })?;
            options.push((name, value));
        }
        Ok(Self {
            positional,
            options,
        })
    }

    pub fn positional(&self, idx: usize) -> Option<&'a str> {
        self.positional.get(idx).copied()
    }

    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }

    /// Last value given for `--name`.
    pub fn option(&self, name: &str) -> Option<&'a str> {
        self.options
            .iter()
            .rev()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", usage))
}

pub(crate) fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
