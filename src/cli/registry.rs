use std::collections::HashMap;

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Help sections, listed in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Records,
    View,
    System,
}

impl CommandGroup {
    pub const ALL: [CommandGroup; 3] = [CommandGroup::Records, CommandGroup::View, CommandGroup::System];

    pub fn title(&self) -> &'static str {
        match self {
            CommandGroup::Records => "Expenses",
            CommandGroup::View => "Views and selections",
            CommandGroup::System => "Shell",
        }
    }
}

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
    pub group: CommandGroup,
    pub aliases: &'static [&'static str],
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
            group: CommandGroup::System,
            aliases: &[],
        }
    }

    pub fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn in_group(mut self, group: CommandGroup) -> Self {
        self.group = group;
        self
    }
}

/// Command table in registration order. Names and aliases resolve
/// case-insensitively; the first registration of a word wins.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    lookup: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        if self.lookup.contains_key(entry.name) {
            return;
        }
        let index = self.entries.len();
        for word in std::iter::once(entry.name).chain(entry.aliases.iter().copied()) {
            self.lookup.entry(word).or_insert(index);
        }
        self.entries.push(entry);
    }

    pub fn get(&self, word: &str) -> Option<&CommandEntry> {
        let word = word.trim().to_lowercase();
        self.lookup.get(word.as_str()).map(|&index| &self.entries[index])
    }

    pub fn in_group(&self, group: CommandGroup) -> impl Iterator<Item = &CommandEntry> + '_ {
        self.entries.iter().filter(move |entry| entry.group == group)
    }

    /// Every word that dispatches: primary names first, then aliases.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        let aliases = self.entries.iter().enumerate().flat_map(move |(index, entry)| {
            entry
                .aliases
                .iter()
                .copied()
                .filter(move |alias| self.lookup.get(alias) == Some(&index))
        });
        self.entries.iter().map(|entry| entry.name).chain(aliases)
    }

    pub fn handler(&self, word: &str) -> Option<CommandHandler> {
        self.get(word).map(|entry| entry.handler)
    }
}
