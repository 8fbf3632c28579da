use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandGroup, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    for group in CommandGroup::ALL {
        let mut entries = registry.in_group(group).peekable();
        if entries.peek().is_none() {
            continue;
        }
        output::plain(format!("{}:", group.title()));
        for entry in entries {
            output::plain(format!("  {:<12} {}", entry.name, entry.description));
        }
    }
    output::info("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::plain(format!("  Description: {}", entry.description));
    output::plain(format!("  Usage: {}", entry.usage));
    if !entry.aliases.is_empty() {
        output::plain(format!("  Aliases: {}", entry.aliases.join(", ")));
    }
}
