use std::path::PathBuf;

use spendview_core::{ExpenseService, RecordStore};

use super::{short_id, usage_error, CommandArgs};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::persistence::{load_snapshot_from_file, save_snapshot_to_file};

const ADD_USAGE: &str = "add <amount> [category] [--note <text>] [--date YYYY-MM-DD]";
const EDIT_USAGE: &str =
    "edit <id> [--amount <value>] [--category <name>] [--note <text>] [--date YYYY-MM-DD]";

pub(crate) fn entries() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "load",
            "Replace all expenses with a JSON snapshot file",
            "load [path]",
            cmd_load,
        ),
        CommandEntry::new(
            "save",
            "Write all expenses to a JSON snapshot file",
            "save [path]",
            cmd_save,
        ),
        CommandEntry::new("add", "Record a new expense", ADD_USAGE, cmd_add),
        CommandEntry::new("edit", "Change an existing expense", EDIT_USAGE, cmd_edit),
        CommandEntry::new("delete", "Delete one expense", "delete <id>", cmd_delete).aliases(&["rm"]),
        CommandEntry::new("clear", "Delete every expense", "clear", cmd_clear),
    ]
}

fn snapshot_path(context: &ShellContext, args: &[&str], usage: &str) -> Result<PathBuf, CommandError> {
    match args {
        [path] => Ok(PathBuf::from(*path)),
        [] => context
            .snapshot_path
            .clone()
            .or_else(|| context.config.last_snapshot.clone())
            .ok_or_else(|| usage_error(usage)),
        _ => Err(usage_error(usage)),
    }
}

fn remember_snapshot(context: &mut ShellContext, path: PathBuf) -> CommandResult {
    context.snapshot_path = Some(path.clone());
    if context.config.last_snapshot.as_ref() != Some(&path) {
        context.config.last_snapshot = Some(path);
        context.persist_config()?;
    }
    Ok(())
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = snapshot_path(context, args, "load [path]")?;
    let records = load_snapshot_from_file(&path)?;
    let count = records.len();
    context.store.replace_all(records);
    output::success(format!("Loaded {} expenses from `{}`.", count, path.display()));
    remember_snapshot(context, path)
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = snapshot_path(context, args, "save [path]")?;
    let records = context.store.snapshot();
    save_snapshot_to_file(&records, &path)?;
    output::success(format!("Saved {} expenses to `{}`.", records.len(), path.display()));
    remember_snapshot(context, path)
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = CommandArgs::parse(args, &["note", "date"])?;
    let amount = parsed.positional(0).ok_or_else(|| usage_error(ADD_USAGE))?;
    if parsed.positional_len() > 2 {
        return Err(CommandError::InvalidArguments(
            "too many arguments; quote notes that contain spaces".into(),
        ));
    }

    let mut draft = ExpenseService::blank_draft(context.default_entry_date());
    draft.amount = amount.to_string();
    if let Some(category) = parsed.positional(1) {
        draft.category = category.to_string();
    }
    if let Some(note) = parsed.option("note") {
        draft.note = note.to_string();
    }
    if let Some(date) = parsed.option("date") {
        draft.date = date.to_string();
    }

    let id = ExpenseService::create(&mut context.store, &draft)?;
    output::success(format!("Expense added ({}).", short_id(&id)));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = CommandArgs::parse(args, &["amount", "category", "note", "date"])?;
    let target = match (parsed.positional(0), parsed.positional_len()) {
        (Some(target), 1) => target,
        _ => return Err(usage_error(EDIT_USAGE)),
    };
    let id = context.resolve_id(target)?;
    let record = context
        .store
        .get(&id)
        .ok_or_else(|| CommandError::Message(format!("expense `{}` disappeared", id)))?;

    let mut draft = ExpenseService::draft_from_record(record);
    if let Some(amount) = parsed.option("amount") {
        draft.amount = amount.to_string();
    }
    if let Some(category) = parsed.option("category") {
        draft.category = category.to_string();
    }
    if let Some(note) = parsed.option("note") {
        draft.note = note.to_string();
    }
    if let Some(date) = parsed.option("date") {
        draft.date = date.to_string();
    }

    ExpenseService::edit(&mut context.store, &id, &draft)?;
    output::success(format!("Expense {} updated.", short_id(&id)));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [target] = args else {
        return Err(usage_error("delete <id>"));
    };
    let id = context.resolve_id(target)?;
    let removed = ExpenseService::delete(&mut context.store, &id)?;
    output::success(format!(
        "Deleted expense {} ({} {}).",
        short_id(&removed.id),
        context.config.format_amount(removed.effective_amount()),
        removed.effective_category()
    ));
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage_error("clear"));
    }
    if context.store.is_empty() {
        output::info("There are no expenses to delete.");
        return Ok(());
    }
    let prompt = format!("Delete all {} expenses?", context.store.len());
    if !context.confirm_action(&prompt)? {
        output::info("Nothing deleted.");
        return Ok(());
    }
    let removed = ExpenseService::delete_all(&mut context.store);
    output::success(format!("Deleted {} expenses.", removed));
    Ok(())
}
