//! Snapshot commands: save, reload, reset, and backup management.

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{render_table, section};
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "ledger",
        "Snapshot operations (save, reload, reset, backup, backups, restore)",
        "ledger <save|reload|reset|backup|backups|restore> ...",
        cmd_ledger,
    )]
}

fn cmd_ledger(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: ledger <save|reload|reset|backup|backups|restore>".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "save" => handle_save(context),
        "reload" => handle_reload(context),
        "reset" => handle_reset(context),
        "backup" => handle_backup(context, rest),
        "backups" | "list-backups" => handle_list_backups(context),
        "restore" => handle_restore(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown ledger subcommand `{}`. Available: save, reload, reset, backup, backups, restore",
            other
        ))),
    }
}

fn handle_save(context: &mut ShellContext) -> CommandResult {
    let path = context.manager().save()?;
    io::print_success(format!("Ledger saved to {}.", path.display()));
    Ok(())
}

fn handle_reload(context: &mut ShellContext) -> CommandResult {
    context.manager_mut().reload()?;
    io::print_success("Ledger reloaded from disk.");
    Ok(())
}

fn handle_reset(context: &mut ShellContext) -> CommandResult {
    if !context.confirm("This will replace all data with the sample dataset. Continue?")? {
        return Ok(());
    }
    context.manager_mut().reset()?;
    io::print_success("Ledger reset to sample data.");
    Ok(())
}

fn handle_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    };
    let path = context.manager().backup(note.as_deref())?;
    io::print_success(format!("Backup created at {}.", path.display()));
    Ok(())
}

fn handle_list_backups(context: &mut ShellContext) -> CommandResult {
    section("Backups");
    let rows: Vec<Vec<String>> = context
        .manager()
        .list_backups()?
        .into_iter()
        .map(|name| vec![name])
        .collect();
    render_table(&["Name"], &rows, "No backups found.");
    Ok(())
}

fn handle_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: ledger restore <backup-name>".into(),
        ));
    };
    if !context.confirm("This will replace the current ledger with the backup. Continue?")? {
        return Ok(());
    }
    context.manager_mut().restore(name)?;
    io::print_success(format!("Restored backup {}.", name));
    Ok(())
}
