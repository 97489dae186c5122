use crate::cli::core::{
    format_date, parse_date, required_id, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::output::{render_table, section};
use crate::cli::registry::CommandEntry;
use crate::core::services::{ReminderDraft, ReminderService};
use crate::ledger::NotifyMethod;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "reminder",
        "Reminder operations (list, add, delete)",
        "reminder <list|add|delete> ...",
        cmd_reminder,
    )]
}

fn cmd_reminder(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: reminder <list|add|delete>".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "list" => handle_list(context),
        "add" => handle_add(context, rest),
        "delete" | "remove" => handle_delete(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown reminder subcommand `{}`. Available: list, add, delete",
            other
        ))),
    }
}

pub(crate) fn handle_list(context: &mut ShellContext) -> CommandResult {
    section("Reminders");
    let rows: Vec<Vec<String>> = context
        .ledger()
        .reminders
        .iter()
        .map(|reminder| {
            vec![
                reminder.id.to_string(),
                reminder.title.clone(),
                format_date(reminder.date),
                reminder.method.label().to_string(),
                reminder.description.clone(),
            ]
        })
        .collect();
    render_table(
        &["ID", "Title", "Date", "Notification", "Description"],
        &rows,
        "No reminders found. Add a reminder to get started.",
    );
    Ok(())
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: reminder add <title> <YYYY-MM-DD> [--method email|sms|push] [--desc <text>]"
                .into(),
        ));
    }
    let mut draft = ReminderDraft {
        title: args[0].to_string(),
        description: String::new(),
        date: parse_date(args[1])?,
        method: NotifyMethod::Email,
    };

    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        match *flag {
            "--method" => {
                let value = rest.next().ok_or_else(|| {
                    CommandError::InvalidArguments("--method needs email, sms, or push".into())
                })?;
                draft.method = NotifyMethod::parse(value).ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "unknown notification method `{}`",
                        value
                    ))
                })?;
            }
            "--desc" => {
                let text: Vec<&str> = rest.by_ref().copied().collect();
                if text.is_empty() {
                    return Err(CommandError::InvalidArguments(
                        "--desc needs a description".into(),
                    ));
                }
                draft.description = text.join(" ");
            }
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown flag `{}`",
                    other
                )))
            }
        }
    }

    let title = draft.title.clone();
    let date = draft.date;
    let today = context.today();
    ReminderService::add(context.ledger_mut(), draft, today)?;
    context.save_snapshot()?;
    io::print_success(format!(
        "Reminder for \"{}\" has been set for {}.",
        title,
        format_date(date)
    ));
    Ok(())
}

fn handle_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = required_id(args, "reminder delete <id>")?;
    let Some(title) = context.ledger().reminder(id).map(|r| r.title.clone()) else {
        io::print_warning(format!("No reminder with id {}.", id));
        return Ok(());
    };
    if !context
        .confirm("This will delete the reminder. This action cannot be undone. Continue?")?
    {
        return Ok(());
    }
    ReminderService::remove(context.ledger_mut(), id)?;
    context.save_snapshot()?;
    io::print_success(format!("Reminder \"{}\" has been deleted.", title));
    Ok(())
}
