use crate::cli::core::{required_id, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{render_table, section};
use crate::cli::registry::CommandEntry;
use crate::core::services::CategoryService;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "category",
        "Category operations (list, add, delete)",
        "category <list|add|delete> ...",
        cmd_category,
    )]
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: category <list|add|delete>".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "list" => handle_list(context),
        "add" => handle_add(context, rest),
        "delete" | "remove" => handle_delete(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown category subcommand `{}`. Available: list, add, delete",
            other
        ))),
    }
}

pub(crate) fn handle_list(context: &mut ShellContext) -> CommandResult {
    section("Bill Categories");
    let rows: Vec<Vec<String>> = CategoryService::list(context.ledger())
        .into_iter()
        .map(|summary| {
            vec![
                summary.id.to_string(),
                summary.name,
                format!("{} bills", summary.bill_count),
            ]
        })
        .collect();
    render_table(&["ID", "Name", "Bills"], &rows, "No categories found.");
    Ok(())
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: category add <name>".into(),
        ));
    }
    let name = args.join(" ");
    CategoryService::add(context.ledger_mut(), &name)?;
    context.save_snapshot()?;
    io::print_success(format!("{} has been added to your categories.", name.trim()));
    Ok(())
}

fn handle_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = required_id(args, "category delete <id>")?;
    let Some(name) = context.ledger().category(id).map(|c| c.name.clone()) else {
        io::print_warning(format!("No category with id {}.", id));
        return Ok(());
    };
    if !context.confirm(&format!(
        "This will delete the \"{}\" category. This action cannot be undone. Continue?",
        name
    ))? {
        return Ok(());
    }
    CategoryService::remove(context.ledger_mut(), id)?;
    context.save_snapshot()?;
    io::print_success(format!("{} has been removed from your categories.", name));
    Ok(())
}
