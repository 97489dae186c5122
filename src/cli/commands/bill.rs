//! Bill commands: the bills list/detail/add/edit pages of the dashboard.

use crate::cli::core::{
    format_date, parse_amount, parse_date, parse_id, required_id, CommandError, CommandResult,
    ShellContext,
};
use crate::cli::io;
use crate::cli::output::{render_table, section};
use crate::cli::registry::CommandEntry;
use crate::core::services::{BillDraft, BillService, DocumentService, MarkPaid};
use crate::ledger::{Bill, RecurringInterval};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "bill",
        "Bill operations (list, show, add, edit, delete, pay, search)",
        "bill <list|show|add|edit|delete|pay|search> ...",
        cmd_bill,
    )]
}

fn cmd_bill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: bill <list|show|add|edit|delete|pay|search>".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "list" => handle_list(context, rest),
        "show" => handle_show(context, rest),
        "add" => handle_add(context, rest),
        "edit" => handle_edit(context, rest),
        "delete" | "remove" => handle_delete(context, rest),
        "pay" => handle_pay(context, rest),
        "search" => handle_search(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown bill subcommand `{}`. Available: list, show, add, edit, delete, pay, search",
            other
        ))),
    }
}

pub(crate) fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let search = args.join(" ");
    let bills = BillService::filter(context.ledger(), &search);
    section("Bills");
    let rows: Vec<Vec<String>> = bills
        .iter()
        .map(|bill| {
            vec![
                bill.id.to_string(),
                bill.name.clone(),
                context.format_amount(bill.amount),
                format_date(bill.due_date),
                bill.category.clone(),
                bill.status.label().to_string(),
            ]
        })
        .collect();
    render_table(
        &["ID", "Name", "Amount", "Due Date", "Category", "Status"],
        &rows,
        "No bills found.",
    );
    Ok(())
}

fn handle_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: bill search <text>".into(),
        ));
    }
    handle_list(context, args)
}

fn handle_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = required_id(args, "bill show <id>")?;
    let ledger = context.ledger();
    let Some(bill) = ledger.bill(id) else {
        io::print_warning(format!("No bill with id {}.", id));
        return Ok(());
    };

    section(&bill.name);
    io::print_info(format!("  Amount    : {}", context.format_amount(bill.amount)));
    io::print_info(format!("  Due Date  : {}", format_date(bill.due_date)));
    io::print_info(format!("  Category  : {}", bill.category));
    io::print_info(format!("  Status    : {}", bill.status.label()));
    io::print_info(format!("  Recurring : {}", recurring_label(bill)));
    if let Some(description) = &bill.description {
        io::print_info(format!("  Details   : {}", description));
    }

    section("Payment History");
    let payments: Vec<Vec<String>> = bill
        .payments
        .iter()
        .map(|payment| {
            vec![
                format_date(payment.date),
                context.format_amount(payment.amount),
                payment.method.clone(),
                "Completed".to_string(),
            ]
        })
        .collect();
    render_table(
        &["Date", "Amount", "Method", "Status"],
        &payments,
        "No payment history found.",
    );

    section("Documents");
    let documents: Vec<Vec<String>> = DocumentService::for_bill(ledger, id)
        .iter()
        .map(|doc| {
            vec![
                doc.id.to_string(),
                doc.name.clone(),
                doc.size.clone(),
                format_date(doc.uploaded_at),
            ]
        })
        .collect();
    render_table(
        &["ID", "Name", "Size", "Uploaded"],
        &documents,
        "No documents attached.",
    );
    Ok(())
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = parse_draft(args, "bill add <name> <amount> <YYYY-MM-DD> <category>")?;
    let name = draft.name.clone();
    let id = BillService::add(context.ledger_mut(), draft)?;
    context.save_snapshot()?;
    io::print_success(format!("{} has been added to your bills (id {}).", name, id));
    Ok(())
}

fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((first, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: bill edit <id> <name> <amount> <YYYY-MM-DD> <category>".into(),
        ));
    };
    let id = parse_id(first)?;
    let draft = parse_draft(rest, "bill edit <id> <name> <amount> <YYYY-MM-DD> <category>")?;
    let name = draft.name.clone();
    BillService::edit(context.ledger_mut(), id, draft)?;
    context.save_snapshot()?;
    io::print_success(format!("{} has been updated.", name));
    Ok(())
}

fn handle_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = required_id(args, "bill delete <id>")?;
    if !context.confirm("This will delete the bill. This action cannot be undone. Continue?")? {
        return Ok(());
    }
    match BillService::remove(context.ledger_mut(), id) {
        Some(bill) => {
            context.save_snapshot()?;
            io::print_success(format!("{} has been removed from your bills.", bill.name));
        }
        None => io::print_warning(format!("No bill with id {}.", id)),
    }
    Ok(())
}

fn handle_pay(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = required_id(args, "bill pay <id>")?;
    let name = context
        .ledger()
        .bill(id)
        .map(|bill| bill.name.clone())
        .unwrap_or_default();
    let today = context.today();
    match BillService::mark_paid(context.ledger_mut(), id, today)? {
        MarkPaid::Paid => {
            context.save_snapshot()?;
            io::print_success(format!("{} has been marked as paid.", name));
        }
        MarkPaid::AlreadyPaid => {
            io::print_info(format!("{} is already paid.", name));
        }
    }
    Ok(())
}

fn parse_draft(args: &[&str], usage: &str) -> Result<BillDraft, CommandError> {
    if args.len() < 4 {
        return Err(CommandError::InvalidArguments(format!("usage: {}", usage)));
    }
    let mut draft = BillDraft {
        name: args[0].to_string(),
        amount: parse_amount(args[1])?,
        due_date: Some(parse_date(args[2])?),
        category: args[3].to_string(),
        ..BillDraft::default()
    };

    let mut rest = args[4..].iter();
    while let Some(flag) = rest.next() {
        match *flag {
            "--recurring" => {
                let value = rest.next().ok_or_else(|| {
                    CommandError::InvalidArguments(
                        "--recurring needs an interval (weekly, biweekly, monthly, quarterly, yearly)"
                            .into(),
                    )
                })?;
                let interval = RecurringInterval::parse(value).ok_or_else(|| {
                    CommandError::InvalidArguments(format!("unknown interval `{}`", value))
                })?;
                draft.recurring = true;
                draft.recurring_interval = Some(interval);
            }
            "--desc" => {
                let text: Vec<&str> = rest.by_ref().copied().collect();
                if text.is_empty() {
                    return Err(CommandError::InvalidArguments(
                        "--desc needs a description".into(),
                    ));
                }
                draft.description = Some(text.join(" "));
            }
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown flag `{}`",
                    other
                )))
            }
        }
    }
    Ok(draft)
}

fn recurring_label(bill: &Bill) -> String {
    match (&bill.recurring, &bill.recurring_interval) {
        (true, Some(interval)) => format!("Yes ({})", interval.label()),
        (true, None) => "Yes".to_string(),
        _ => "No".to_string(),
    }
}
