//! The dashboard command: the landing view with its tab parameter.

use crate::cli::core::{format_date, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{render_table, section};
use crate::cli::registry::CommandEntry;
use crate::core::services::{BillService, ReportService};

use super::{bill, document, report};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "dashboard",
        "Show the dashboard (tabs: overview, bills, history, documents, budget)",
        "dashboard [overview|bills|history|documents|budget]",
        cmd_dashboard,
    )]
}

fn cmd_dashboard(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let tab = args.first().copied().unwrap_or("overview");
    match tab.to_ascii_lowercase().as_str() {
        "overview" | "dashboard" => handle_overview(context),
        "bills" => bill::handle_list(context, &[]),
        "history" => handle_history(context),
        "documents" => document::handle_list(context),
        "budget" => report::handle_budget(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown dashboard tab `{}`. Available: overview, bills, history, documents, budget",
            other
        ))),
    }
}

fn handle_overview(context: &mut ShellContext) -> CommandResult {
    let today = context.today();
    let summary = ReportService::dashboard(context.ledger(), today);

    section("Household Bill Manager");
    io::print_info(format!(
        "  Total Due This Month : {} ({} bills remaining)",
        context.format_amount(summary.due_this_month),
        summary.pending_this_month
    ));
    io::print_info(format!(
        "  Paid This Month      : {} ({} payments made)",
        context.format_amount(summary.paid_this_month),
        summary.payments_this_month
    ));
    match &summary.largest_category {
        Some(largest) => io::print_info(format!(
            "  Largest Category     : {} ({}% of monthly expenses)",
            largest.category, largest.share_percent
        )),
        None => io::print_info("  Largest Category     : -"),
    }
    io::print_info(format!(
        "  Upcoming Bills       : {} due in the next 7 days",
        summary.upcoming_week
    ));

    section("Upcoming Bills (next 30 days)");
    let upcoming: Vec<Vec<String>> = BillService::due_within(context.ledger(), today, 30)
        .iter()
        .map(|bill| {
            let days_left = (bill.due_date - today).num_days();
            vec![
                bill.name.clone(),
                format_date(bill.due_date),
                bill.category.clone(),
                context.format_amount(bill.amount),
                format!("{} days", days_left),
            ]
        })
        .collect();
    render_table(
        &["Name", "Due", "Category", "Amount", "Days Left"],
        &upcoming,
        "Nothing due in the next 30 days.",
    );

    section("Reminders");
    let reminders: Vec<Vec<String>> = context
        .ledger()
        .reminders
        .iter()
        .map(|reminder| {
            vec![
                reminder.title.clone(),
                format_date(reminder.date),
                reminder.method.label().to_string(),
            ]
        })
        .collect();
    render_table(
        &["Title", "Date", "Notification"],
        &reminders,
        "No reminders found.",
    );
    Ok(())
}

/// The history tab: every recorded payment across all bills, newest first.
fn handle_history(context: &mut ShellContext) -> CommandResult {
    section("Payment History");
    let mut rows: Vec<(chrono::NaiveDate, Vec<String>)> = Vec::new();
    for bill in &context.ledger().bills {
        for payment in &bill.payments {
            rows.push((
                payment.date,
                vec![
                    format_date(payment.date),
                    bill.name.clone(),
                    context.format_amount(payment.amount),
                    payment.method.clone(),
                ],
            ));
        }
    }
    rows.sort_by(|a, b| b.0.cmp(&a.0));
    let rows: Vec<Vec<String>> = rows.into_iter().map(|(_, row)| row).collect();
    render_table(
        &["Date", "Bill", "Amount", "Method"],
        &rows,
        "No payment history found.",
    );
    Ok(())
}
