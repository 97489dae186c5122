//! Reporting commands: budget usage, expense breakdown, monthly trend.

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{render_table, section};
use crate::cli::registry::CommandEntry;
use crate::core::services::ReportService;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "report",
        "Spending reports (budget, breakdown, monthly)",
        "report <budget|breakdown|monthly>",
        cmd_report,
    )]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, _)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: report <budget|breakdown|monthly>".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "budget" => handle_budget(context),
        "breakdown" => handle_breakdown(context),
        "monthly" | "trend" => handle_monthly(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown report `{}`. Available: budget, breakdown, monthly",
            other
        ))),
    }
}

pub(crate) fn handle_budget(context: &mut ShellContext) -> CommandResult {
    let report = ReportService::budget_report(&context.ledger().budgets);

    section("Budget Overview");
    io::print_info(format!("  Budget Usage : {}%", report.percent_used));
    io::print_info(format!(
        "  {} of {}",
        context.format_amount(report.total_actual),
        context.format_amount(report.total_budget)
    ));
    io::print_info(format!(
        "  {} remaining",
        context.format_amount(report.remaining)
    ));

    section("Category Breakdown");
    let rows: Vec<Vec<String>> = report
        .lines
        .iter()
        .map(|line| {
            vec![
                line.category.clone(),
                context.format_amount(line.budget),
                context.format_amount(line.actual),
                context.format_amount(line.difference()),
            ]
        })
        .collect();
    render_table(
        &["Category", "Budget", "Actual", "Difference"],
        &rows,
        "No budget data.",
    );
    Ok(())
}

fn handle_breakdown(context: &mut ShellContext) -> CommandResult {
    section("Expense Breakdown");
    let rows: Vec<Vec<String>> = ReportService::category_shares(&context.ledger().budgets)
        .into_iter()
        .map(|share| {
            vec![
                share.category.clone(),
                context.format_amount(share.actual),
                format!("{}%", share.share_percent),
            ]
        })
        .collect();
    render_table(&["Category", "Spend", "Share"], &rows, "No expense data.");
    Ok(())
}

fn handle_monthly(context: &mut ShellContext) -> CommandResult {
    section("Monthly Expenses");
    let rows: Vec<Vec<String>> = ReportService::monthly_trend(&context.ledger().monthly_history)
        .into_iter()
        .map(|row| {
            let savings = if row.savings >= 0.0 {
                format!("+{}", context.format_amount(row.savings))
            } else {
                format!("-{}", context.format_amount(row.savings.abs()))
            };
            vec![
                row.month.clone(),
                context.format_amount(row.expenses),
                context.format_amount(row.budget),
                savings,
            ]
        })
        .collect();
    render_table(
        &["Month", "Expenses", "Budget", "Savings"],
        &rows,
        "No monthly history.",
    );
    Ok(())
}
