//! Pure aggregate computations behind the reporting views. Nothing here
//! mutates the ledger; every value is recomputed from its inputs.

use chrono::{Datelike, NaiveDate};

use crate::ledger::{BillStatus, CategoryBudget, Ledger, MonthlySpend};

/// Budget usage for the current period, plus the per-category breakdown.
#[derive(Debug, Clone)]
pub struct BudgetReport {
    pub lines: Vec<CategoryBudget>,
    pub total_budget: f64,
    pub total_actual: f64,
    pub remaining: f64,
    /// `round(100 * total_actual / total_budget)`.
    pub percent_used: i64,
}

/// One category's share of total actual spend.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub actual: f64,
    pub share_percent: i64,
}

/// One month of the spending trend with derived savings.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTrendRow {
    pub month: String,
    pub expenses: f64,
    pub budget: f64,
    pub savings: f64,
}

/// The dashboard stat cards, derived from the live bill collection.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub due_this_month: f64,
    pub pending_this_month: usize,
    pub paid_this_month: f64,
    pub payments_this_month: usize,
    pub largest_category: Option<CategoryShare>,
    pub upcoming_week: usize,
}

pub struct ReportService;

impl ReportService {
    pub fn budget_report(lines: &[CategoryBudget]) -> BudgetReport {
        let total_budget: f64 = lines.iter().map(|line| line.budget).sum();
        let total_actual: f64 = lines.iter().map(|line| line.actual).sum();
        BudgetReport {
            lines: lines.to_vec(),
            total_budget,
            total_actual,
            remaining: total_budget - total_actual,
            percent_used: percent_of(total_actual, total_budget),
        }
    }

    pub fn category_shares(lines: &[CategoryBudget]) -> Vec<CategoryShare> {
        let total: f64 = lines.iter().map(|line| line.actual).sum();
        lines
            .iter()
            .map(|line| CategoryShare {
                category: line.category.clone(),
                actual: line.actual,
                share_percent: percent_of(line.actual, total),
            })
            .collect()
    }

    pub fn monthly_trend(history: &[MonthlySpend]) -> Vec<MonthlyTrendRow> {
        history
            .iter()
            .map(|month| MonthlyTrendRow {
                month: month.month.clone(),
                expenses: month.expenses,
                budget: month.budget,
                savings: month.savings(),
            })
            .collect()
    }

    pub fn dashboard(ledger: &Ledger, today: NaiveDate) -> DashboardSummary {
        let in_this_month = |date: NaiveDate| {
            date.year() == today.year() && date.month() == today.month()
        };

        let mut due_this_month = 0.0;
        let mut pending_this_month = 0;
        for bill in &ledger.bills {
            if bill.status == BillStatus::Pending && in_this_month(bill.due_date) {
                due_this_month += bill.amount;
                pending_this_month += 1;
            }
        }

        let mut paid_this_month = 0.0;
        let mut payments_this_month = 0;
        for bill in &ledger.bills {
            for payment in &bill.payments {
                if in_this_month(payment.date) {
                    paid_this_month += payment.amount;
                    payments_this_month += 1;
                }
            }
        }

        DashboardSummary {
            due_this_month,
            pending_this_month,
            paid_this_month,
            payments_this_month,
            largest_category: largest_category(ledger, today),
            upcoming_week: super::BillService::due_within(ledger, today, 7).len(),
        }
    }
}

/// Biggest category by total bill amount due this month, with its share.
fn largest_category(ledger: &Ledger, today: NaiveDate) -> Option<CategoryShare> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    let mut overall = 0.0;
    for bill in &ledger.bills {
        if bill.due_date.year() != today.year() || bill.due_date.month() != today.month() {
            continue;
        }
        overall += bill.amount;
        match totals
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(&bill.category))
        {
            Some((_, total)) => *total += bill.amount,
            None => totals.push((bill.category.clone(), bill.amount)),
        }
    }
    let (category, actual) = totals
        .into_iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))?;
    Some(CategoryShare {
        category,
        actual,
        share_percent: percent_of(actual, overall),
    })
}

fn percent_of(part: f64, whole: f64) -> i64 {
    if whole == 0.0 {
        return 0;
    }
    (100.0 * part / whole).round() as i64
}
