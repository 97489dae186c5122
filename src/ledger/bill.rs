use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Method label recorded when a bill is marked paid from the dashboard.
pub const DEFAULT_PAYMENT_METHOD: &str = "Credit Card";

/// A payable obligation tracked by name, amount, due date, category, and status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: u64,
    pub name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub category: String,
    pub status: BillStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_interval: Option<RecurringInterval>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Bill {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        amount: f64,
        due_date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
            due_date,
            category: category.into(),
            status: BillStatus::Pending,
            description: None,
            recurring: false,
            recurring_interval: None,
            payments: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_recurrence(mut self, interval: RecurringInterval) -> Self {
        self.recurring = true;
        self.recurring_interval = Some(interval);
        self
    }

    pub fn is_paid(&self) -> bool {
        matches!(self.status, BillStatus::Paid)
    }

    /// Records a payment of the full bill amount and flips the status.
    ///
    /// Payments are prepended so the newest entry leads the history, matching
    /// the display order of the payment list.
    pub fn record_payment(&mut self, date: NaiveDate, method: impl Into<String>) -> &Payment {
        let id = self.next_payment_id();
        self.payments.insert(
            0,
            Payment {
                id,
                date,
                amount: self.amount,
                method: method.into(),
            },
        );
        self.status = BillStatus::Paid;
        &self.payments[0]
    }

    fn next_payment_id(&self) -> u64 {
        self.payments.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }
}

/// Two-state bill lifecycle; the observed flows never go back to pending.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Paid,
}

impl BillStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "Pending",
            BillStatus::Paid => "Paid",
        }
    }
}

/// A historical record of a bill having been paid. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: u64,
    pub date: NaiveDate,
    pub amount: f64,
    pub method: String,
}

/// Cadence at which a recurring bill repeats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurringInterval {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl RecurringInterval {
    pub const ALL: [RecurringInterval; 5] = [
        RecurringInterval::Weekly,
        RecurringInterval::Biweekly,
        RecurringInterval::Monthly,
        RecurringInterval::Quarterly,
        RecurringInterval::Yearly,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RecurringInterval::Weekly => "Weekly",
            RecurringInterval::Biweekly => "Bi-weekly",
            RecurringInterval::Monthly => "Monthly",
            RecurringInterval::Quarterly => "Quarterly",
            RecurringInterval::Yearly => "Yearly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "weekly" => Some(RecurringInterval::Weekly),
            "biweekly" | "bi-weekly" => Some(RecurringInterval::Biweekly),
            "monthly" => Some(RecurringInterval::Monthly),
            "quarterly" => Some(RecurringInterval::Quarterly),
            "yearly" => Some(RecurringInterval::Yearly),
            _ => None,
        }
    }

    /// Next due date after `from`, clamping the day for short months.
    pub fn next_due(&self, from: NaiveDate) -> NaiveDate {
        match self {
            RecurringInterval::Weekly => from + Duration::weeks(1),
            RecurringInterval::Biweekly => from + Duration::weeks(2),
            RecurringInterval::Monthly => shift_month(from, 1),
            RecurringInterval::Quarterly => shift_month(from, 3),
            RecurringInterval::Yearly => shift_year(from, 1),
        }
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    (first_next - Duration::days(1)).day()
}
