//! Validated operations over the bill collection and its payment history.

use chrono::NaiveDate;

use crate::ledger::{Bill, BillStatus, Ledger, RecurringInterval, DEFAULT_PAYMENT_METHOD};

use super::{ServiceError, ServiceResult};

/// Fields collected by the add/edit bill forms, before validation.
#[derive(Debug, Clone, Default)]
pub struct BillDraft {
    pub name: String,
    pub amount: f64,
    pub due_date: Option<NaiveDate>,
    pub category: String,
    pub description: Option<String>,
    pub recurring: bool,
    pub recurring_interval: Option<RecurringInterval>,
}

/// Outcome of a mark-paid request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkPaid {
    /// Status flipped and a payment was recorded.
    Paid,
    /// The bill was already paid; nothing was recorded.
    AlreadyPaid,
}

pub struct BillService;

impl BillService {
    /// Validates the draft, allocates the next id, and prepends the new bill.
    pub fn add(ledger: &mut Ledger, draft: BillDraft) -> ServiceResult<u64> {
        let due_date = Self::validate(&draft)?;
        let id = ledger.allocate_bill_id();
        let mut bill = Bill::new(id, draft.name.trim(), draft.amount, due_date, draft.category.trim());
        bill.description = normalize_description(draft.description);
        bill.recurring = draft.recurring;
        bill.recurring_interval = if draft.recurring {
            draft.recurring_interval
        } else {
            None
        };
        Ok(ledger.add_bill(bill))
    }

    /// Whole-record replace of the bill's editable fields. Status and payment
    /// history are preserved; there is no partial-field mutation API.
    pub fn edit(ledger: &mut Ledger, id: u64, draft: BillDraft) -> ServiceResult<()> {
        let due_date = Self::validate(&draft)?;
        let bill = ledger
            .bill_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Bill not found".into()))?;
        bill.name = draft.name.trim().to_string();
        bill.amount = draft.amount;
        bill.due_date = due_date;
        bill.category = draft.category.trim().to_string();
        bill.description = normalize_description(draft.description);
        bill.recurring = draft.recurring;
        bill.recurring_interval = if draft.recurring {
            draft.recurring_interval
        } else {
            None
        };
        ledger.touch();
        Ok(())
    }

    /// Removes the bill and its embedded history. Unknown ids are a no-op.
    pub fn remove(ledger: &mut Ledger, id: u64) -> Option<Bill> {
        ledger.remove_bill(id)
    }

    /// Marks the bill paid and records a payment of the full amount dated
    /// `today`. Idempotent: an already-paid bill records nothing.
    pub fn mark_paid(ledger: &mut Ledger, id: u64, today: NaiveDate) -> ServiceResult<MarkPaid> {
        let bill = ledger
            .bill_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Bill not found".into()))?;
        if bill.is_paid() {
            return Ok(MarkPaid::AlreadyPaid);
        }
        bill.record_payment(today, DEFAULT_PAYMENT_METHOD);
        ledger.touch();
        Ok(MarkPaid::Paid)
    }

    /// Bills whose name or category contains `text`, case-insensitively.
    /// Pure; an empty search matches everything.
    pub fn filter<'a>(ledger: &'a Ledger, text: &str) -> Vec<&'a Bill> {
        let needle = text.to_lowercase();
        ledger
            .bills
            .iter()
            .filter(|bill| {
                bill.name.to_lowercase().contains(&needle)
                    || bill.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Pending bills due between `today` and `today + days`, inclusive.
    pub fn due_within<'a>(ledger: &'a Ledger, today: NaiveDate, days: i64) -> Vec<&'a Bill> {
        let horizon = today + chrono::Duration::days(days);
        ledger
            .bills
            .iter()
            .filter(|bill| {
                bill.status == BillStatus::Pending
                    && bill.due_date >= today
                    && bill.due_date <= horizon
            })
            .collect()
    }

    fn validate(draft: &BillDraft) -> ServiceResult<NaiveDate> {
        if draft.name.trim().chars().count() < 2 {
            return Err(ServiceError::Invalid(
                "Bill name must be at least 2 characters".into(),
            ));
        }
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "Amount must be a positive number".into(),
            ));
        }
        let due_date = draft
            .due_date
            .ok_or_else(|| ServiceError::Invalid("A due date is required".into()))?;
        if draft.category.trim().is_empty() {
            return Err(ServiceError::Invalid("Please select a category".into()));
        }
        Ok(due_date)
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
