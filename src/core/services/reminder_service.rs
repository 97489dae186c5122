use chrono::NaiveDate;

use crate::ledger::{Ledger, NotifyMethod, Reminder};

use super::{ServiceError, ServiceResult};

/// Fields collected by the add-reminder form.
#[derive(Debug, Clone)]
pub struct ReminderDraft {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub method: NotifyMethod,
}

pub struct ReminderService;

impl ReminderService {
    /// Adds a reminder. Titles must be non-empty and the date must be `today`
    /// or later; time of day is ignored.
    pub fn add(ledger: &mut Ledger, draft: ReminderDraft, today: NaiveDate) -> ServiceResult<u64> {
        if draft.title.trim().is_empty() {
            return Err(ServiceError::Invalid("Reminder title cannot be empty".into()));
        }
        if draft.date < today {
            return Err(ServiceError::Invalid(
                "Reminder date cannot be in the past".into(),
            ));
        }
        let id = ledger.allocate_reminder_id();
        Ok(ledger.add_reminder(Reminder::new(
            id,
            draft.title.trim(),
            draft.description.trim(),
            draft.date,
            draft.method,
        )))
    }

    pub fn remove(ledger: &mut Ledger, id: u64) -> ServiceResult<Reminder> {
        ledger
            .remove_reminder(id)
            .ok_or_else(|| ServiceError::Invalid("Reminder not found".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(title: &str, when: NaiveDate) -> ReminderDraft {
        ReminderDraft {
            title: title.into(),
            description: String::new(),
            date: when,
            method: NotifyMethod::Email,
        }
    }

    #[test]
    fn rejects_dates_before_today_but_accepts_today() {
        let mut ledger = Ledger::new("Reminders");
        let today = date(2025, 3, 25);

        let err =
            ReminderService::add(&mut ledger, draft("Pay rent", date(2025, 3, 24)), today)
                .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(ref m) if m.contains("past")));

        let id = ReminderService::add(&mut ledger, draft("Pay rent", today), today).unwrap();
        assert_eq!(id, 1);
    }

    #[test]
    fn rejects_blank_titles() {
        let mut ledger = Ledger::new("Reminders");
        let today = date(2025, 3, 25);
        let err = ReminderService::add(&mut ledger, draft("  ", date(2025, 3, 26)), today)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(ref m) if m.contains("empty")));
    }

    #[test]
    fn remove_returns_the_deleted_reminder() {
        let mut ledger = Ledger::sample();
        let removed = ReminderService::remove(&mut ledger, 1).unwrap();
        assert_eq!(removed.title, "Pay Internet Bill");
        assert!(ReminderService::remove(&mut ledger, 1).is_err());
    }
}
