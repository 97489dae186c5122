//! The built-in sample dataset the dashboard seeds itself with when no
//! snapshot exists (or an existing one cannot be read).

use chrono::NaiveDate;

use super::{
    bill::{Bill, BillStatus, Payment, RecurringInterval},
    budget::{CategoryBudget, MonthlySpend},
    category::Category,
    document::Document,
    ledger::Ledger,
    reminder::{NotifyMethod, Reminder},
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid sample date")
}

impl Ledger {
    /// Builds the default household ledger with sample bills, categories,
    /// reminders, documents, and report aggregates.
    pub fn sample() -> Self {
        let mut ledger = Ledger::new("Household");

        ledger.bills = sample_bills();
        ledger.categories = sample_categories();
        ledger.reminders = sample_reminders();
        ledger.documents = sample_documents();
        ledger.budgets = sample_budgets();
        ledger.monthly_history = sample_monthly_history();
        ledger
    }
}

fn sample_bills() -> Vec<Bill> {
    let mut electricity = Bill::new(1, "Electricity", 125.50, date(2023, 6, 15), "Utilities")
        .with_description("Monthly electricity bill for 123 Main St.")
        .with_recurrence(RecurringInterval::Monthly);
    electricity.payments = vec![
        Payment {
            id: 1,
            date: date(2023, 5, 15),
            amount: 118.75,
            method: "Credit Card".into(),
        },
        Payment {
            id: 2,
            date: date(2023, 4, 15),
            amount: 122.30,
            method: "Credit Card".into(),
        },
        Payment {
            id: 3,
            date: date(2023, 3, 15),
            amount: 130.45,
            method: "Bank Transfer".into(),
        },
    ];

    let mut rent = Bill::new(2, "Rent", 1200.00, date(2023, 6, 1), "Housing");
    rent.status = BillStatus::Paid;
    let mut netflix = Bill::new(5, "Netflix", 15.99, date(2023, 6, 10), "Subscriptions");
    netflix.status = BillStatus::Paid;
    let mut gym = Bill::new(6, "Gym Membership", 45.00, date(2023, 6, 5), "Subscriptions");
    gym.status = BillStatus::Paid;

    vec![
        electricity,
        rent,
        Bill::new(3, "Internet", 79.99, date(2023, 6, 22), "Utilities"),
        Bill::new(4, "Phone", 65.00, date(2023, 6, 18), "Utilities"),
        netflix,
        gym,
        Bill::new(7, "Car Insurance", 120.00, date(2023, 6, 28), "Insurance"),
    ]
}

fn sample_categories() -> Vec<Category> {
    [
        "Utilities",
        "Rent/Mortgage",
        "Insurance",
        "Subscriptions",
        "Phone/Internet",
        "Groceries",
        "Transportation",
        "Other",
    ]
    .iter()
    .enumerate()
    .map(|(index, name)| Category::new(index as u64 + 1, *name))
    .collect()
}

fn sample_reminders() -> Vec<Reminder> {
    vec![
        Reminder::new(
            1,
            "Pay Internet Bill",
            "Don't forget to pay the internet bill",
            date(2025, 3, 27),
            NotifyMethod::Email,
        ),
        Reminder::new(
            2,
            "Call Insurance Company",
            "Discuss the new policy options",
            date(2025, 3, 30),
            NotifyMethod::Email,
        ),
    ]
}

fn sample_documents() -> Vec<Document> {
    vec![
        Document::new(1, "May_2023_Bill.pdf", date(2023, 5, 5), "245 KB", Some(1)),
        Document::new(2, "April_2023_Bill.pdf", date(2023, 4, 5), "240 KB", Some(1)),
        Document::new(3, "March_2023_Bill.pdf", date(2023, 3, 5), "238 KB", None),
        Document::new(4, "February_2023_Bill.pdf", date(2023, 2, 5), "242 KB", None),
    ]
}

fn sample_budgets() -> Vec<CategoryBudget> {
    vec![
        CategoryBudget::new("Utilities", 500.0, 450.0),
        CategoryBudget::new("Housing", 1300.0, 1200.0),
        CategoryBudget::new("Subscriptions", 100.0, 120.0),
        CategoryBudget::new("Insurance", 350.0, 350.0),
        CategoryBudget::new("Other", 250.0, 230.0),
    ]
}

fn sample_monthly_history() -> Vec<MonthlySpend> {
    vec![
        MonthlySpend::new("Oct", 850.0, 900.0),
        MonthlySpend::new("Nov", 920.0, 900.0),
        MonthlySpend::new("Dec", 1100.0, 1000.0),
        MonthlySpend::new("Jan", 980.0, 1000.0),
        MonthlySpend::new("Feb", 1050.0, 1100.0),
        MonthlySpend::new("Mar", 950.0, 1100.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_ledger_matches_the_dashboard_dataset() {
        let ledger = Ledger::sample();
        assert_eq!(ledger.bills.len(), 7);
        assert_eq!(ledger.categories.len(), 8);
        assert_eq!(ledger.reminders.len(), 2);
        assert_eq!(ledger.documents.len(), 4);
        assert_eq!(ledger.budgets.len(), 5);
        assert_eq!(ledger.monthly_history.len(), 6);

        let electricity = ledger.bill(1).expect("sample bill 1");
        assert_eq!(electricity.amount, 125.50);
        assert_eq!(electricity.payments.len(), 3);
        assert!(electricity.recurring);
    }

    #[test]
    fn sample_ids_leave_room_for_new_records() {
        let mut ledger = Ledger::sample();
        assert_eq!(ledger.allocate_bill_id(), 8);
        assert_eq!(ledger.allocate_category_id(), 9);
        assert_eq!(ledger.allocate_reminder_id(), 3);
        assert_eq!(ledger.allocate_document_id(), 5);
    }
}
