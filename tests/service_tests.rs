use billkeep::{
    core::services::{
        BillDraft, BillService, CategoryService, DocumentService, MarkPaid, ReminderDraft,
        ReminderService, ReportService,
    },
    ledger::{BillStatus, Ledger, NotifyMethod, RecurringInterval},
    upload::{StagedUpload, UploadTask},
};
use chrono::NaiveDate;
use std::time::Duration;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn adding_a_bill_updates_category_counts() {
    let mut ledger = Ledger::sample();
    let before = CategoryService::list(&ledger)
        .into_iter()
        .find(|s| s.name == "Groceries")
        .unwrap()
        .bill_count;
    assert_eq!(before, 0);

    let draft = BillDraft {
        name: "Weekly Shop".into(),
        amount: 85.0,
        due_date: Some(date(2023, 7, 3)),
        category: "groceries".into(),
        recurring: true,
        recurring_interval: Some(RecurringInterval::Weekly),
        ..BillDraft::default()
    };
    let id = BillService::add(&mut ledger, draft).unwrap();
    assert_eq!(id, 8);

    let after = CategoryService::list(&ledger)
        .into_iter()
        .find(|s| s.name == "Groceries")
        .unwrap()
        .bill_count;
    assert_eq!(after, 1);
}

#[test]
fn marking_paid_flows_into_the_dashboard_summary() {
    let mut ledger = Ledger::sample();
    let today = date(2023, 6, 14);

    let outcome = BillService::mark_paid(&mut ledger, 1, today).unwrap();
    assert_eq!(outcome, MarkPaid::Paid);

    let summary = ReportService::dashboard(&ledger, today);
    assert_eq!(summary.payments_this_month, 1);
    assert!((summary.paid_this_month - 125.50).abs() < 1e-9);
    assert_eq!(summary.pending_this_month, 3);
}

#[test]
fn mark_paid_example_from_the_bill_detail_page() {
    let mut ledger = Ledger::new("Example");
    let id = BillService::add(
        &mut ledger,
        BillDraft {
            name: "Electricity Bill".into(),
            amount: 125.50,
            due_date: Some(date(2023, 6, 15)),
            category: "Utilities".into(),
            ..BillDraft::default()
        },
    )
    .unwrap();
    assert_eq!(id, 1);

    let before = ledger.bill(1).unwrap().payments.len();
    BillService::mark_paid(&mut ledger, 1, date(2023, 6, 15)).unwrap();

    let bill = ledger.bill(1).unwrap();
    assert_eq!(bill.status, BillStatus::Paid);
    assert_eq!(bill.payments.len(), before + 1);
    assert_eq!(bill.payments[0].amount, 125.50);
}

#[test]
fn upload_then_register_then_delete_roundtrip() {
    let mut ledger = Ledger::sample();

    let uploaded = UploadTask::spawn(
        StagedUpload::new("June_2023_Bill.pdf", Some(1)),
        date(2023, 6, 20),
        Duration::ZERO,
    )
    .join()
    .unwrap();
    let id = DocumentService::register(&mut ledger, uploaded);
    assert_eq!(id, 5);
    assert_eq!(DocumentService::for_bill(&ledger, 1).len(), 3);

    DocumentService::remove(&mut ledger, id).unwrap();
    assert_eq!(DocumentService::for_bill(&ledger, 1).len(), 2);
}

#[test]
fn reminder_lifecycle_respects_the_no_past_rule() {
    let mut ledger = Ledger::sample();
    let today = date(2025, 3, 25);

    let rejected = ReminderService::add(
        &mut ledger,
        ReminderDraft {
            title: "Too Late".into(),
            description: String::new(),
            date: date(2025, 3, 24),
            method: NotifyMethod::Push,
        },
        today,
    );
    assert!(rejected.is_err());

    let id = ReminderService::add(
        &mut ledger,
        ReminderDraft {
            title: "Renew Car Insurance".into(),
            description: "Policy ends next month".into(),
            date: date(2025, 4, 5),
            method: NotifyMethod::Sms,
        },
        today,
    )
    .unwrap();
    assert_eq!(id, 3);

    let removed = ReminderService::remove(&mut ledger, id).unwrap();
    assert_eq!(removed.title, "Renew Car Insurance");
}

#[test]
fn deleting_a_bill_leaves_documents_and_categories_alone() {
    let mut ledger = Ledger::sample();
    BillService::remove(&mut ledger, 1).expect("bill 1 exists");

    // Documents keep their (now dangling) reference; the store owns them.
    assert_eq!(DocumentService::for_bill(&ledger, 1).len(), 2);
    assert_eq!(ledger.categories.len(), 8);
}
