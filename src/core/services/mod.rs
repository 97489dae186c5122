pub mod bill_service;
pub mod category_service;
pub mod document_service;
pub mod reminder_service;
pub mod report_service;

pub use bill_service::{BillDraft, BillService, MarkPaid};
pub use category_service::{CategoryService, CategorySummary};
pub use document_service::DocumentService;
pub use reminder_service::{ReminderDraft, ReminderService};
pub use report_service::{BudgetReport, CategoryShare, DashboardSummary, MonthlyTrendRow, ReportService};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}
