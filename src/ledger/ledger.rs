use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    bill::Bill, budget::CategoryBudget, budget::MonthlySpend, category::Category,
    document::Document, reminder::Reminder,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The whole household ledger: bills with their payment history, categories,
/// reminders, documents, and the sample aggregates behind the reports.
///
/// One instance is shared by every view; snapshots serialize it in full.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub name: String,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub budgets: Vec<CategoryBudget>,
    #[serde(default)]
    pub monthly_history: Vec<MonthlySpend>,
    #[serde(default)]
    pub sequences: IdSequences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            bills: Vec::new(),
            categories: Vec::new(),
            reminders: Vec::new(),
            documents: Vec::new(),
            budgets: Vec::new(),
            monthly_history: Vec::new(),
            sequences: IdSequences::default(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Prepends a bill so the newest record leads the listing.
    pub fn add_bill(&mut self, bill: Bill) -> u64 {
        let id = bill.id;
        self.bills.insert(0, bill);
        self.touch();
        id
    }

    pub fn add_category(&mut self, category: Category) -> u64 {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn add_reminder(&mut self, reminder: Reminder) -> u64 {
        let id = reminder.id;
        self.reminders.push(reminder);
        self.touch();
        id
    }

    pub fn add_document(&mut self, document: Document) -> u64 {
        let id = document.id;
        self.documents.insert(0, document);
        self.touch();
        id
    }

    pub fn bill(&self, id: u64) -> Option<&Bill> {
        self.bills.iter().find(|bill| bill.id == id)
    }

    pub fn bill_mut(&mut self, id: u64) -> Option<&mut Bill> {
        self.bills.iter_mut().find(|bill| bill.id == id)
    }

    pub fn category(&self, id: u64) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn reminder(&self, id: u64) -> Option<&Reminder> {
        self.reminders.iter().find(|reminder| reminder.id == id)
    }

    pub fn document(&self, id: u64) -> Option<&Document> {
        self.documents.iter().find(|document| document.id == id)
    }

    pub fn remove_bill(&mut self, id: u64) -> Option<Bill> {
        let index = self.bills.iter().position(|bill| bill.id == id)?;
        let removed = self.bills.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn remove_category(&mut self, id: u64) -> Option<Category> {
        let index = self.categories.iter().position(|cat| cat.id == id)?;
        let removed = self.categories.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn remove_reminder(&mut self, id: u64) -> Option<Reminder> {
        let index = self.reminders.iter().position(|rem| rem.id == id)?;
        let removed = self.reminders.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn remove_document(&mut self, id: u64) -> Option<Document> {
        let index = self.documents.iter().position(|doc| doc.id == id)?;
        let removed = self.documents.remove(index);
        self.touch();
        Some(removed)
    }

    /// Number of bills referencing the category, matched case-insensitively.
    pub fn category_bill_count(&self, name: &str) -> usize {
        let needle = name.trim().to_ascii_lowercase();
        self.bills
            .iter()
            .filter(|bill| bill.category.trim().to_ascii_lowercase() == needle)
            .count()
    }

    pub fn allocate_bill_id(&mut self) -> u64 {
        let max = self.bills.iter().map(|b| b.id).max().unwrap_or(0);
        self.sequences.bills.claim(max)
    }

    pub fn allocate_category_id(&mut self) -> u64 {
        let max = self.categories.iter().map(|c| c.id).max().unwrap_or(0);
        self.sequences.categories.claim(max)
    }

    pub fn allocate_reminder_id(&mut self) -> u64 {
        let max = self.reminders.iter().map(|r| r.id).max().unwrap_or(0);
        self.sequences.reminders.claim(max)
    }

    pub fn allocate_document_id(&mut self) -> u64 {
        let max = self.documents.iter().map(|d| d.id).max().unwrap_or(0);
        self.sequences.documents.claim(max)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

/// Store-owned monotonic id sequences, one per collection.
///
/// Snapshots written before the sequences existed deserialize to zeroed
/// counters; `IdSeq::claim` reseeds from the live maximum so those ledgers
/// keep allocating `max + 1`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdSequences {
    #[serde(default)]
    pub bills: IdSeq,
    #[serde(default)]
    pub categories: IdSeq,
    #[serde(default)]
    pub reminders: IdSeq,
    #[serde(default)]
    pub documents: IdSeq,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IdSeq {
    next: u64,
}

impl IdSeq {
    /// Claims the next id: at least `current_max + 1`, never going backward
    /// within a session even after the record holding the maximum is deleted.
    pub fn claim(&mut self, current_max: u64) -> u64 {
        let id = self.next.max(current_max + 1);
        self.next = id + 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::bill::Bill;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn allocates_one_past_the_maximum() {
        let mut ledger = Ledger::new("Household");
        let id = ledger.allocate_bill_id();
        ledger.add_bill(Bill::new(id, "Rent", 1200.0, date(2023, 6, 1), "Housing"));
        assert_eq!(id, 1);
        assert_eq!(ledger.allocate_bill_id(), 2);
    }

    #[test]
    fn ids_stay_monotonic_after_deleting_the_maximum() {
        let mut ledger = Ledger::new("Household");
        for name in ["Rent", "Phone", "Internet"] {
            let id = ledger.allocate_bill_id();
            ledger.add_bill(Bill::new(id, name, 10.0, date(2023, 6, 1), "Utilities"));
        }
        ledger.remove_bill(3);
        assert_eq!(ledger.allocate_bill_id(), 4);
    }

    #[test]
    fn zeroed_sequences_reseed_from_existing_records() {
        let mut ledger = Ledger::new("Household");
        ledger
            .bills
            .push(Bill::new(7, "Gym", 45.0, date(2023, 6, 5), "Subscriptions"));
        ledger.sequences = IdSequences::default();
        assert_eq!(ledger.allocate_bill_id(), 8);
    }

    #[test]
    fn remove_bill_is_a_noop_for_unknown_ids() {
        let mut ledger = Ledger::new("Household");
        assert!(ledger.remove_bill(42).is_none());
    }

    #[test]
    fn category_counts_match_case_insensitively() {
        let mut ledger = Ledger::new("Household");
        let id = ledger.allocate_bill_id();
        ledger.add_bill(Bill::new(id, "Power", 80.0, date(2023, 6, 1), "Utilities"));
        let id = ledger.allocate_bill_id();
        ledger.add_bill(Bill::new(id, "Water", 30.0, date(2023, 6, 2), "utilities"));
        assert_eq!(ledger.category_bill_count("UTILITIES"), 2);
        assert_eq!(ledger.category_bill_count("Housing"), 0);
    }
}
