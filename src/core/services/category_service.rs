use crate::ledger::{Category, Ledger};

use super::{ServiceError, ServiceResult};

/// Category plus its derived bill count, for the categories listing.
#[derive(Debug, Clone)]
pub struct CategorySummary {
    pub id: u64,
    pub name: String,
    pub bill_count: usize,
}

pub struct CategoryService;

impl CategoryService {
    /// Adds a category after trimming; names are unique case-insensitively.
    pub fn add(ledger: &mut Ledger, name: &str) -> ServiceResult<u64> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::Invalid("Category name cannot be empty".into()));
        }
        if ledger
            .categories
            .iter()
            .any(|category| category.matches_name(trimmed))
        {
            return Err(ServiceError::Invalid(format!(
                "Category `{}` already exists",
                trimmed
            )));
        }
        let id = ledger.allocate_category_id();
        Ok(ledger.add_category(Category::new(id, trimmed)))
    }

    /// Removes a category. Deletion is blocked while any bill references it,
    /// so bills never end up pointing at a label that no longer exists.
    pub fn remove(ledger: &mut Ledger, id: u64) -> ServiceResult<Category> {
        let name = ledger
            .category(id)
            .map(|category| category.name.clone())
            .ok_or_else(|| ServiceError::Invalid("Category not found".into()))?;
        let references = ledger.category_bill_count(&name);
        if references > 0 {
            return Err(ServiceError::Invalid(format!(
                "Category `{}` is used by {} bill(s)",
                name, references
            )));
        }
        ledger
            .remove_category(id)
            .ok_or_else(|| ServiceError::Invalid("Category not found".into()))
    }

    /// Categories in insertion order with their derived bill counts.
    pub fn list(ledger: &Ledger) -> Vec<CategorySummary> {
        ledger
            .categories
            .iter()
            .map(|category| CategorySummary {
                id: category.id,
                name: category.name.clone(),
                bill_count: ledger.category_bill_count(&category.name),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_are_rejected_case_insensitively() {
        let mut ledger = Ledger::new("Categories");
        CategoryService::add(&mut ledger, "Rent").unwrap();
        let err = CategoryService::add(&mut ledger, "rent").unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(ref m) if m.contains("already exists")));
        let err = CategoryService::add(&mut ledger, "  RENT  ").unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn empty_names_are_rejected() {
        let mut ledger = Ledger::new("Categories");
        let err = CategoryService::add(&mut ledger, "   ").unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(ref m) if m.contains("empty")));
    }

    #[test]
    fn remove_is_blocked_while_bills_reference_the_category() {
        let mut ledger = Ledger::sample();
        let utilities = ledger
            .categories
            .iter()
            .find(|c| c.name == "Utilities")
            .unwrap()
            .id;
        let err = CategoryService::remove(&mut ledger, utilities).unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(ref m) if m.contains("used by 3")));

        let groceries = ledger
            .categories
            .iter()
            .find(|c| c.name == "Groceries")
            .unwrap()
            .id;
        let removed = CategoryService::remove(&mut ledger, groceries).unwrap();
        assert_eq!(removed.name, "Groceries");
    }

    #[test]
    fn list_reports_derived_counts() {
        let ledger = Ledger::sample();
        let summaries = CategoryService::list(&ledger);
        let utilities = summaries.iter().find(|s| s.name == "Utilities").unwrap();
        assert_eq!(utilities.bill_count, 3);
        let groceries = summaries.iter().find(|s| s.name == "Groceries").unwrap();
        assert_eq!(groceries.bill_count, 0);
    }

    #[test]
    fn ids_continue_past_the_sample_set() {
        let mut ledger = Ledger::sample();
        let id = CategoryService::add(&mut ledger, "Healthcare").unwrap();
        assert_eq!(id, 9);
    }
}
