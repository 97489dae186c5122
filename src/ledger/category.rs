use serde::{Deserialize, Serialize};

/// User-defined label grouping bills for reporting.
///
/// The number of bills in a category is derived at read time, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

impl Category {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Case-insensitive name match used for uniqueness and bill counting.
    pub fn matches_name(&self, candidate: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(candidate.trim())
    }
}
