use serde::{Deserialize, Serialize};

/// Budget-vs-actual sample line for one category, fed to the budget report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBudget {
    pub category: String,
    pub budget: f64,
    pub actual: f64,
}

impl CategoryBudget {
    pub fn new(category: impl Into<String>, budget: f64, actual: f64) -> Self {
        Self {
            category: category.into(),
            budget,
            actual,
        }
    }

    pub fn difference(&self) -> f64 {
        self.budget - self.actual
    }
}

/// One month of the spending-trend sample series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySpend {
    pub month: String,
    pub expenses: f64,
    pub budget: f64,
}

impl MonthlySpend {
    pub fn new(month: impl Into<String>, expenses: f64, budget: f64) -> Self {
        Self {
            month: month.into(),
            expenses,
            budget,
        }
    }

    pub fn savings(&self) -> f64 {
        self.budget - self.expenses
    }
}
