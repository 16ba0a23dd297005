use serde::{Deserialize, Serialize};
use shared::ExpenseCategory;

use super::Branched;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub description: String,
    pub date: String,
    pub recorded_by: String,
    pub branch_id: Option<String>,
}

impl Expense {
    pub fn generate_id() -> String {
        format!("expense::{}", uuid::Uuid::new_v4())
    }
}

impl Branched for Expense {
    fn branch_id(&self) -> Option<&str> {
        self.branch_id.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpenseValidationError {
    #[error("Amount cannot be empty")]
    EmptyAmount,
    #[error("Amount '{0}' is not a valid number")]
    InvalidAmount(String),
    #[error("Amount must be positive")]
    NonPositiveAmount,
    #[error("Description cannot be empty")]
    EmptyDescription,
}
