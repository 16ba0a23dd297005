//! Expense recording.
//!
//! Validates the raw form input, attributes the expense to the signed-in user
//! and the active branch, and prepends it so the collection stays newest
//! first. Invalid input never reaches storage.

use chrono::{SecondsFormat, Utc};
use shared::ExpenseCategory;
use tracing::{info, warn};

use super::branch_filter::BranchFilter;
use super::dashboard_store::DashboardStore;
use super::errors::WorkflowError;
use super::models::expense::{Expense, ExpenseValidationError};
use super::models::user::{User, FALLBACK_DISPLAY_NAME};
use super::session_service::SessionService;
use crate::storage::Connection;

/// Raw expense form. Cleared after a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseForm {
    pub amount: String,
    pub category: ExpenseCategory,
    pub description: String,
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self {
            amount: String::new(),
            category: ExpenseCategory::Other,
            description: String::new(),
        }
    }
}

impl ExpenseForm {
    pub fn clear(&mut self) {
        *self = ExpenseForm::default();
    }
}

/// Parsed and trimmed form values
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedExpense {
    pub amount: f64,
    pub category: ExpenseCategory,
    pub description: String,
}

#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    store: DashboardStore<C>,
    session_service: SessionService<C>,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(store: DashboardStore<C>, session_service: SessionService<C>) -> Self {
        Self {
            store,
            session_service,
        }
    }

    pub fn validate(&self, form: &ExpenseForm) -> Result<ValidatedExpense, ExpenseValidationError> {
        let raw_amount = form.amount.trim();
        if raw_amount.is_empty() {
            return Err(ExpenseValidationError::EmptyAmount);
        }

        let cleaned: String = raw_amount
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();
        let amount = cleaned
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
            .ok_or_else(|| ExpenseValidationError::InvalidAmount(raw_amount.to_string()))?;
        if amount <= 0.0 {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }

        let description = form.description.trim();
        if description.is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        Ok(ValidatedExpense {
            amount,
            category: form.category,
            description: description.to_string(),
        })
    }

    /// Record the form as a new expense and clear the form.
    /// On any error the form is left as the user typed it.
    pub async fn record_expense(
        &self,
        form: &mut ExpenseForm,
        branch: &BranchFilter,
    ) -> Result<Expense, WorkflowError> {
        let validated = match self.validate(form) {
            Ok(v) => v,
            Err(e) => {
                warn!("Expense rejected: {}", e);
                return Err(e.into());
            }
        };

        let recorded_by = self
            .session_service
            .current_user()
            .as_ref()
            .map(User::attribution_name)
            .unwrap_or(FALLBACK_DISPLAY_NAME)
            .to_string();

        let expense = Expense {
            id: Expense::generate_id(),
            amount: validated.amount,
            category: validated.category,
            description: validated.description,
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            recorded_by,
            branch_id: Some(branch.recording_branch().to_string()),
        };

        let recorded = expense.clone();
        self.store
            .update_expenses(move |expenses: &mut Vec<Expense>| -> Result<(), WorkflowError> {
                expenses.insert(0, recorded);
                Ok(())
            })
            .await?;

        info!(
            "Recorded {} expense {} of {:.2} for branch {}",
            expense.category,
            expense.id,
            expense.amount,
            branch.recording_branch()
        );
        form.clear();
        Ok(expense)
    }
}
