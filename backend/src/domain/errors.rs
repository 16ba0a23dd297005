use super::models::{expense::ExpenseValidationError, student::CommissionTransitionError};

/// Failure of a mutating dashboard workflow
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
    #[error(transparent)]
    InvalidTransition(#[from] CommissionTransitionError),
    #[error(transparent)]
    Validation(#[from] ExpenseValidationError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl WorkflowError {
    pub fn student_not_found(id: &str) -> Self {
        WorkflowError::NotFound {
            kind: "Student",
            id: id.to_string(),
        }
    }

    pub fn invoice_not_found(id: &str) -> Self {
        WorkflowError::NotFound {
            kind: "Invoice",
            id: id.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Result of an action behind a single-flight guard
#[derive(Debug, Clone, PartialEq)]
pub enum Guarded<T> {
    Applied(T),
    /// Another run of the same action was in flight; nothing was done
    Busy,
}
