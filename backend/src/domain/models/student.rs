use serde::{Deserialize, Serialize};
use shared::{ApplicationStatus, CommissionStatus};

use super::Branched;

/// Commission value used when a student record carries no amount
pub const DEFAULT_COMMISSION_AMOUNT: f64 = 1500.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub destination: Option<String>,
    pub status: ApplicationStatus,
    pub commission_status: Option<CommissionStatus>,
    pub commission_amount: Option<f64>,
    pub branch_id: Option<String>,
}

impl Student {
    /// Commission status with an absent value read as `Pending`
    pub fn effective_commission_status(&self) -> CommissionStatus {
        self.commission_status.unwrap_or(CommissionStatus::Pending)
    }

    pub fn commission_value(&self) -> f64 {
        self.commission_amount.unwrap_or(DEFAULT_COMMISSION_AMOUNT)
    }

    pub fn is_ready_to_claim(&self) -> bool {
        self.status == ApplicationStatus::VisaGranted
            && self.effective_commission_status() == CommissionStatus::Pending
    }

    pub fn is_awaiting_receipt(&self) -> bool {
        self.commission_status == Some(CommissionStatus::Claimed)
    }

    pub fn name_matches(&self, needle_lowercase: &str) -> bool {
        needle_lowercase.is_empty() || self.name.to_lowercase().contains(needle_lowercase)
    }

    /// Pending -> Claimed. Any other starting state is rejected.
    pub fn with_commission_claimed(&self) -> Result<Student, CommissionTransitionError> {
        match self.effective_commission_status() {
            CommissionStatus::Pending => Ok(Student {
                commission_status: Some(CommissionStatus::Claimed),
                ..self.clone()
            }),
            current => Err(CommissionTransitionError::AlreadyAdvanced {
                student_id: self.id.clone(),
                current,
            }),
        }
    }

    /// Claimed -> Received. Receipt cannot skip the claim step.
    pub fn with_commission_received(&self) -> Result<Student, CommissionTransitionError> {
        match self.effective_commission_status() {
            CommissionStatus::Claimed => Ok(Student {
                commission_status: Some(CommissionStatus::Received),
                ..self.clone()
            }),
            current => Err(CommissionTransitionError::NotClaimed {
                student_id: self.id.clone(),
                current,
            }),
        }
    }
}

impl Branched for Student {
    fn branch_id(&self) -> Option<&str> {
        self.branch_id.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommissionTransitionError {
    #[error("Commission for student {student_id} is already {current}")]
    AlreadyAdvanced {
        student_id: String,
        current: CommissionStatus,
    },
    #[error("Commission for student {student_id} must be Claimed before receipt, found {current}")]
    NotClaimed {
        student_id: String,
        current: CommissionStatus,
    },
}
