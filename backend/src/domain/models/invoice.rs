use serde::{Deserialize, Serialize};
use shared::InvoiceStatus;

use super::Branched;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: String,
    pub student_id: Option<String>,
    pub description: Option<String>,
    pub amount: f64,
    pub status: InvoiceStatus,
    pub branch_id: Option<String>,
}

impl Invoice {
    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    pub fn with_status_toggled(&self) -> Invoice {
        Invoice {
            status: self.status.toggled(),
            ..self.clone()
        }
    }
}

impl Branched for Invoice {
    fn branch_id(&self) -> Option<&str> {
        self.branch_id.as_deref()
    }
}
