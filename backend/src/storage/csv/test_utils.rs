//! Test utilities: a temp-directory backed connection that cleans itself up,
//! plus record builders shared by the repository and service tests.

use anyhow::Result;
use shared::{ApplicationStatus, ExpenseCategory, InvoiceStatus};
use std::path::PathBuf;
use tempfile::TempDir;

use super::connection::CsvConnection;
use crate::domain::models::{expense::Expense, invoice::Invoice, student::Student};

/// RAII test environment. The data directory is removed when this is dropped,
/// even if the test panics.
pub struct TestEnvironment {
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }
}

pub fn sample_student(id: &str, name: &str, status: ApplicationStatus) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        email: None,
        destination: None,
        status,
        commission_status: None,
        commission_amount: None,
        branch_id: None,
    }
}

pub fn sample_invoice(id: &str, amount: f64, status: InvoiceStatus) -> Invoice {
    Invoice {
        id: id.to_string(),
        student_id: None,
        description: None,
        amount,
        status,
        branch_id: None,
    }
}

pub fn sample_expense(id: &str, amount: f64, category: ExpenseCategory, date: &str) -> Expense {
    Expense {
        id: id.to_string(),
        amount,
        category,
        description: format!("{} expense", category),
        date: date.to_string(),
        recorded_by: "Admin".to_string(),
        branch_id: Some("main".to_string()),
    }
}
