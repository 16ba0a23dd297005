use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use super::connection::CsvConnection;
use crate::domain::models::expense::Expense;
use crate::storage::traits::ExpenseStorage;

const EXPENSES_FILE: &str = "expenses.csv";

/// CSV-backed expense repository. Rows are kept newest first.
#[derive(Clone)]
pub struct ExpenseRepository {
    connection: CsvConnection,
}

impl ExpenseRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ExpenseStorage for ExpenseRepository {
    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let mut expenses: Vec<Expense> = self.connection.read_records(EXPENSES_FILE)?;

        // RFC 3339 dates in one offset sort lexically
        if expenses.windows(2).any(|pair| pair[0].date < pair[1].date) {
            warn!("Expense file was not newest-first, re-sorting");
            expenses.sort_by(|a, b| b.date.cmp(&a.date));
        }

        Ok(expenses)
    }

    async fn save_expenses(&self, expenses: &[Expense]) -> Result<()> {
        info!("Saving {} expenses", expenses.len());
        self.connection.write_records(EXPENSES_FILE, expenses)
    }
}
