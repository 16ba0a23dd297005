use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use super::connection::CsvConnection;
use crate::domain::models::invoice::Invoice;
use crate::storage::traits::InvoiceStorage;

const INVOICES_FILE: &str = "invoices.csv";

/// CSV-backed invoice repository
#[derive(Clone)]
pub struct InvoiceRepository {
    connection: CsvConnection,
}

impl InvoiceRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl InvoiceStorage for InvoiceRepository {
    async fn list_invoices(&self) -> Result<Vec<Invoice>> {
        self.connection.read_records(INVOICES_FILE)
    }

    async fn save_invoices(&self, invoices: &[Invoice]) -> Result<()> {
        info!("Saving {} invoices", invoices.len());
        self.connection.write_records(INVOICES_FILE, invoices)
    }
}
