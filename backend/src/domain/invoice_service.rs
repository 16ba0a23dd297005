//! Invoice payment toggling. One toggle runs at a time across all invoices.

use tracing::{info, warn};

use super::dashboard_store::DashboardStore;
use super::errors::{Guarded, WorkflowError};
use super::models::invoice::Invoice;
use super::single_flight::SingleFlight;
use crate::storage::Connection;

#[derive(Clone)]
pub struct InvoiceService<C: Connection> {
    store: DashboardStore<C>,
    toggle_flight: SingleFlight,
}

impl<C: Connection> InvoiceService<C> {
    pub fn new(store: DashboardStore<C>) -> Self {
        Self {
            store,
            toggle_flight: SingleFlight::new("invoice-toggle"),
        }
    }

    /// Flip an invoice between Paid and Pending
    pub async fn toggle_invoice_status(
        &self,
        invoice_id: &str,
    ) -> Result<Guarded<Invoice>, WorkflowError> {
        let Some(_permit) = self.toggle_flight.try_acquire() else {
            info!("Toggle for invoice {} ignored, another toggle is in flight", invoice_id);
            return Ok(Guarded::Busy);
        };

        let result = self
            .store
            .update_invoices(|invoices: &mut Vec<Invoice>| -> Result<Invoice, WorkflowError> {
                let invoice = invoices
                    .iter_mut()
                    .find(|i| i.id == invoice_id)
                    .ok_or_else(|| WorkflowError::invoice_not_found(invoice_id))?;
                *invoice = invoice.with_status_toggled();
                Ok(invoice.clone())
            })
            .await;

        match result {
            Ok(invoice) => {
                info!("Invoice {} is now {}", invoice.id, invoice.status.as_str());
                Ok(Guarded::Applied(invoice))
            }
            Err(e) => {
                warn!("Toggling invoice {} failed: {}", invoice_id, e);
                Err(e)
            }
        }
    }

    pub fn toggle_in_flight(&self) -> bool {
        self.toggle_flight.is_in_flight()
    }
}
