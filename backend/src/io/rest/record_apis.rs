//! # REST API for students and invoices

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::{ActionOutcome, ToggleInvoiceResponse};
use tracing::info;

use super::mappers::record_mapper::RecordMapper;
use super::workflow_error_response;
use crate::domain::Guarded;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students))
        .route("/invoices", get(list_invoices))
        .route("/invoices/:invoice_id/toggle", post(toggle_invoice))
}

pub async fn list_students(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/students");
    let students = state.store.students().await;
    (StatusCode::OK, Json(RecordMapper::to_student_list_dto(&students)))
}

pub async fn list_invoices(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/invoices");
    let invoices = state.store.invoices().await;
    (StatusCode::OK, Json(RecordMapper::to_invoice_list_dto(&invoices)))
}

/// Flip an invoice between Paid and Pending
pub async fn toggle_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/invoices/{}/toggle", invoice_id);

    match state.invoice_service.toggle_invoice_status(&invoice_id).await {
        Ok(Guarded::Applied(invoice)) => {
            let response = ToggleInvoiceResponse {
                outcome: ActionOutcome::Applied,
                message: format!("Invoice {} marked {}", invoice.id, invoice.status.as_str()),
                invoice: Some(RecordMapper::to_invoice_dto(&invoice)),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(Guarded::Busy) => {
            let response = ToggleInvoiceResponse {
                outcome: ActionOutcome::Busy,
                invoice: None,
                message: "Another invoice update is in progress".to_string(),
            };
            (StatusCode::CONFLICT, Json(response)).into_response()
        }
        Err(e) => workflow_error_response("Failed to toggle invoice", e),
    }
}
