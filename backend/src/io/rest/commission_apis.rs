//! # REST API for the commission workflow
//!
//! Claim a pending commission, then confirm its receipt. Each action has its
//! own single-flight guard; a request arriving while the same action is in
//! flight gets 409 with outcome `Busy`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use shared::{ActionOutcome, CommissionActionResponse};
use tracing::info;

use super::mappers::record_mapper::RecordMapper;
use super::workflow_error_response;
use crate::domain::models::student::Student;
use crate::domain::{Guarded, WorkflowError};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:student_id/claim", post(claim_commission))
        .route("/:student_id/receipt", post(confirm_receipt))
}

pub async fn claim_commission(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/commissions/{}/claim", student_id);
    let result = state.commission_service.claim(&student_id).await;
    to_response(result, "Commission claimed", "Failed to claim commission")
}

pub async fn confirm_receipt(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/commissions/{}/receipt", student_id);
    let result = state.commission_service.confirm_receipt(&student_id).await;
    to_response(result, "Commission received", "Failed to confirm receipt")
}

fn to_response(
    result: Result<Guarded<Student>, WorkflowError>,
    applied_message: &str,
    failure_context: &str,
) -> Response {
    match result {
        Ok(Guarded::Applied(student)) => {
            let response = CommissionActionResponse {
                outcome: ActionOutcome::Applied,
                message: format!("{} for {}", applied_message, student.name),
                student: Some(RecordMapper::to_student_dto(&student)),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(Guarded::Busy) => {
            let response = CommissionActionResponse {
                outcome: ActionOutcome::Busy,
                student: None,
                message: "Another commission update is in progress".to_string(),
            };
            (StatusCode::CONFLICT, Json(response)).into_response()
        }
        Err(e) => workflow_error_response(failure_context, e),
    }
}
