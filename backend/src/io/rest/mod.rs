//! # REST API Interface Layer
//!
//! JSON endpoints under `/api`. Each `*_apis` module exposes a `router()`;
//! [`api_router`] assembles them.
//!
//! ## Error translation
//!
//! - not found: 404
//! - invalid commission transition, or a guarded action already in flight: 409
//! - expense validation: 400
//! - bad credentials: 401
//! - storage failure: 500

pub mod commission_apis;
pub mod dashboard_apis;
pub mod expense_apis;
pub mod mappers;
pub mod record_apis;
pub mod session_apis;

#[cfg(test)]
pub mod test_utils;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Router,
};
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::domain::WorkflowError;
use crate::AppState;

/// All API routes, relative to the `/api` prefix
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(dashboard_apis::router())
        .merge(record_apis::router())
        .nest("/commissions", commission_apis::router())
        .nest("/expenses", expense_apis::router())
        .nest("/session", session_apis::router())
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: message.into() })).into_response()
}

pub fn workflow_error_response(context: &str, e: WorkflowError) -> Response {
    let status = match &e {
        WorkflowError::NotFound { .. } => StatusCode::NOT_FOUND,
        WorkflowError::InvalidTransition(_) => StatusCode::CONFLICT,
        WorkflowError::Validation(_) => StatusCode::BAD_REQUEST,
        WorkflowError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        error!("{}: {:#}", context, e);
        error_response(status, format!("{}: storage error", context))
    } else {
        warn!("{}: {}", context, e);
        error_response(status, e.to_string())
    }
}
