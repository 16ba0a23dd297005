//! # REST API for the dashboard view
//!
//! The metrics bundle, the agency settings, and a reload of the snapshot
//! from storage.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::{DashboardRequest, RefreshResponse};
use tracing::{error, info};

use super::error_response;
use super::mappers::dashboard_mapper::DashboardMapper;
use super::mappers::record_mapper::RecordMapper;
use crate::domain::{BranchFilter, DashboardQuery};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/settings", get(get_settings))
        .route("/refresh", post(refresh))
}

/// Metrics for one branch, or all branches
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(request): Query<DashboardRequest>,
) -> impl IntoResponse {
    info!("GET /api/dashboard - request: {:?}", request);

    let query = DashboardQuery {
        branch: BranchFilter::parse(request.branch.as_deref()),
        search: request.search.unwrap_or_default(),
    };
    let snapshot = state.store.snapshot().await;
    let metrics = state.analytics_service.build_dashboard(&snapshot, &query);

    (StatusCode::OK, Json(DashboardMapper::to_response(metrics)))
}

pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/settings");
    let settings = state.store.settings().await;
    (StatusCode::OK, Json(RecordMapper::to_settings_dto(&settings)))
}

/// Reload every collection from storage
pub async fn refresh(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/refresh");

    match state.store.refresh().await {
        Ok(snapshot) => {
            let response = RefreshResponse {
                students: snapshot.students.len(),
                invoices: snapshot.invoices.len(),
                expenses: snapshot.expenses.len(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to refresh dashboard data: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to reload dashboard data")
        }
    }
}
