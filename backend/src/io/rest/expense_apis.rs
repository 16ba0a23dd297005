//! # REST API for expenses

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{ExpenseListRequest, RecordExpenseRequest};
use tracing::info;

use super::mappers::expense_mapper::ExpenseMapper;
use super::workflow_error_response;
use crate::domain::BranchFilter;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_expenses).post(record_expense))
}

/// Expenses for a branch, newest first
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(request): Query<ExpenseListRequest>,
) -> impl IntoResponse {
    info!("GET /api/expenses - request: {:?}", request);
    let branch = BranchFilter::parse(request.branch.as_deref());
    let expenses = branch.apply(&state.store.expenses().await);
    (StatusCode::OK, Json(ExpenseMapper::to_list_dto(&expenses)))
}

pub async fn record_expense(
    State(state): State<AppState>,
    Json(request): Json<RecordExpenseRequest>,
) -> impl IntoResponse {
    info!("POST /api/expenses - request: {:?}", request);

    let (mut form, branch) = ExpenseMapper::to_form(request);
    match state.expense_service.record_expense(&mut form, &branch).await {
        Ok(expense) => {
            let settings = state.store.settings().await;
            let response = ExpenseMapper::to_record_response(&expense, settings.display_currency());
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => workflow_error_response("Failed to record expense", e),
    }
}
