//! # REST API for sign-in

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::LoginRequest;
use tracing::{error, info};

use super::error_response;
use super::mappers::user_mapper::UserMapper;
use crate::domain::SessionError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_session))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

pub async fn get_session(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/session");
    let user = state.session_service.current_user();
    (StatusCode::OK, Json(UserMapper::to_session_response(user)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/session/login - email: {}", request.email);

    match state.session_service.login(&request.email, &request.password).await {
        Ok(user) => (StatusCode::OK, Json(UserMapper::to_session_response(Some(user)))).into_response(),
        Err(SessionError::InvalidCredentials) => {
            error_response(StatusCode::UNAUTHORIZED, SessionError::InvalidCredentials.to_string())
        }
        Err(e) => {
            error!("Failed to sign in: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to sign in")
        }
    }
}

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/session/logout");

    match state.session_service.logout().await {
        Ok(()) => (StatusCode::OK, Json(UserMapper::to_session_response(None))).into_response(),
        Err(e) => {
            error!("Failed to sign out: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to sign out")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::TestApp;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_login_logout_cycle() {
        let app = TestApp::new().await;

        let (_, body) = app.get("/api/session").await;
        assert_eq!(body["user"], Value::Null);

        let (status, body) = app
            .post(
                "/api/session/login",
                Some(json!({ "email": "owner@agency.test", "password": "demo123" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["role"], "Owner");

        let (_, body) = app.get("/api/session").await;
        assert_eq!(body["user"]["email"], "owner@agency.test");

        let (status, body) = app.post("/api/session/logout", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"], Value::Null);
    }

    #[tokio::test]
    async fn test_bad_credentials_are_unauthorized() {
        let app = TestApp::new().await;
        let (status, body) = app
            .post(
                "/api/session/login",
                Some(json!({ "email": "owner@agency.test", "password": "nope" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_signed_in_user_is_credited_on_expenses() {
        let app = TestApp::new().await;
        app.post(
            "/api/session/login",
            Some(json!({ "email": "counsellor@agency.test", "password": "demo123" })),
        )
        .await;

        let (_, body) = app
            .post(
                "/api/expenses",
                Some(json!({ "amount": "60", "category": "Travel", "description": "Taxi" })),
            )
            .await;
        assert_eq!(body["expense"]["recorded_by"], "Lead Counsellor");
        assert_eq!(body["expense"]["branch_id"], "main");
    }
}
