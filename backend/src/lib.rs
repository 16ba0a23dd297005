//! # Agency Dashboard Backend
//!
//! Back-office backend for an education agency: analytics over students,
//! invoices and expenses, plus the commission, invoice and expense workflows.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, mappers)
//!     ↓
//! Domain Layer (analytics, workflows, session)
//!     ↓
//! Storage Layer (CSV and YAML files)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{
    AnalyticsService, CommissionService, DashboardStore, ExpenseService, InvoiceService,
    SessionService,
};
use crate::storage::CsvConnection;

/// Services shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub store: DashboardStore<CsvConnection>,
    pub analytics_service: AnalyticsService,
    pub commission_service: CommissionService<CsvConnection>,
    pub invoice_service: InvoiceService<CsvConnection>,
    pub expense_service: ExpenseService<CsvConnection>,
    pub session_service: SessionService<CsvConnection>,
}

impl AppState {
    /// Wire the services over `connection`, load the snapshot and restore the session
    pub async fn from_connection(connection: CsvConnection) -> Result<Self> {
        info!("Setting up domain services");
        let store = DashboardStore::new(&connection);
        let session_service = SessionService::new(&connection);

        store.refresh().await.context("Failed to load dashboard data")?;
        session_service.restore().await.context("Failed to restore session")?;

        Ok(AppState {
            analytics_service: AnalyticsService::new(),
            commission_service: CommissionService::new(store.clone()),
            invoice_service: InvoiceService::new(store.clone()),
            expense_service: ExpenseService::new(store.clone(), session_service.clone()),
            session_service,
            store,
        })
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Opening data directory");
    let connection = CsvConnection::new_with_redirect(&config.data_directory)?;
    info!("Data directory: {}", connection.base_directory().display());
    AppState::from_connection(connection).await
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Ok(Router::new()
        .nest("/api", io::rest::api_router())
        .layer(cors)
        .with_state(app_state))
}
