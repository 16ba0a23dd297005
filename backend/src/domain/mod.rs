//! # Domain Module
//!
//! Business logic for the agency dashboard. Nothing in here knows about HTTP;
//! storage is reached only through the traits in [`crate::storage`].
//!
//! ## Module Organization
//!
//! - **dashboard_store**: in-memory snapshot of the collections, with
//!   persist-then-publish updates
//! - **analytics_service**: branch-filtered metrics for the dashboard view
//! - **commission_service**: claim and receipt workflow for commissions
//! - **invoice_service**: paid/pending toggling of invoices
//! - **expense_service**: expense form validation and recording
//! - **session_service**: sign-in and the current user
//! - **single_flight**: reject-while-busy guard shared by the workflows
//!
//! ## Business Rules
//!
//! - Records without a branch belong to the `main` branch
//! - Commissions only move forward: Pending, Claimed, Received
//! - A failed save never changes what the dashboard shows
//! - Expenses are kept newest first

pub mod analytics_service;
pub mod branch_filter;
pub mod commission_service;
pub mod dashboard_store;
pub mod errors;
pub mod expense_service;
pub mod formatting;
pub mod invoice_service;
pub mod models;
pub mod session_service;
pub mod single_flight;

pub use analytics_service::{AnalyticsService, DashboardMetrics, DashboardQuery};
pub use branch_filter::BranchFilter;
pub use commission_service::CommissionService;
pub use dashboard_store::{DashboardSnapshot, DashboardStore};
pub use errors::{Guarded, SessionError, WorkflowError};
pub use expense_service::{ExpenseForm, ExpenseService};
pub use invoice_service::InvoiceService;
pub use session_service::SessionService;
pub use single_flight::{FlightPermit, SingleFlight};
