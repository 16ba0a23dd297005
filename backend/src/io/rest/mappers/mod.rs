//! Conversions between domain models and the shared DTOs.

pub mod dashboard_mapper;
pub mod expense_mapper;
pub mod record_mapper;
pub mod user_mapper;
