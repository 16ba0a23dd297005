//! # Storage Traits
//!
//! Storage abstractions the domain layer works against. Every collection is
//! read whole and saved whole: a save replaces the stored collection with
//! the given list, last write wins.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{
    expense::Expense,
    invoice::Invoice,
    settings::AgencySettings,
    student::Student,
    user::{User, UserAccount},
};

#[async_trait]
pub trait StudentStorage: Send + Sync {
    async fn list_students(&self) -> Result<Vec<Student>>;

    /// Replace the stored student collection
    async fn save_students(&self, students: &[Student]) -> Result<()>;
}

#[async_trait]
pub trait InvoiceStorage: Send + Sync {
    async fn list_invoices(&self) -> Result<Vec<Invoice>>;

    /// Replace the stored invoice collection
    async fn save_invoices(&self, invoices: &[Invoice]) -> Result<()>;
}

#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    /// Expenses newest first
    async fn list_expenses(&self) -> Result<Vec<Expense>>;

    /// Replace the stored expense collection
    async fn save_expenses(&self, expenses: &[Expense]) -> Result<()>;
}

#[async_trait]
pub trait SettingsStorage: Send + Sync {
    /// Stored settings, or defaults when none have been written
    async fn get_settings(&self) -> Result<AgencySettings>;
}

#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// The persisted signed-in user, if any
    async fn load_session(&self) -> Result<Option<User>>;

    async fn save_session(&self, user: &User) -> Result<()>;

    async fn clear_session(&self) -> Result<()>;

    async fn list_accounts(&self) -> Result<Vec<UserAccount>>;
}

/// Factory for the repositories of one storage backend.
///
/// Services are generic over this trait so the domain layer never names a
/// concrete backend.
pub trait Connection: Send + Sync + Clone + 'static {
    type StudentRepository: StudentStorage + Clone + 'static;
    type InvoiceRepository: InvoiceStorage + Clone + 'static;
    type ExpenseRepository: ExpenseStorage + Clone + 'static;
    type SettingsRepository: SettingsStorage + Clone + 'static;
    type SessionRepository: SessionStorage + Clone + 'static;

    fn create_student_repository(&self) -> Self::StudentRepository;
    fn create_invoice_repository(&self) -> Self::InvoiceRepository;
    fn create_expense_repository(&self) -> Self::ExpenseRepository;
    fn create_settings_repository(&self) -> Self::SettingsRepository;
    fn create_session_repository(&self) -> Self::SessionRepository;
}
