//! In-memory storage backend for service tests.
//!
//! Counts save calls, can be told to fail every save, and can hold saves
//! open until the test releases them so a workflow can be caught mid-flight.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use super::traits::{
    Connection, ExpenseStorage, InvoiceStorage, SessionStorage, SettingsStorage, StudentStorage,
};
use crate::domain::models::{
    expense::Expense,
    invoice::Invoice,
    settings::AgencySettings,
    student::Student,
    user::{User, UserAccount},
};

#[derive(Default)]
struct MemoryInner {
    students: Mutex<Vec<Student>>,
    invoices: Mutex<Vec<Invoice>>,
    expenses: Mutex<Vec<Expense>>,
    settings: Mutex<AgencySettings>,
    session: Mutex<Option<User>>,
    accounts: Mutex<Vec<UserAccount>>,
    student_saves: AtomicUsize,
    invoice_saves: AtomicUsize,
    expense_saves: AtomicUsize,
    student_lists: AtomicUsize,
    fail_saves: AtomicBool,
    save_gate: Mutex<Option<Arc<Semaphore>>>,
    list_gate: Mutex<Option<Arc<Semaphore>>>,
}

#[derive(Clone, Default)]
pub struct MemoryConnection {
    inner: Arc<MemoryInner>,
}

impl MemoryConnection {
    pub fn seed_students(&self, students: Vec<Student>) {
        *self.inner.students.lock().unwrap() = students;
    }

    pub fn seed_invoices(&self, invoices: Vec<Invoice>) {
        *self.inner.invoices.lock().unwrap() = invoices;
    }

    pub fn seed_expenses(&self, expenses: Vec<Expense>) {
        *self.inner.expenses.lock().unwrap() = expenses;
    }

    pub fn seed_settings(&self, settings: AgencySettings) {
        *self.inner.settings.lock().unwrap() = settings;
    }

    pub fn seed_accounts(&self, accounts: Vec<UserAccount>) {
        *self.inner.accounts.lock().unwrap() = accounts;
    }

    pub fn stored_students(&self) -> Vec<Student> {
        self.inner.students.lock().unwrap().clone()
    }

    pub fn stored_invoices(&self) -> Vec<Invoice> {
        self.inner.invoices.lock().unwrap().clone()
    }

    pub fn stored_expenses(&self) -> Vec<Expense> {
        self.inner.expenses.lock().unwrap().clone()
    }

    pub fn stored_session(&self) -> Option<User> {
        self.inner.session.lock().unwrap().clone()
    }

    pub fn student_save_count(&self) -> usize {
        self.inner.student_saves.load(Ordering::SeqCst)
    }

    pub fn invoice_save_count(&self) -> usize {
        self.inner.invoice_saves.load(Ordering::SeqCst)
    }

    pub fn expense_save_count(&self) -> usize {
        self.inner.expense_saves.load(Ordering::SeqCst)
    }

    pub fn fail_saves(&self, fail: bool) {
        self.inner.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Make every following save wait until [`MemoryConnection::release_saves`]
    pub fn hold_saves(&self) {
        *self.inner.save_gate.lock().unwrap() = Some(Arc::new(Semaphore::new(0)));
    }

    pub fn release_saves(&self) {
        if let Some(gate) = self.inner.save_gate.lock().unwrap().take() {
            gate.add_permits(1024);
        }
    }

    /// Make every following `list_students` read its data, then wait until
    /// [`MemoryConnection::release_lists`] before returning it
    pub fn hold_lists(&self) {
        *self.inner.list_gate.lock().unwrap() = Some(Arc::new(Semaphore::new(0)));
    }

    pub fn release_lists(&self) {
        if let Some(gate) = self.inner.list_gate.lock().unwrap().take() {
            gate.add_permits(1024);
        }
    }

    /// Yield until `list_students` has been called at least `count` times
    pub async fn wait_for_student_lists(&self, count: usize) {
        while self.inner.student_lists.load(Ordering::SeqCst) < count {
            tokio::task::yield_now().await;
        }
    }

    /// Yield until at least `count` saves of any collection have started
    pub async fn wait_for_saves(&self, count: usize) {
        while self.student_save_count() + self.invoice_save_count() + self.expense_save_count() < count {
            tokio::task::yield_now().await;
        }
    }

    async fn enter_save(&self, counter: &AtomicUsize) -> Result<()> {
        counter.fetch_add(1, Ordering::SeqCst);

        let gate = self.inner.save_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            let _permit = gate.acquire().await?;
        }

        if self.inner.fail_saves.load(Ordering::SeqCst) {
            return Err(anyhow!("storage unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl StudentStorage for MemoryConnection {
    async fn list_students(&self) -> Result<Vec<Student>> {
        let students = self.stored_students();
        self.inner.student_lists.fetch_add(1, Ordering::SeqCst);

        let gate = self.inner.list_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            let _permit = gate.acquire().await?;
        }
        Ok(students)
    }

    async fn save_students(&self, students: &[Student]) -> Result<()> {
        self.enter_save(&self.inner.student_saves).await?;
        *self.inner.students.lock().unwrap() = students.to_vec();
        Ok(())
    }
}

#[async_trait]
impl InvoiceStorage for MemoryConnection {
    async fn list_invoices(&self) -> Result<Vec<Invoice>> {
        Ok(self.stored_invoices())
    }

    async fn save_invoices(&self, invoices: &[Invoice]) -> Result<()> {
        self.enter_save(&self.inner.invoice_saves).await?;
        *self.inner.invoices.lock().unwrap() = invoices.to_vec();
        Ok(())
    }
}

#[async_trait]
impl ExpenseStorage for MemoryConnection {
    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        Ok(self.stored_expenses())
    }

    async fn save_expenses(&self, expenses: &[Expense]) -> Result<()> {
        self.enter_save(&self.inner.expense_saves).await?;
        *self.inner.expenses.lock().unwrap() = expenses.to_vec();
        Ok(())
    }
}

#[async_trait]
impl SettingsStorage for MemoryConnection {
    async fn get_settings(&self) -> Result<AgencySettings> {
        Ok(self.inner.settings.lock().unwrap().clone())
    }
}

#[async_trait]
impl SessionStorage for MemoryConnection {
    async fn load_session(&self) -> Result<Option<User>> {
        Ok(self.stored_session())
    }

    async fn save_session(&self, user: &User) -> Result<()> {
        if self.inner.fail_saves.load(Ordering::SeqCst) {
            return Err(anyhow!("storage unavailable"));
        }
        *self.inner.session.lock().unwrap() = Some(user.clone());
        Ok(())
    }

    async fn clear_session(&self) -> Result<()> {
        *self.inner.session.lock().unwrap() = None;
        Ok(())
    }

    async fn list_accounts(&self) -> Result<Vec<UserAccount>> {
        Ok(self.inner.accounts.lock().unwrap().clone())
    }
}

impl Connection for MemoryConnection {
    type StudentRepository = MemoryConnection;
    type InvoiceRepository = MemoryConnection;
    type ExpenseRepository = MemoryConnection;
    type SettingsRepository = MemoryConnection;
    type SessionRepository = MemoryConnection;

    fn create_student_repository(&self) -> Self::StudentRepository {
        self.clone()
    }

    fn create_invoice_repository(&self) -> Self::InvoiceRepository {
        self.clone()
    }

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        self.clone()
    }

    fn create_settings_repository(&self) -> Self::SettingsRepository {
        self.clone()
    }

    fn create_session_repository(&self) -> Self::SessionRepository {
        self.clone()
    }
}
