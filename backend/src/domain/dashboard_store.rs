//! In-memory snapshot of the dashboard's collections.
//!
//! The snapshot is loaded from storage on startup and on refresh. Mutations go
//! through the `update_*` methods, which persist the whole collection first
//! and only then replace the in-memory copy. A failed save leaves the snapshot
//! as it was. Writes to one collection are serialized so two workflows never
//! overwrite each other's changes with a stale copy.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::domain::models::{
    expense::Expense, invoice::Invoice, settings::AgencySettings, student::Student,
};
use crate::storage::{Connection, ExpenseStorage, InvoiceStorage, SettingsStorage, StudentStorage};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub students: Vec<Student>,
    pub invoices: Vec<Invoice>,
    pub expenses: Vec<Expense>,
    pub settings: AgencySettings,
}

#[derive(Clone)]
pub struct DashboardStore<C: Connection> {
    student_repository: C::StudentRepository,
    invoice_repository: C::InvoiceRepository,
    expense_repository: C::ExpenseRepository,
    settings_repository: C::SettingsRepository,
    snapshot: Arc<RwLock<DashboardSnapshot>>,
    student_writes: Arc<Mutex<()>>,
    invoice_writes: Arc<Mutex<()>>,
    expense_writes: Arc<Mutex<()>>,
}

impl<C: Connection> DashboardStore<C> {
    /// Create an empty store; call [`DashboardStore::refresh`] to load it
    pub fn new(connection: &C) -> Self {
        Self {
            student_repository: connection.create_student_repository(),
            invoice_repository: connection.create_invoice_repository(),
            expense_repository: connection.create_expense_repository(),
            settings_repository: connection.create_settings_repository(),
            snapshot: Arc::new(RwLock::new(DashboardSnapshot::default())),
            student_writes: Arc::new(Mutex::new(())),
            invoice_writes: Arc::new(Mutex::new(())),
            expense_writes: Arc::new(Mutex::new(())),
        }
    }

    /// Reload every collection from storage. On error the previous snapshot stays.
    ///
    /// Holds every collection's write lock from the first read to the publish,
    /// so an update can never land between them and be overwritten by the
    /// older copy. Locks are taken in a fixed order: students, invoices, expenses.
    pub async fn refresh(&self) -> Result<DashboardSnapshot> {
        let _students_write = self.student_writes.lock().await;
        let _invoices_write = self.invoice_writes.lock().await;
        let _expenses_write = self.expense_writes.lock().await;

        let students = self.student_repository.list_students().await?;
        let invoices = self.invoice_repository.list_invoices().await?;
        let expenses = self.expense_repository.list_expenses().await?;
        let settings = self.settings_repository.get_settings().await?;

        let loaded = DashboardSnapshot {
            students,
            invoices,
            expenses,
            settings,
        };
        info!(
            "Loaded {} students, {} invoices, {} expenses",
            loaded.students.len(),
            loaded.invoices.len(),
            loaded.expenses.len()
        );

        *self.snapshot.write().await = loaded.clone();
        Ok(loaded)
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.read().await.clone()
    }

    pub async fn students(&self) -> Vec<Student> {
        self.snapshot.read().await.students.clone()
    }

    pub async fn invoices(&self) -> Vec<Invoice> {
        self.snapshot.read().await.invoices.clone()
    }

    pub async fn expenses(&self) -> Vec<Expense> {
        self.snapshot.read().await.expenses.clone()
    }

    pub async fn settings(&self) -> AgencySettings {
        self.snapshot.read().await.settings.clone()
    }

    /// Apply `mutate` to a copy of the students, persist the result, then publish it.
    /// Nothing is saved when `mutate` fails.
    pub async fn update_students<T, E, F>(&self, mutate: F) -> Result<T, E>
    where
        F: FnOnce(&mut Vec<Student>) -> Result<T, E>,
        E: From<anyhow::Error>,
    {
        let _write = self.student_writes.lock().await;
        let mut students = self.students().await;
        let outcome = mutate(&mut students)?;

        if let Err(e) = self.student_repository.save_students(&students).await {
            warn!("Saving students failed, keeping previous snapshot: {:#}", e);
            return Err(E::from(e));
        }
        self.snapshot.write().await.students = students;
        Ok(outcome)
    }

    pub async fn update_invoices<T, E, F>(&self, mutate: F) -> Result<T, E>
    where
        F: FnOnce(&mut Vec<Invoice>) -> Result<T, E>,
        E: From<anyhow::Error>,
    {
        let _write = self.invoice_writes.lock().await;
        let mut invoices = self.invoices().await;
        let outcome = mutate(&mut invoices)?;

        if let Err(e) = self.invoice_repository.save_invoices(&invoices).await {
            warn!("Saving invoices failed, keeping previous snapshot: {:#}", e);
            return Err(E::from(e));
        }
        self.snapshot.write().await.invoices = invoices;
        Ok(outcome)
    }

    pub async fn update_expenses<T, E, F>(&self, mutate: F) -> Result<T, E>
    where
        F: FnOnce(&mut Vec<Expense>) -> Result<T, E>,
        E: From<anyhow::Error>,
    {
        let _write = self.expense_writes.lock().await;
        let mut expenses = self.expenses().await;
        let outcome = mutate(&mut expenses)?;

        if let Err(e) = self.expense_repository.save_expenses(&expenses).await {
            warn!("Saving expenses failed, keeping previous snapshot: {:#}", e);
            return Err(E::from(e));
        }
        self.snapshot.write().await.expenses = expenses;
        Ok(outcome)
    }
}
