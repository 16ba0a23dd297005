//! # Storage Module
//!
//! Persistence for students, invoices, expenses, settings and the session.
//! The domain layer only sees the traits in [`traits`]; the file-backed
//! implementation lives in [`csv`].
//!
//! - **Collections**: CSV files, one per collection, rewritten whole
//! - **Settings, users, session**: YAML documents
//! - **Writes**: temp file then rename, so a crash never leaves a torn file

pub mod csv;
pub mod traits;

pub use self::csv::CsvConnection;
pub use traits::*;

#[cfg(test)]
pub mod memory;
