pub mod connection;
pub mod expense_repository;
pub mod invoice_repository;
pub mod session_repository;
pub mod settings_repository;
pub mod student_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
