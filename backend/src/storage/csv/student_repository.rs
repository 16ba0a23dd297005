use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use super::connection::CsvConnection;
use crate::domain::models::student::Student;
use crate::storage::traits::StudentStorage;

const STUDENTS_FILE: &str = "students.csv";

/// CSV-backed student repository
#[derive(Clone)]
pub struct StudentRepository {
    connection: CsvConnection,
}

impl StudentRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl StudentStorage for StudentRepository {
    async fn list_students(&self) -> Result<Vec<Student>> {
        self.connection.read_records(STUDENTS_FILE)
    }

    async fn save_students(&self, students: &[Student]) -> Result<()> {
        info!("Saving {} students", students.len());
        self.connection.write_records(STUDENTS_FILE, students)
    }
}
