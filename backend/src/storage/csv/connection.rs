use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::{
    expense_repository::ExpenseRepository, invoice_repository::InvoiceRepository,
    session_repository::SessionRepository, settings_repository::SettingsRepository,
    student_repository::StudentRepository,
};
use crate::storage::traits::Connection;

/// Name of the file that points the default data directory somewhere else
pub const REDIRECT_FILE_NAME: &str = ".agency_redirect";

/// CsvConnection owns the data directory and the file-level read/write helpers
/// every repository goes through
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in `default_dir`, or wherever its redirect file points
    pub fn new_with_redirect<P: AsRef<Path>>(default_dir: P) -> Result<Self> {
        Self::new(resolve_redirect(default_dir.as_ref()))
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Read every row of a CSV file. A missing file reads as no rows.
    pub fn read_records<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let file_path = self.file_path(file_name);
        if !file_path.exists() {
            debug!("{} does not exist yet, reading as empty", file_path.display());
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)?;
        let mut csv_reader = ::csv::Reader::from_reader(BufReader::new(file));

        let mut records = Vec::new();
        for (index, result) in csv_reader.deserialize().enumerate() {
            let record: T = result.with_context(|| {
                format!("Malformed row {} in {}", index + 1, file_path.display())
            })?;
            records.push(record);
        }

        Ok(records)
    }

    /// Replace the contents of a CSV file with `records`
    pub fn write_records<T: Serialize>(&self, file_name: &str, records: &[T]) -> Result<()> {
        let file_path = self.file_path(file_name);
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let mut csv_writer = ::csv::Writer::from_writer(BufWriter::new(file));
            for record in records {
                csv_writer.serialize(record)?;
            }
            csv_writer.flush()?;
        }

        fs::rename(&temp_path, &file_path)?;
        debug!("Wrote {} rows to {}", records.len(), file_path.display());
        Ok(())
    }

    /// Read a YAML document, `None` when the file is absent
    pub fn read_yaml<T: DeserializeOwned>(&self, file_name: &str) -> Result<Option<T>> {
        let file_path = self.file_path(file_name);
        if !file_path.exists() {
            return Ok(None);
        }

        let yaml_content = fs::read_to_string(&file_path)?;
        let value = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse {}", file_path.display()))?;
        Ok(Some(value))
    }

    pub fn write_yaml<T: Serialize>(&self, file_name: &str, value: &T) -> Result<()> {
        let file_path = self.file_path(file_name);
        let yaml_content = serde_yaml::to_string(value)?;

        let temp_path = file_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &file_path)?;
        Ok(())
    }

    pub fn remove_file(&self, file_name: &str) -> Result<()> {
        let file_path = self.file_path(file_name);
        if file_path.exists() {
            fs::remove_file(&file_path)?;
        }
        Ok(())
    }
}

/// Follow a redirect file inside `default_dir` when it names an existing directory
fn resolve_redirect(default_dir: &Path) -> PathBuf {
    let redirect_file = default_dir.join(REDIRECT_FILE_NAME);

    if !redirect_file.exists() {
        info!("No redirect file found, using data directory: {}", default_dir.display());
        return default_dir.to_path_buf();
    }

    match fs::read_to_string(&redirect_file) {
        Ok(redirected_path) => {
            let redirected_path = redirected_path.trim();
            let path = PathBuf::from(redirected_path);
            if path.exists() {
                info!("Found redirect file, using data directory: {}", path.display());
                path
            } else {
                warn!(
                    "Redirect file points to non-existent directory: {}. Using default.",
                    redirected_path
                );
                default_dir.to_path_buf()
            }
        }
        Err(e) => {
            error!("Failed to read redirect file: {}. Using default directory.", e);
            default_dir.to_path_buf()
        }
    }
}

impl Connection for CsvConnection {
    type StudentRepository = StudentRepository;
    type InvoiceRepository = InvoiceRepository;
    type ExpenseRepository = ExpenseRepository;
    type SettingsRepository = SettingsRepository;
    type SessionRepository = SessionRepository;

    fn create_student_repository(&self) -> Self::StudentRepository {
        StudentRepository::new(self.clone())
    }

    fn create_invoice_repository(&self) -> Self::InvoiceRepository {
        InvoiceRepository::new(self.clone())
    }

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        ExpenseRepository::new(self.clone())
    }

    fn create_settings_repository(&self) -> Self::SettingsRepository {
        SettingsRepository::new(self.clone())
    }

    fn create_session_repository(&self) -> Self::SessionRepository {
        SessionRepository::new(self.clone())
    }
}
