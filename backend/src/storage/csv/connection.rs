use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use super::expense_repository::{CsvExpenseRepository, EXPENSE_CSV_HEADER};
use super::settings_repository::YamlSettingsRepository;
use crate::storage::traits::Connection;

const EXPENSES_FILE_NAME: &str = "expenses.csv";
const SETTINGS_FILE_NAME: &str = "settings.yaml";

/// CsvConnection owns the data directory and the lock that serializes writers
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Open (creating if needed) a data directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn expenses_file_path(&self) -> PathBuf {
        self.base_directory.join(EXPENSES_FILE_NAME)
    }

    pub fn settings_file_path(&self) -> PathBuf {
        self.base_directory.join(SETTINGS_FILE_NAME)
    }

    /// Create `expenses.csv` with just a header row if it is missing.
    /// Never truncates an existing file, so readers may call it without the write lock.
    pub fn ensure_expenses_file_exists(&self) -> Result<()> {
        let file_path = self.expenses_file_path();
        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file_path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to create {}", file_path.display()))
            }
        };

        let mut writer = ::csv::Writer::from_writer(file);
        writer.write_record(EXPENSE_CSV_HEADER)?;
        writer.flush()?;
        info!("Created expenses file: {}", file_path.display());
        Ok(())
    }

    /// Held for the whole read-modify-write cycle of any mutation
    pub async fn lock_for_write(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Write `contents` to `target` through a sibling temp file and a rename
    pub fn write_atomically(&self, target: &Path, contents: &[u8]) -> Result<()> {
        let temp_path = target.with_extension("tmp");
        fs::write(&temp_path, contents)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, target)
            .with_context(|| format!("Failed to replace {}", target.display()))?;
        Ok(())
    }
}

impl Connection for CsvConnection {
    type ExpenseRepository = CsvExpenseRepository;
    type SettingsRepository = YamlSettingsRepository;

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        CsvExpenseRepository::new(self.clone())
    }

    fn create_settings_repository(&self) -> Self::SettingsRepository {
        YamlSettingsRepository::new(self.clone())
    }
}
