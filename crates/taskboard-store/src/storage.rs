//! Typed storage over a [`KeyValueStore`].
//!
//! Tasks, categories and settings each live under one key as a JSON
//! document. Reads are forgiving: a missing or corrupt document is logged and
//! read as empty, and malformed task records are skipped. Only backend I/O
//! failures surface as errors.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use taskboard_core::{Clock, SystemClock, Task};
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::kv::KeyValueStore;
use crate::model::{
    default_categories, Backup, Category, ExportData, ImportSummary, Settings, StorageInfo,
    BACKUP_VERSION,
};

/// Store key for the task list.
pub const TASKS_KEY: &str = "taskManager_tasks";

/// Store key for the category list.
pub const CATEGORIES_KEY: &str = "taskManager_categories";

/// Store key for the settings object.
pub const SETTINGS_KEY: &str = "taskManager_settings";

/// Typed access to the persisted tasks, categories and settings.
#[derive(Debug, Clone)]
pub struct Storage<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore> Storage<S> {
    /// Creates storage using the system clock.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> Storage<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Seeds defaults for anything missing: an empty task list, the three
    /// default categories and default settings.
    pub fn initialize(&self) -> Result<()> {
        if self.store.get(TASKS_KEY)?.is_none() {
            self.save_tasks(&[])?;
        }
        if self.categories()?.is_empty() {
            self.save_categories(&default_categories(self.clock.now()))?;
        }
        if self.settings()?.is_none() {
            self.save_settings(&Settings::default())?;
        }
        Ok(())
    }

    // ==================== Tasks ====================

    /// Loads every well-formed task.
    pub fn tasks(&self) -> Result<Vec<Task>> {
        let Some(Value::Array(records)) = self.read_json::<Value>(TASKS_KEY)? else {
            return Ok(Vec::new());
        };

        let tasks: Vec<Task> = records.iter().filter_map(Task::from_record).collect();
        if tasks.len() < records.len() {
            warn!(
                skipped = records.len() - tasks.len(),
                "skipping malformed task records"
            );
        }
        Ok(tasks)
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        self.write_json(TASKS_KEY, &tasks)
    }

    // ==================== Categories ====================

    pub fn categories(&self) -> Result<Vec<Category>> {
        let Some(Value::Array(records)) = self.read_json::<Value>(CATEGORIES_KEY)? else {
            return Ok(Vec::new());
        };

        Ok(records
            .into_iter()
            .filter_map(|record| serde_json::from_value(record).ok())
            .collect())
    }

    pub fn save_categories(&self, categories: &[Category]) -> Result<()> {
        self.write_json(CATEGORIES_KEY, &categories)
    }

    // ==================== Settings ====================

    /// Returns the stored settings, or `None` if absent or unreadable.
    pub fn settings(&self) -> Result<Option<Settings>> {
        self.read_json(SETTINGS_KEY)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.write_json(SETTINGS_KEY, settings)
    }

    /// Sets one settings key, creating the settings object if needed.
    pub fn update_setting(&self, key: &str, value: Value) -> Result<()> {
        let mut object = match self.read_json::<Value>(SETTINGS_KEY)? {
            Some(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        object.insert(key.to_string(), value);
        self.write_json(SETTINGS_KEY, &Value::Object(object))
    }

    // ==================== Bulk Operations ====================

    /// Removes all data, then re-seeds the defaults.
    pub fn clear_all(&self) -> Result<()> {
        for key in [TASKS_KEY, CATEGORIES_KEY, SETTINGS_KEY] {
            self.store.remove(key)?;
        }
        self.initialize()
    }

    pub fn export(&self) -> Result<ExportData> {
        Ok(ExportData {
            tasks: self.tasks()?,
            categories: self.categories()?,
            settings: self.settings()?,
            export_date: self.clock.now(),
        })
    }

    /// Replaces each part present in `data`.
    ///
    /// `tasks` and `categories` are imported when they are arrays, `settings`
    /// when it is an object. Malformed elements inside the arrays are dropped.
    pub fn import(&self, data: &Value) -> Result<ImportSummary> {
        let Some(object) = data.as_object() else {
            return Err(StoreError::InvalidImport("expected a JSON object".to_string()));
        };

        let mut summary = ImportSummary::default();

        if let Some(Value::Array(records)) = object.get("tasks") {
            let tasks: Vec<Task> = records.iter().filter_map(Task::from_record).collect();
            self.save_tasks(&tasks)?;
            summary.tasks = Some(tasks.len());
        }
        if let Some(Value::Array(records)) = object.get("categories") {
            let categories: Vec<Category> = records
                .iter()
                .filter_map(|record| serde_json::from_value(record.clone()).ok())
                .collect();
            self.save_categories(&categories)?;
            summary.categories = Some(categories.len());
        }
        if let Some(settings @ Value::Object(_)) = object.get("settings") {
            self.write_json(SETTINGS_KEY, settings)?;
            summary.settings = true;
        }

        debug!(?summary, "import complete");
        Ok(summary)
    }

    /// Wraps a fresh export with backup metadata.
    pub fn create_backup(&self) -> Result<Backup> {
        Ok(Backup {
            data: self.export()?,
            timestamp: self.clock.now(),
            version: BACKUP_VERSION.to_string(),
        })
    }

    /// Restores from a backup document (an object with a `data` export).
    pub fn restore_backup(&self, backup: &Value) -> Result<ImportSummary> {
        match backup.get("data") {
            Some(data @ Value::Object(_)) => self.import(data),
            _ => Err(StoreError::InvalidImport(
                "invalid backup file format".to_string(),
            )),
        }
    }

    /// Imports either a backup document or a plain export.
    pub fn import_document(&self, document: &Value) -> Result<ImportSummary> {
        if document.get("data").is_some() {
            self.restore_backup(document)
        } else {
            self.import(document)
        }
    }

    /// Reports how much the store holds.
    pub fn storage_info(&self) -> Result<StorageInfo> {
        let keys = self.store.keys()?;
        let mut total_size = 0;
        for key in &keys {
            if let Some(value) = self.store.get(key)? {
                total_size += value.len();
            }
        }

        Ok(StorageInfo {
            total_size,
            item_count: keys.len(),
            size_formatted: format_bytes(total_size),
        })
    }

    // ==================== JSON helpers ====================

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "stored value is corrupt, treating as empty");
                Ok(None)
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)
    }
}

/// Formats a byte count as `0 Bytes`, `512 Bytes`, `1.5 KB`, ...
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}
