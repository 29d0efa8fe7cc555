//! Stored records other than tasks, plus task input types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use taskboard_core::{Priority, SortKey, Status, Task};

/// Color given to categories created without one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#3498db";

/// A user-defined task grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub created_at: DateTime<Utc>,
}

fn default_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_string()
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            created_at,
        }
    }
}

/// The categories seeded into an empty store.
pub fn default_categories(now: DateTime<Utc>) -> Vec<Category> {
    vec![
        Category::new("default-work", "Work", "#3498db", now),
        Category::new("default-personal", "Personal", "#e74c3c", now),
        Category::new("default-shopping", "Shopping", "#2ecc71", now),
    ]
}

/// Persisted user settings.
///
/// Keys this type does not know are kept in `extra` and written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Raw sort key name; unknown names sort in stored order.
    #[serde(default = "default_sort_by")]
    pub sort_by: String,

    #[serde(default = "default_show_completed")]
    pub show_completed: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_sort_by() -> String {
    SortKey::default().as_str().to_string()
}

fn default_show_completed() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            sort_by: default_sort_by(),
            show_completed: default_show_completed(),
            extra: Map::new(),
        }
    }
}

impl Settings {
    /// The stored sort key, or `None` if the stored name is not recognized.
    pub fn sort_key(&self) -> Option<SortKey> {
        SortKey::parse(&self.sort_by)
    }
}

/// A full snapshot of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub tasks: Vec<Task>,
    pub categories: Vec<Category>,
    pub settings: Option<Settings>,
    pub export_date: DateTime<Utc>,
}

/// Format version written into backups.
pub const BACKUP_VERSION: &str = "1.0";

/// An export wrapped with backup metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    pub data: ExportData,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl Backup {
    /// Suggested file name, e.g. `taskboard-backup-2025-12-09.json`.
    pub fn file_name(&self) -> String {
        format!("taskboard-backup-{}.json", self.timestamp.format("%Y-%m-%d"))
    }
}

/// What an import replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Number of tasks written, if the document had a task list.
    pub tasks: Option<usize>,
    /// Number of categories written, if the document had a category list.
    pub categories: Option<usize>,
    pub settings: bool,
}

/// Storage usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInfo {
    pub total_size: usize,
    pub item_count: usize,
    pub size_formatted: String,
}

/// Input for creating a task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub category_id: String,
    pub priority: Priority,
    pub status: Status,
    pub due_date: Option<String>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, category_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category_id: category_id.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            category_id: task.category_id.clone(),
            priority: task.priority.clone(),
            status: task.status.clone(),
            due_date: task.due_date.clone(),
        }
    }
}

/// A partial task update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    /// An empty description clears it.
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    /// `Some(None)` clears the due date.
    pub due_date: Option<Option<String>>,
}

impl TaskPatch {
    /// True if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
