//! Task model.
//!
//! Tasks are stored as camelCase JSON records. Priority and status are kept
//! permissive on read: a value outside the known enumeration is preserved as
//! `Unrecognized` rather than rejected, so a hand-edited or older store never
//! makes the filtering engine fail.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dates::parse_due_date;
use crate::error::CoreError;

/// Task priority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    /// A stored value outside the known set.
    Unrecognized(String),
}

impl Priority {
    /// The recognized priorities, lowest first.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    const NAMES: [&'static str; 3] = ["low", "medium", "high"];

    /// Returns the stored string form.
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Unrecognized(raw) => raw,
        }
    }

    /// Sort rank (high=3, medium=2, low=1). Unrecognized values rank as medium.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium | Priority::Unrecognized(_) => 2,
            Priority::Low => 1,
        }
    }

    /// Returns true for the three known priorities.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Priority::Unrecognized(_))
    }

    /// Human-readable label. Unrecognized values display as "Medium".
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Low => "Low",
            Priority::Medium | Priority::Unrecognized(_) => "Medium",
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            _ => Priority::Unrecognized(value),
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    /// Parses a known priority (case-insensitive). Unknown text is an error here;
    /// only deserialization preserves unrecognized values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Priority::from(s.trim().to_lowercase()) {
            Priority::Unrecognized(_) => Err(CoreError::unknown_value("priority", s, &Self::NAMES)),
            known => Ok(known),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Completed,
    /// A stored value outside the known set.
    Unrecognized(String),
}

impl Status {
    /// The recognized statuses in workflow order.
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Completed];

    const NAMES: [&'static str; 3] = ["pending", "in-progress", "completed"];

    /// Returns the stored string form.
    pub fn as_str(&self) -> &str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
            Status::Unrecognized(raw) => raw,
        }
    }

    /// Sort rank (completed=3, in-progress=2, pending=1). Unrecognized values rank as pending.
    pub fn rank(&self) -> u8 {
        match self {
            Status::Completed => 3,
            Status::InProgress => 2,
            Status::Pending | Status::Unrecognized(_) => 1,
        }
    }

    /// Returns true for the three known statuses.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Status::Unrecognized(_))
    }

    /// Human-readable label. Unrecognized values display as "Pending".
    pub fn label(&self) -> &'static str {
        match self {
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::Pending | Status::Unrecognized(_) => "Pending",
        }
    }

    /// Next status in the toggle cycle: pending → in-progress → completed → pending.
    ///
    /// An unrecognized status restarts the cycle at pending.
    pub fn next(&self) -> Status {
        match self {
            Status::Pending => Status::InProgress,
            Status::InProgress => Status::Completed,
            Status::Completed | Status::Unrecognized(_) => Status::Pending,
        }
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Status::Pending,
            "in-progress" => Status::InProgress,
            "completed" => Status::Completed,
            _ => Status::Unrecognized(value),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Status {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Status::from(s.trim().to_lowercase()) {
            Status::Unrecognized(_) => Err(CoreError::unknown_value("status", s, &Self::NAMES)),
            known => Ok(known),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task record.
///
/// `due_date` keeps the raw `YYYY-MM-DD` text so that malformed values survive
/// a load/save cycle; every date predicate treats them as "no date".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned at creation.
    pub id: String,

    /// Task title.
    pub title: String,

    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Opaque reference to the owning category.
    #[serde(default)]
    pub category_id: String,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub status: Status,

    /// Due date in `YYYY-MM-DD` form.
    #[serde(default)]
    pub due_date: Option<String>,

    /// When the task was created.
    pub created_at: DateTime<Utc>,

    /// When the task was last modified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a task with default priority (medium) and status (pending).
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            category_id: category_id.into(),
            priority: Priority::default(),
            status: Status::default(),
            due_date: None,
            created_at,
            updated_at: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Sets the raw due date text.
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Returns the parsed due date, or `None` if absent or malformed.
    pub fn due(&self) -> Option<NaiveDate> {
        self.due_date.as_deref().and_then(parse_due_date)
    }

    /// Returns the raw due date text, if any.
    pub fn due_str(&self) -> Option<&str> {
        self.due_date.as_deref()
    }

    /// Builds a task from an untyped JSON record.
    ///
    /// Returns `None` for anything that is not a well-formed task object
    /// (not an object, missing `id`/`title`/`createdAt`, or wrongly typed fields).
    pub fn from_record(record: &Value) -> Option<Task> {
        if !record.is_object() {
            return None;
        }
        Task::deserialize(record).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_priority_roundtrip_known_values() {
        for priority in Priority::ALL {
            let json = serde_json::to_string(&priority).unwrap();
            let back: Priority = serde_json::from_str(&json).unwrap();
            assert_eq!(back, priority);
        }
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_priority_unrecognized_preserved() {
        let priority: Priority = serde_json::from_str("\"urgent\"").unwrap();
        assert_eq!(priority, Priority::Unrecognized("urgent".to_string()));
        assert_eq!(priority.rank(), 2);
        assert_eq!(priority.label(), "Medium");
        assert!(!priority.is_recognized());
        assert_eq!(serde_json::to_string(&priority).unwrap(), "\"urgent\"");
    }

    #[test]
    fn test_priority_from_str_strict() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" low ".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_status_ranks_and_labels() {
        assert_eq!(Status::Completed.rank(), 3);
        assert_eq!(Status::InProgress.rank(), 2);
        assert_eq!(Status::Pending.rank(), 1);
        assert_eq!(Status::Unrecognized("blocked".into()).rank(), 1);
        assert_eq!(Status::InProgress.label(), "In Progress");
        assert_eq!(Status::Unrecognized("blocked".into()).label(), "Pending");
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            "in-progress".parse::<Status>().unwrap(),
            Status::InProgress
        );
    }

    #[test]
    fn test_status_cycle() {
        assert_eq!(Status::Pending.next(), Status::InProgress);
        assert_eq!(Status::InProgress.next(), Status::Completed);
        assert_eq!(Status::Completed.next(), Status::Pending);
        assert_eq!(Status::Unrecognized("x".into()).next(), Status::Pending);
    }

    #[test]
    fn test_task_deserialize_camel_case() {
        let record = json!({
            "id": "t1",
            "title": "Write report",
            "description": "Quarterly numbers",
            "categoryId": "default-work",
            "priority": "high",
            "status": "in-progress",
            "dueDate": "2025-12-10",
            "createdAt": "2025-12-01T09:00:00Z"
        });

        let task: Task = serde_json::from_value(record).unwrap();
        assert_eq!(task.category_id, "default-work");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.due(), NaiveDate::from_ymd_opt(2025, 12, 10));
        assert_eq!(task.created_at, created());
    }

    #[test]
    fn test_task_defaults_for_missing_optional_fields() {
        let record = json!({
            "id": "t1",
            "title": "Minimal",
            "createdAt": "2025-12-01T09:00:00Z"
        });

        let task = Task::from_record(&record).expect("minimal record is well-formed");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, Status::Pending);
        assert!(task.description.is_none());
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_task_malformed_due_date_is_kept_but_unparsed() {
        let task = Task::new("t1", "Task", "c", created()).with_due_date("2025-13-45");
        assert_eq!(task.due_str(), Some("2025-13-45"));
        assert!(task.due().is_none());
    }

    #[test]
    fn test_from_record_rejects_malformed() {
        assert!(Task::from_record(&json!(null)).is_none());
        assert!(Task::from_record(&json!("task")).is_none());
        assert!(Task::from_record(&json!([1, 2])).is_none());
        assert!(Task::from_record(&json!({"title": "no id"})).is_none());
        assert!(Task::from_record(&json!({
            "id": 7,
            "title": "numeric id",
            "createdAt": "2025-12-01T09:00:00Z"
        }))
        .is_none());
    }

    #[test]
    fn test_task_serialize_skips_missing_updated_at() {
        let task = Task::new("t1", "Task", "c", created());
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"categoryId\":\"c\""));
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("updatedAt"));
    }
}
