//! Task output formatting.

use chrono::{DateTime, NaiveDate, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use taskboard_core::dates::is_due_soon;
use taskboard_core::{due_date_status, Clock, DueDateStatus, Task};
use taskboard_store::{CategoryManager, KeyValueStore};

use super::helpers::{
    due_label, format_category, format_datetime, format_days_until, format_due, format_priority,
    format_status, truncate_id, truncate_str,
};
use crate::commands::config::DateFormat;

/// JSON output structure for list command.
#[derive(Serialize)]
pub struct ListOutput<'a> {
    pub tasks: Vec<TaskOutput<'a>>,
    /// Number of tasks that matched before the limit was applied.
    pub total: usize,
    pub has_more: bool,
}

/// JSON output structure for a single task.
#[derive(Serialize)]
pub struct TaskOutput<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub category_id: &'a str,
    pub category_name: &'a str,
    pub priority: &'a str,
    pub status: &'a str,
    pub due_date: Option<&'a str>,
    pub due_status: DueDateStatus,
    pub due_soon: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl<'a> TaskOutput<'a> {
    pub fn new<S: KeyValueStore, C: Clock>(
        task: &'a Task,
        categories: &'a CategoryManager<S, C>,
        today: NaiveDate,
    ) -> Self {
        Self {
            id: &task.id,
            title: &task.title,
            description: task.description.as_deref(),
            category_id: &task.category_id,
            category_name: categories.name_for(&task.category_id),
            priority: task.priority.as_str(),
            status: task.status.as_str(),
            due_date: task.due_date.as_deref(),
            due_status: due_date_status(task.due_str(), today),
            due_soon: is_due_soon(task.due_str(), today),
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Formats tasks as JSON.
pub fn format_tasks_json<S: KeyValueStore, C: Clock>(
    tasks: &[&Task],
    total: usize,
    categories: &CategoryManager<S, C>,
    today: NaiveDate,
) -> Result<String, serde_json::Error> {
    let output = ListOutput {
        tasks: tasks
            .iter()
            .map(|task| TaskOutput::new(task, categories, today))
            .collect(),
        total,
        has_more: total > tasks.len(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats a single task as JSON.
pub fn format_task_json<S: KeyValueStore, C: Clock>(
    task: &Task,
    categories: &CategoryManager<S, C>,
    today: NaiveDate,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&TaskOutput::new(task, categories, today))
}

/// Formats tasks as a table.
pub fn format_tasks_table<S: KeyValueStore, C: Clock>(
    tasks: &[&Task],
    categories: &CategoryManager<S, C>,
    today: NaiveDate,
    date_format: DateFormat,
    use_colors: bool,
) -> String {
    if tasks.is_empty() {
        return "No tasks found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<8} {:<7} {:<12} {:<17} {:<12} {}",
        "ID", "Pri", "Status", "Due", "Category", "Title"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for task in tasks {
        let category = format_category(
            &truncate_str(categories.name_for(&task.category_id), 12),
            categories.color_for(&task.category_id),
            12,
            use_colors,
        );

        let line = format!(
            "{:<8} {} {} {} {} {}",
            truncate_id(&task.id),
            format_priority(&task.priority, 7, use_colors),
            format_status(&task.status, 12, use_colors),
            format_due(task, today, date_format, 17, use_colors),
            category,
            task.title
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

/// Formats task details as a human-readable block (show command).
pub fn format_task_details_table<S: KeyValueStore, C: Clock>(
    task: &Task,
    categories: &CategoryManager<S, C>,
    today: NaiveDate,
    date_format: DateFormat,
    use_colors: bool,
) -> String {
    let mut output = String::new();

    let title_label = if use_colors {
        "Task:".bold().to_string()
    } else {
        "Task:".to_string()
    };
    output.push_str(&format!("{title_label} {}\n", task.title));
    output.push_str(&format!("ID: {}\n", task.id));

    let category = format_category(
        categories.name_for(&task.category_id),
        categories.color_for(&task.category_id),
        0,
        use_colors,
    );
    output.push_str(&format!("Category: {category}\n"));
    output.push_str(&format!(
        "Priority: {}\n",
        format_priority(&task.priority, 0, use_colors)
    ));
    output.push_str(&format!(
        "Status: {}\n",
        format_status(&task.status, 0, use_colors)
    ));

    let mut due = due_label(task.due_str(), today, date_format);
    if let Some(distance) = format_days_until(task.due_str(), today) {
        due.push_str(&format!(" ({distance})"));
    }
    output.push_str(&format!("Due: {due}\n"));

    output.push_str(&format!("Created: {}\n", format_datetime(&task.created_at)));
    if let Some(updated) = &task.updated_at {
        output.push_str(&format!("Updated: {}\n", format_datetime(updated)));
    }

    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        output.push_str("Description:\n");
        for line in description.lines() {
            output.push_str(&format!("  {line}\n"));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use taskboard_core::{FixedClock, Priority, Status};
    use taskboard_store::{MemoryStore, Storage};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 9).unwrap()
    }

    fn categories(store: &MemoryStore) -> CategoryManager<&MemoryStore, FixedClock> {
        CategoryManager::new(Storage::with_clock(store, FixedClock::on(today()))).unwrap()
    }

    fn task() -> Task {
        Task::new(
            "a1b2c3d4-0000",
            "Write report",
            "default-work",
            Utc.with_ymd_and_hms(2025, 12, 1, 9, 0, 0).unwrap(),
        )
        .with_priority(Priority::High)
        .with_status(Status::InProgress)
        .with_due_date("2025-12-11")
    }

    #[test]
    fn test_tasks_table_plain() {
        let store = MemoryStore::new();
        let cats = categories(&store);
        let task = task();

        let table = format_tasks_table(&[&task], &cats, today(), DateFormat::Relative, false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].starts_with("a1b2c3"));
        assert!(lines[1].contains("High"));
        assert!(lines[1].contains("In Progress"));
        assert!(lines[1].contains("Due Dec 11, 2025"));
        assert!(lines[1].contains("Work"));
        assert!(lines[1].ends_with("Write report"));
    }

    #[test]
    fn test_tasks_table_empty() {
        let store = MemoryStore::new();
        let table = format_tasks_table(&[], &categories(&store), today(), DateFormat::Iso, false);
        assert_eq!(table, "No tasks found.\n");
    }

    #[test]
    fn test_tasks_table_unknown_category() {
        let store = MemoryStore::new();
        let mut task = task();
        task.category_id = "deleted".to_string();
        let table =
            format_tasks_table(&[&task], &categories(&store), today(), DateFormat::Iso, false);
        assert!(table.contains("Unknown C..."));
        assert!(table.contains("2025-12-11"));
    }

    #[test]
    fn test_tasks_json() {
        let store = MemoryStore::new();
        let task = task();
        let json = format_tasks_json(&[&task], 3, &categories(&store), today()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total"], 3);
        assert_eq!(value["has_more"], true);
        let first = &value["tasks"][0];
        assert_eq!(first["category_name"], "Work");
        assert_eq!(first["priority"], "high");
        assert_eq!(first["status"], "in-progress");
        assert_eq!(first["due_status"], "due-this-week");
        assert_eq!(first["due_soon"], true);
        assert!(first.get("updated_at").is_none());
    }

    #[test]
    fn test_task_details() {
        let store = MemoryStore::new();
        let task = task().with_description("Quarterly numbers\nand charts");
        let details =
            format_task_details_table(&task, &categories(&store), today(), DateFormat::Relative, false);

        assert!(details.starts_with("Task: Write report\n"));
        assert!(details.contains("Category: Work\n"));
        assert!(details.contains("Status: In Progress\n"));
        assert!(details.contains("Due: Due Dec 11, 2025 (in 2 days)\n"));
        assert!(details.contains("  and charts\n"));
        assert!(!details.contains("Updated:"));
    }

    #[test]
    fn test_task_details_no_due() {
        let store = MemoryStore::new();
        let mut task = task();
        task.due_date = None;
        let details =
            format_task_details_table(&task, &categories(&store), today(), DateFormat::Relative, false);
        assert!(details.contains("Due: No Due Date\n"));
    }
}
