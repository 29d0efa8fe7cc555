//! Task input validation.
//!
//! Validation collects every failing rule instead of stopping at the first,
//! so a caller can report them all at once.

use chrono::NaiveDate;
use taskboard_core::dates::parse_due_date;

use crate::model::TaskDraft;

/// Maximum title length, in characters, after trimming.
pub const TITLE_MAX_LENGTH: usize = 100;

/// Maximum description length, in characters, after trimming.
pub const DESCRIPTION_MAX_LENGTH: usize = 500;

/// Validates a task draft, returning every error message.
///
/// An empty vector means the draft is valid.
pub fn validate_task(draft: &TaskDraft, today: NaiveDate) -> Vec<String> {
    let mut errors = Vec::new();

    let title = draft.title.trim();
    let title_len = title.chars().count();
    if title.is_empty() {
        errors.push("Title is required and cannot be empty".to_string());
    } else if title_len > TITLE_MAX_LENGTH {
        errors.push(format!(
            "Title must be {TITLE_MAX_LENGTH} characters or less (current: {title_len})"
        ));
    }

    if let Some(description) = draft.description.as_deref().map(str::trim) {
        let len = description.chars().count();
        if len > DESCRIPTION_MAX_LENGTH {
            errors.push(format!(
                "Description must be {DESCRIPTION_MAX_LENGTH} characters or less (current: {len})"
            ));
        }
    }

    if draft.category_id.trim().is_empty() {
        errors.push("Valid category is required".to_string());
    }

    if !draft.priority.is_recognized() {
        errors.push("Priority must be one of: low, medium, high".to_string());
    }

    if !draft.status.is_recognized() {
        errors.push("Status must be one of: pending, in-progress, completed".to_string());
    }

    if let Some(due) = draft.due_date.as_deref().filter(|d| !d.is_empty()) {
        errors.extend(validate_due_date(due, today));
    }

    errors
}

/// Validates a `YYYY-MM-DD` due date that must not be before `today`.
pub fn validate_due_date(due: &str, today: NaiveDate) -> Vec<String> {
    match parse_due_date(due) {
        None => vec!["Due date must be a valid date in YYYY-MM-DD format".to_string()],
        Some(date) if date < today => vec!["Due date cannot be in the past".to_string()],
        Some(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::{Priority, Status};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 9).unwrap()
    }

    fn valid() -> TaskDraft {
        TaskDraft::new("Write report", "default-work")
    }

    #[test]
    fn test_valid_draft() {
        assert!(validate_task(&valid(), today()).is_empty());
        assert!(validate_task(&valid().with_due_date("2025-12-09"), today()).is_empty());
    }

    #[test]
    fn test_title_required() {
        let draft = TaskDraft {
            title: "   ".to_string(),
            ..valid()
        };
        assert_eq!(
            validate_task(&draft, today()),
            vec!["Title is required and cannot be empty"]
        );
    }

    #[test]
    fn test_title_length_counts_trimmed_chars() {
        let draft = TaskDraft {
            title: format!("  {}  ", "é".repeat(100)),
            ..valid()
        };
        assert!(validate_task(&draft, today()).is_empty());

        let draft = TaskDraft {
            title: "a".repeat(101),
            ..valid()
        };
        assert_eq!(
            validate_task(&draft, today()),
            vec!["Title must be 100 characters or less (current: 101)"]
        );
    }

    #[test]
    fn test_description_length() {
        let draft = valid().with_description("x".repeat(501));
        assert_eq!(
            validate_task(&draft, today()),
            vec!["Description must be 500 characters or less (current: 501)"]
        );
    }

    #[test]
    fn test_unrecognized_enums_rejected() {
        let draft = valid()
            .with_priority(Priority::Unrecognized("urgent".into()))
            .with_status(Status::Unrecognized("blocked".into()));
        let errors = validate_task(&draft, today());
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("Priority must be one of"));
        assert!(errors[1].starts_with("Status must be one of"));
    }

    #[test]
    fn test_due_date_rules() {
        assert_eq!(
            validate_due_date("2025-12-08", today()),
            vec!["Due date cannot be in the past"]
        );
        assert_eq!(
            validate_due_date("2025-13-45", today()),
            vec!["Due date must be a valid date in YYYY-MM-DD format"]
        );
        assert!(validate_due_date("2026-01-01", today()).is_empty());
    }

    #[test]
    fn test_collects_all_errors() {
        let draft = TaskDraft {
            title: String::new(),
            category_id: String::new(),
            due_date: Some("yesterday".to_string()),
            ..TaskDraft::default()
        };
        assert_eq!(validate_task(&draft, today()).len(), 3);
    }
}
