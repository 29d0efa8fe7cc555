//! Common helper functions for output formatting.

use chrono::{DateTime, Local, NaiveDate, Utc};
use owo_colors::OwoColorize;
use taskboard_core::dates::{days_until_due, is_due_soon, parse_due_date};
use taskboard_core::{due_date_status, DueDateStatus, Priority, Status, Task};

use crate::commands::config::DateFormat;

/// Truncates an ID to 6 characters for display.
pub fn truncate_id(id: &str) -> String {
    id.chars().take(6).collect()
}

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Pads `s` to `width` characters. Colors are applied after padding so that
/// escape codes do not throw off column alignment.
fn pad(s: &str, width: usize) -> String {
    format!("{s:<width$}")
}

/// Formats priority for display, padded to `width`.
pub fn format_priority(priority: &Priority, width: usize, use_colors: bool) -> String {
    let label = pad(priority.label(), width);
    if !use_colors {
        return label;
    }
    match priority {
        Priority::High => label.red().to_string(),
        Priority::Low => label.dimmed().to_string(),
        Priority::Medium | Priority::Unrecognized(_) => label.yellow().to_string(),
    }
}

/// Formats status for display, padded to `width`.
pub fn format_status(status: &Status, width: usize, use_colors: bool) -> String {
    let label = pad(status.label(), width);
    if !use_colors {
        return label;
    }
    match status {
        Status::Completed => label.green().to_string(),
        Status::InProgress => label.blue().to_string(),
        Status::Pending | Status::Unrecognized(_) => label,
    }
}

/// Human label for a due date.
///
/// `None` or empty gives "No Due Date"; unparseable text gives "Invalid Date".
pub fn due_label(due: Option<&str>, today: NaiveDate, format: DateFormat) -> String {
    let Some(raw) = due.filter(|d| !d.is_empty()) else {
        return "No Due Date".to_string();
    };
    let Some(date) = parse_due_date(raw) else {
        return "Invalid Date".to_string();
    };

    if format == DateFormat::Iso {
        return raw.to_string();
    }

    match due_date_status(Some(raw), today) {
        DueDateStatus::Overdue => "Overdue".to_string(),
        DueDateStatus::DueToday => "Due Today".to_string(),
        DueDateStatus::DueTomorrow => "Due Tomorrow".to_string(),
        _ => format!("Due {}", date.format("%b %-d, %Y")),
    }
}

/// Formats a task's due date for a table cell, colored by urgency.
pub fn format_due(
    task: &Task,
    today: NaiveDate,
    format: DateFormat,
    width: usize,
    use_colors: bool,
) -> String {
    let due = task.due_str();
    if due.is_none() {
        return pad("", width);
    }

    let label = pad(&due_label(due, today, format), width);
    if !use_colors {
        return label;
    }

    match due_date_status(due, today) {
        DueDateStatus::Overdue => label.red().to_string(),
        _ if is_due_soon(due, today) => label.yellow().to_string(),
        _ => label,
    }
}

/// Describes the distance to a due date, e.g. "in 3 days" or "2 days overdue".
pub fn format_days_until(due: Option<&str>, today: NaiveDate) -> Option<String> {
    let days = days_until_due(due, today)?;
    Some(match days {
        0 => "today".to_string(),
        1 => "in 1 day".to_string(),
        -1 => "1 day overdue".to_string(),
        d if d > 1 => format!("in {d} days"),
        d => format!("{} days overdue", -d),
    })
}

/// Formats a timestamp in local time.
pub fn format_datetime(datetime: &DateTime<Utc>) -> String {
    datetime
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Renders a category name, tinted with its hex color when colors are on.
pub fn format_category(name: &str, color: &str, width: usize, use_colors: bool) -> String {
    let name = pad(name, width);
    match (use_colors, parse_hex_color(color)) {
        (true, Some((r, g, b))) => name.truecolor(r, g, b).to_string(),
        _ => name,
    }
}

/// Parses `#rrggbb` or `#rgb`.
fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#').filter(|h| h.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let expand = |i: usize| channel(&hex[i..=i].repeat(2));
            Some((expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 9).unwrap()
    }

    #[test]
    fn test_truncate_id() {
        assert_eq!(truncate_id("abcdef"), "abcdef");
        assert_eq!(truncate_id("abcdefgh"), "abcdef");
        assert_eq!(truncate_id("abc"), "abc");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("this is long", 10), "this is...");
        assert_eq!(truncate_str("éééééééééééé", 5), "éé...");
    }

    #[test]
    fn test_labels_without_colors() {
        assert_eq!(format_priority(&Priority::High, 0, false), "High");
        assert_eq!(format_priority(&Priority::Low, 6, false), "Low   ");
        assert_eq!(
            format_priority(&Priority::Unrecognized("urgent".into()), 0, false),
            "Medium"
        );
        assert_eq!(format_status(&Status::InProgress, 0, false), "In Progress");
        assert_eq!(
            format_status(&Status::Unrecognized("blocked".into()), 0, false),
            "Pending"
        );
    }

    #[test]
    fn test_due_label_relative() {
        let fmt = DateFormat::Relative;
        assert_eq!(due_label(None, today(), fmt), "No Due Date");
        assert_eq!(due_label(Some(""), today(), fmt), "No Due Date");
        assert_eq!(due_label(Some("soon"), today(), fmt), "Invalid Date");
        assert_eq!(due_label(Some("2025-12-08"), today(), fmt), "Overdue");
        assert_eq!(due_label(Some("2025-12-09"), today(), fmt), "Due Today");
        assert_eq!(due_label(Some("2025-12-10"), today(), fmt), "Due Tomorrow");
        assert_eq!(
            due_label(Some("2025-12-15"), today(), fmt),
            "Due Dec 15, 2025"
        );
        assert_eq!(due_label(Some("2026-01-05"), today(), fmt), "Due Jan 5, 2026");
    }

    #[test]
    fn test_due_label_iso() {
        assert_eq!(
            due_label(Some("2025-12-08"), today(), DateFormat::Iso),
            "2025-12-08"
        );
        assert_eq!(
            due_label(Some("2025-02-30"), today(), DateFormat::Iso),
            "Invalid Date"
        );
    }

    #[test]
    fn test_format_days_until() {
        assert_eq!(format_days_until(Some("2025-12-09"), today()).as_deref(), Some("today"));
        assert_eq!(format_days_until(Some("2025-12-10"), today()).as_deref(), Some("in 1 day"));
        assert_eq!(format_days_until(Some("2025-12-12"), today()).as_deref(), Some("in 3 days"));
        assert_eq!(
            format_days_until(Some("2025-12-07"), today()).as_deref(),
            Some("2 days overdue")
        );
        assert_eq!(format_days_until(None, today()), None);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#3498db"), Some((0x34, 0x98, 0xdb)));
        assert_eq!(parse_hex_color("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("blue"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn test_format_category_plain() {
        assert_eq!(format_category("Work", "#3498db", 0, false), "Work");
        assert_eq!(format_category("Work", "nope", 6, true), "Work  ");
    }
}
