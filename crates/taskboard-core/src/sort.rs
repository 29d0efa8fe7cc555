//! Task ordering.
//!
//! Every sort is stable and works on a copy of the input references.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::CoreError;
use crate::model::Task;

/// A sort field and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    CreatedDesc,
    CreatedAsc,
    DueAsc,
    DueDesc,
    PriorityDesc,
    PriorityAsc,
    StatusDesc,
    StatusAsc,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 10] = [
        SortKey::CreatedDesc,
        SortKey::CreatedAsc,
        SortKey::DueAsc,
        SortKey::DueDesc,
        SortKey::PriorityDesc,
        SortKey::PriorityAsc,
        SortKey::StatusDesc,
        SortKey::StatusAsc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::CreatedDesc => "created-desc",
            SortKey::CreatedAsc => "created-asc",
            SortKey::DueAsc => "due-asc",
            SortKey::DueDesc => "due-desc",
            SortKey::PriorityDesc => "priority-desc",
            SortKey::PriorityAsc => "priority-asc",
            SortKey::StatusDesc => "status-desc",
            SortKey::StatusAsc => "status-asc",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
        }
    }

    /// Looks up a key by its exact name.
    pub fn parse(name: &str) -> Option<SortKey> {
        SortKey::ALL.into_iter().find(|key| key.as_str() == name)
    }

    /// Compares two tasks under this key.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::CreatedDesc => b.created_at.cmp(&a.created_at),
            SortKey::CreatedAsc => a.created_at.cmp(&b.created_at),
            SortKey::DueAsc => compare_due(a, b, false),
            SortKey::DueDesc => compare_due(a, b, true),
            SortKey::PriorityDesc => b.priority.rank().cmp(&a.priority.rank()),
            SortKey::PriorityAsc => a.priority.rank().cmp(&b.priority.rank()),
            SortKey::StatusDesc => b.status.rank().cmp(&a.status.rank()),
            SortKey::StatusAsc => a.status.rank().cmp(&b.status.rank()),
            SortKey::TitleAsc => locale_compare(&a.title, &b.title),
            SortKey::TitleDesc => locale_compare(&b.title, &a.title),
        }
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::parse(s.trim()).ok_or_else(|| {
            let names: Vec<&str> = SortKey::ALL.iter().map(SortKey::as_str).collect();
            CoreError::unknown_value("sort key", s, &names)
        })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tasks without a parsable due date go last in both directions.
fn compare_due(a: &Task, b: &Task, descending: bool) -> Ordering {
    match (a.due(), b.due()) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Collation-style string order.
///
/// Letters compare first with accents and case folded away, so `"Éclair"`
/// sorts between `"apple"` and `"Zebra"`. Ties break on accents (unaccented
/// first), then on case (lowercase first): `"apple" < "Apple" < "banana"`.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowercase_decomposed(a).cmp(lowercase_decomposed(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn lowercase_decomposed(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Sorts task references by `key`. `None` keeps input order.
pub fn sort_tasks<'a, I>(tasks: I, key: Option<SortKey>) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut sorted: Vec<&'a Task> = tasks.into_iter().collect();
    if let Some(key) = key {
        sorted.sort_by(|a, b| key.compare(a, b));
    }
    sorted
}

/// Sorts by a key name. An unrecognized name keeps input order.
pub fn sort_by_name<'a, I>(tasks: I, name: &str) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let key = SortKey::parse(name);
    if key.is_none() {
        tracing::debug!(sort = name, "unknown sort key, keeping input order");
    }
    sort_tasks(tasks, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Status};
    use chrono::{TimeZone, Utc};

    fn make_task(id: &str, day: u32) -> Task {
        Task::new(
            id,
            format!("Task {id}"),
            "work",
            Utc.with_ymd_and_hms(2025, 12, day, 9, 0, 0).unwrap(),
        )
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_sort_key_names_roundtrip() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse(key.as_str()), Some(key));
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert_eq!(SortKey::default(), SortKey::CreatedDesc);
        assert!(SortKey::parse("random").is_none());
        assert!("random".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_created() {
        let tasks = vec![make_task("a", 2), make_task("b", 3), make_task("c", 1)];

        let desc = sort_tasks(&tasks, Some(SortKey::CreatedDesc));
        assert_eq!(ids(&desc), vec!["b", "a", "c"]);

        let asc = sort_tasks(&tasks, Some(SortKey::CreatedAsc));
        assert_eq!(ids(&asc), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_sort_due_no_date_last_both_directions() {
        let tasks = vec![
            make_task("none", 1),
            make_task("jan", 1).with_due_date("2025-01-01"),
            make_task("bad", 1).with_due_date("not-a-date"),
            make_task("feb", 1).with_due_date("2025-02-01"),
        ];

        let asc = sort_tasks(&tasks, Some(SortKey::DueAsc));
        assert_eq!(ids(&asc), vec!["jan", "feb", "none", "bad"]);

        let desc = sort_tasks(&tasks, Some(SortKey::DueDesc));
        assert_eq!(ids(&desc), vec!["feb", "jan", "none", "bad"]);
    }

    #[test]
    fn test_sort_priority_with_unrecognized_as_medium() {
        let tasks = vec![
            make_task("low", 1).with_priority(Priority::Low),
            make_task("odd", 1).with_priority(Priority::Unrecognized("urgent".into())),
            make_task("high", 1).with_priority(Priority::High),
            make_task("medium", 1).with_priority(Priority::Medium),
        ];

        let desc = sort_tasks(&tasks, Some(SortKey::PriorityDesc));
        assert_eq!(ids(&desc), vec!["high", "odd", "medium", "low"]);

        let asc = sort_tasks(&tasks, Some(SortKey::PriorityAsc));
        assert_eq!(ids(&asc), vec!["low", "odd", "medium", "high"]);
    }

    #[test]
    fn test_sort_status() {
        let tasks = vec![
            make_task("p", 1).with_status(Status::Pending),
            make_task("c", 1).with_status(Status::Completed),
            make_task("x", 1).with_status(Status::Unrecognized("blocked".into())),
            make_task("i", 1).with_status(Status::InProgress),
        ];

        let desc = sort_tasks(&tasks, Some(SortKey::StatusDesc));
        assert_eq!(ids(&desc), vec!["c", "i", "p", "x"]);

        let asc = sort_tasks(&tasks, Some(SortKey::StatusAsc));
        assert_eq!(ids(&asc), vec!["p", "x", "i", "c"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let tasks: Vec<Task> = (1..=5)
            .map(|i| make_task(&i.to_string(), 1).with_priority(Priority::High))
            .collect();

        let sorted = sort_tasks(&tasks, Some(SortKey::PriorityDesc));
        assert_eq!(ids(&sorted), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_sort_title_case_insensitive() {
        let mut banana = make_task("banana", 1);
        banana.title = "banana".into();
        let mut apple_upper = make_task("Apple", 1);
        apple_upper.title = "Apple".into();
        let mut apple = make_task("apple", 1);
        apple.title = "apple".into();
        let mut cherry = make_task("Cherry", 1);
        cherry.title = "Cherry".into();

        let tasks = vec![banana, apple_upper, cherry, apple];

        let asc = sort_tasks(&tasks, Some(SortKey::TitleAsc));
        assert_eq!(ids(&asc), vec!["apple", "Apple", "banana", "Cherry"]);

        let desc = sort_tasks(&tasks, Some(SortKey::TitleDesc));
        assert_eq!(ids(&desc), vec!["Cherry", "banana", "Apple", "apple"]);
    }

    #[test]
    fn test_sort_unknown_name_is_identity() {
        let tasks = vec![make_task("b", 2), make_task("a", 1), make_task("c", 3)];
        let sorted = sort_by_name(&tasks, "random-key");
        assert_eq!(ids(&sorted), vec!["b", "a", "c"]);

        let sorted = sort_tasks(&tasks, None);
        assert_eq!(ids(&sorted), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let tasks = vec![make_task("a", 1), make_task("b", 2)];
        let _ = sort_tasks(&tasks, Some(SortKey::CreatedDesc));
        assert_eq!(tasks[0].id, "a");
        assert_eq!(tasks[1].id, "b");
    }

    #[test]
    fn test_locale_compare() {
        assert_eq!(locale_compare("apple", "Apple"), Ordering::Less);
        assert_eq!(locale_compare("Apple", "banana"), Ordering::Less);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
        assert_eq!(locale_compare("Éclair", "Zebra"), Ordering::Less);
        assert_eq!(locale_compare("apple", "Éclair"), Ordering::Less);
        assert_eq!(locale_compare("eclair", "éclair"), Ordering::Less);
        assert_eq!(locale_compare("café", "cafe"), Ordering::Greater);
    }

    #[test]
    fn test_sort_title_accented() {
        let tasks: Vec<Task> = ["Zebra", "Éclair", "apple", "Ökonomie", "ocean"]
            .into_iter()
            .map(|title| {
                let mut task = make_task(title, 1);
                task.title = title.into();
                task
            })
            .collect();

        let asc = sort_tasks(&tasks, Some(SortKey::TitleAsc));
        assert_eq!(ids(&asc), vec!["apple", "Éclair", "ocean", "Ökonomie", "Zebra"]);

        let desc = sort_tasks(&tasks, Some(SortKey::TitleDesc));
        assert_eq!(ids(&desc), vec!["Zebra", "Ökonomie", "ocean", "Éclair", "apple"]);
    }
}
