//! Filter evaluation against tasks.
//!
//! The evaluator resolves "today" once, when it is built, so every task in a
//! query is judged against the same day.

use chrono::NaiveDate;
use serde_json::Value;

use super::spec::{FilterSpec, Operator};
use crate::clock::Clock;
use crate::dates;
use crate::model::{Priority, Status, Task};

/// One participating criterion.
#[derive(Debug)]
enum Criterion<'a> {
    Category(&'a [String]),
    Priority(&'a [Priority]),
    Status(&'a [Status]),
    /// Lowercased, trimmed search term.
    Search(String),
    DateGroup {
        overdue: bool,
        due_today: bool,
        due_this_week: bool,
    },
}

/// Evaluates a [`FilterSpec`] against tasks.
#[derive(Debug)]
pub struct FilterEvaluator<'a> {
    operator: Operator,
    criteria: Vec<Criterion<'a>>,
    today: NaiveDate,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates an evaluator, reading "today" from `clock`.
    pub fn new(spec: &'a FilterSpec, clock: &dyn Clock) -> Self {
        Self::on(spec, clock.today())
    }

    /// Creates an evaluator anchored to an explicit day.
    pub fn on(spec: &'a FilterSpec, today: NaiveDate) -> Self {
        Self {
            operator: spec.operator(),
            criteria: collect_criteria(spec),
            today,
        }
    }

    /// Returns true if no criterion participates.
    pub fn is_identity(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Returns true if the task matches the filter.
    pub fn matches(&self, task: &Task) -> bool {
        if self.criteria.is_empty() {
            return true;
        }

        let mut results = self.criteria.iter().map(|c| self.evaluate(c, task));
        match self.operator {
            Operator::And => results.all(|hit| hit),
            Operator::Or => results.any(|hit| hit),
        }
    }

    /// Returns true if `record` is a well-formed task that matches the filter.
    ///
    /// Anything that does not deserialize into a [`Task`] never matches.
    pub fn matches_record(&self, record: &Value) -> bool {
        Task::from_record(record).is_some_and(|task| self.matches(&task))
    }

    /// Filters a slice of tasks, keeping input order.
    pub fn filter_tasks<'b>(&self, tasks: &'b [Task]) -> Vec<&'b Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }

    fn evaluate(&self, criterion: &Criterion<'_>, task: &Task) -> bool {
        match criterion {
            Criterion::Category(ids) => ids.iter().any(|id| *id == task.category_id),
            Criterion::Priority(wanted) => {
                task.priority.is_recognized() && wanted.contains(&task.priority)
            }
            Criterion::Status(wanted) => task.status.is_recognized() && wanted.contains(&task.status),
            Criterion::Search(term) => matches_search(task, term),
            Criterion::DateGroup {
                overdue,
                due_today,
                due_this_week,
            } => {
                let due = task.due_str();
                (*overdue && dates::is_overdue(due, self.today))
                    || (*due_today && dates::is_due_today(due, self.today))
                    || (*due_this_week && dates::is_due_this_week(due, self.today))
            }
        }
    }
}

fn collect_criteria(spec: &FilterSpec) -> Vec<Criterion<'_>> {
    let mut criteria = Vec::new();

    if let Some(ids) = spec.categories.as_deref().filter(|l| !l.is_empty()) {
        criteria.push(Criterion::Category(ids));
    }
    if let Some(wanted) = spec.priorities.as_deref().filter(|l| !l.is_empty()) {
        criteria.push(Criterion::Priority(wanted));
    }
    if let Some(wanted) = spec.statuses.as_deref().filter(|l| !l.is_empty()) {
        criteria.push(Criterion::Status(wanted));
    }
    if let Some(term) = spec.search() {
        criteria.push(Criterion::Search(term.to_lowercase()));
    }
    if spec.has_date_group() {
        criteria.push(Criterion::DateGroup {
            overdue: spec.overdue == Some(true),
            due_today: spec.due_today == Some(true),
            due_this_week: spec.due_this_week == Some(true),
        });
    }

    criteria
}

fn matches_search(task: &Task, term: &str) -> bool {
    task.title.to_lowercase().contains(term)
        || task
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(term))
}

/// Returns true if `task` matches `spec`, using `clock` for "today".
pub fn matches(task: &Task, spec: &FilterSpec, clock: &dyn Clock) -> bool {
    FilterEvaluator::new(spec, clock).matches(task)
}
