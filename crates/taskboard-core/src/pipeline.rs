//! Filter-then-sort query over a task collection.

use serde_json::Value;
use tracing::debug;

use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};
use crate::filter::{FilterEvaluator, FilterSpec};
use crate::model::Task;
use crate::sort::{sort_tasks, SortKey};

/// Returns the visible tasks: those matching `filter`, ordered by `sort`.
///
/// The input is never mutated and the result borrows from it. A missing or
/// empty filter keeps every task; a missing sort key keeps input order.
pub fn query<'a>(
    tasks: &'a [Task],
    filter: Option<&FilterSpec>,
    sort: Option<SortKey>,
    clock: &dyn Clock,
) -> Vec<&'a Task> {
    let filtered = match filter {
        Some(spec) => FilterEvaluator::new(spec, clock).filter_tasks(tasks),
        None => tasks.iter().collect(),
    };

    debug!(
        total = tasks.len(),
        visible = filtered.len(),
        sort = sort.map(|key| key.as_str()),
        "query"
    );

    sort_tasks(filtered, sort)
}

/// Runs [`query`] over an untyped JSON array of task records.
///
/// Elements that are not well-formed tasks are dropped. Anything other than
/// an array is rejected.
pub fn query_records(
    records: &Value,
    filter: Option<&FilterSpec>,
    sort: Option<SortKey>,
    clock: &dyn Clock,
) -> CoreResult<Vec<Task>> {
    let Some(items) = records.as_array() else {
        return Err(CoreError::invalid_argument("tasks must be an array"));
    };

    let tasks: Vec<Task> = items.iter().filter_map(Task::from_record).collect();
    if tasks.len() < items.len() {
        debug!(dropped = items.len() - tasks.len(), "skipping malformed task records");
    }

    Ok(query(&tasks, filter, sort, clock)
        .into_iter()
        .cloned()
        .collect())
}
