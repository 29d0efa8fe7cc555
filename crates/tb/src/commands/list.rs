//! List command implementation.
//!
//! Lists tasks from the local store, filtered and sorted.

use taskboard_core::{Clock, Operator, Priority, SortKey, Status, Task};
use taskboard_store::{CategoryManager, KeyValueStore};

use super::{open_managers, BoardStorage, CommandContext, Result};
use crate::output::{format_tasks_json, format_tasks_table};

/// Row limit when neither the flag nor the config sets one.
pub const DEFAULT_LIMIT: usize = 50;

/// Options for the list command.
#[derive(Debug, Default)]
pub struct ListOptions {
    /// Search term for title and description.
    pub search: Option<String>,
    /// Category names or IDs.
    pub categories: Vec<String>,
    pub priorities: Vec<Priority>,
    pub statuses: Vec<Status>,
    pub overdue: bool,
    pub today: bool,
    pub week: bool,
    /// Combine criteria with OR instead of AND.
    pub any: bool,
    /// Sort key override.
    pub sort: Option<SortKey>,
    /// Persist `sort` in the store's settings.
    pub save_sort: bool,
    /// Limit results.
    pub limit: Option<usize>,
    /// Show all tasks (no limit).
    pub all: bool,
}

/// Executes the list command.
///
/// # Errors
///
/// Returns an error if the store cannot be read or a category cannot be resolved.
pub fn execute(ctx: &CommandContext, opts: &ListOptions, storage: &BoardStorage) -> Result<()> {
    let (mut tasks, categories) = open_managers(storage)?;

    let category_ids = resolve_category_ids(&categories, &opts.categories)?;
    tasks.set_search_filter(opts.search.clone().unwrap_or_default());
    tasks.set_category_filters(category_ids);
    tasks.set_priority_filters(opts.priorities.clone());
    tasks.set_status_filters(opts.statuses.clone());
    tasks.set_date_filters(opts.overdue, opts.today, opts.week);
    tasks.set_operator(if opts.any { Operator::Or } else { Operator::And });

    if let (true, Some(key)) = (opts.save_sort, opts.sort) {
        tasks.set_sorting(key)?;
    }

    // Flag, then config, then the sort saved in the store
    let sort = opts.sort.or(ctx.config.list.sort).or(tasks.sort_key());
    tasks.set_sort_override(sort);

    let show_completed = storage.settings()?.map_or(true, |s| s.show_completed);
    let mut visible = tasks.visible_tasks();
    if !show_completed && opts.statuses.is_empty() {
        visible.retain(|t| t.status != Status::Completed);
    }

    let total = visible.len();
    let limit = effective_limit(ctx, opts);
    let shown = apply_limit(visible, limit);
    tracing::debug!(total, shown = shown.len(), ?sort, "listing tasks");

    let today = storage.clock().today();
    if ctx.json_output {
        let output = format_tasks_json(&shown, total, &categories, today)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output =
            format_tasks_table(&shown, &categories, today, ctx.date_format, ctx.use_colors);
        print!("{output}");
        if total > shown.len() {
            println!("({} more; use --all to show everything)", total - shown.len());
        }
    }

    Ok(())
}

/// Resolves category names or IDs to IDs.
pub fn resolve_category_ids<S: KeyValueStore, C: Clock>(
    categories: &CategoryManager<S, C>,
    names_or_ids: &[String],
) -> Result<Vec<String>> {
    names_or_ids
        .iter()
        .map(|name| Ok(categories.resolve(name)?.id.clone()))
        .collect()
}

fn effective_limit(ctx: &CommandContext, opts: &ListOptions) -> Option<usize> {
    if opts.all {
        None
    } else {
        Some(opts.limit.or(ctx.config.list.limit).unwrap_or(DEFAULT_LIMIT))
    }
}

/// Applies the limit to the tasks.
fn apply_limit(tasks: Vec<&Task>, limit: Option<usize>) -> Vec<&Task> {
    match limit {
        Some(n) => tasks.into_iter().take(n).collect(),
        None => tasks,
    }
}
