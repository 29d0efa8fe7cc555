//! Add command implementation.
//!
//! Creates a new task in the local store.

use taskboard_core::{Clock, Priority, Status, Task};
use taskboard_store::{CategoryManager, KeyValueStore, ManagerError, TaskDraft, TaskManager};

use super::{open_managers, BoardStorage, CommandContext, Result};
use crate::output::format_task_json;
use crate::output::helpers::truncate_id;

/// Options for the add command.
#[derive(Debug, Default)]
pub struct AddOptions {
    /// Task title.
    pub title: String,
    /// Target category (name or ID). Defaults to the first category.
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    /// Due date (YYYY-MM-DD).
    pub due: Option<String>,
    pub description: Option<String>,
}

/// Executes the add command.
///
/// # Errors
///
/// Returns an error if the category cannot be resolved or the task is invalid.
pub fn execute(ctx: &CommandContext, opts: &AddOptions, storage: &BoardStorage) -> Result<()> {
    let (mut tasks, categories) = open_managers(storage)?;
    let task = add_task(&mut tasks, &categories, opts)?;
    tracing::debug!(id = %task.id, "task created");

    if ctx.json_output {
        let output = format_task_json(&task, &categories, storage.clock().today())?;
        println!("{output}");
    } else if !ctx.quiet {
        println!(
            "Added: {} ({}) in {}",
            task.title,
            truncate_id(&task.id),
            categories.name_for(&task.category_id)
        );
    }

    Ok(())
}

/// Builds the draft from the options and stores it.
pub fn add_task<S: KeyValueStore, C: Clock>(
    tasks: &mut TaskManager<S, C>,
    categories: &CategoryManager<S, C>,
    opts: &AddOptions,
) -> Result<Task> {
    let category_id = match &opts.category {
        Some(name) => categories.resolve(name)?.id.clone(),
        None => categories
            .categories()
            .first()
            .map(|c| c.id.clone())
            .ok_or_else(|| {
                ManagerError::Validation(vec!["Valid category is required".to_string()])
            })?,
    };

    let mut draft = TaskDraft::new(opts.title.clone(), category_id);
    if let Some(priority) = &opts.priority {
        draft = draft.with_priority(priority.clone());
    }
    if let Some(status) = &opts.status {
        draft = draft.with_status(status.clone());
    }
    if let Some(due) = &opts.due {
        draft = draft.with_due_date(due.clone());
    }
    if let Some(description) = &opts.description {
        draft = draft.with_description(description.clone());
    }

    Ok(tasks.add_task(draft)?)
}
