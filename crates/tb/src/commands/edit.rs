//! Edit command implementation.
//!
//! Updates fields of an existing task. Unset options leave fields unchanged.

use taskboard_core::{Clock, Priority, Status, Task};
use taskboard_store::{CategoryManager, KeyValueStore, TaskManager, TaskPatch};

use super::{open_managers, BoardStorage, CommandContext, CommandError, Result};
use crate::output::format_task_json;
use crate::output::helpers::truncate_id;

/// Options for the edit command.
#[derive(Debug, Default)]
pub struct EditOptions {
    /// Task ID (full ID or prefix).
    pub task_id: String,
    pub title: Option<String>,
    /// New category (name or ID).
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    /// New due date (YYYY-MM-DD).
    pub due: Option<String>,
    /// Remove the due date.
    pub no_due: bool,
    /// New description. Empty clears it.
    pub description: Option<String>,
}

/// Executes the edit command.
///
/// # Errors
///
/// Returns an error if the task is not found, nothing would change, or the
/// edited task fails validation.
pub fn execute(ctx: &CommandContext, opts: &EditOptions, storage: &BoardStorage) -> Result<()> {
    let (mut tasks, categories) = open_managers(storage)?;
    let task = edit_task(&mut tasks, &categories, opts)?;

    if ctx.json_output {
        let output = format_task_json(&task, &categories, storage.clock().today())?;
        println!("{output}");
    } else if !ctx.quiet {
        println!("Updated: {} ({})", task.title, truncate_id(&task.id));
    }

    Ok(())
}

/// Resolves the task and category, then applies the patch.
pub fn edit_task<S: KeyValueStore, C: Clock>(
    tasks: &mut TaskManager<S, C>,
    categories: &CategoryManager<S, C>,
    opts: &EditOptions,
) -> Result<Task> {
    let id = tasks.find_task(&opts.task_id)?.id.clone();
    let patch = build_patch(categories, opts)?;

    if patch.is_empty() {
        return Err(CommandError::Config(
            "nothing to change; pass at least one field to edit".to_string(),
        ));
    }

    Ok(tasks.update_task(&id, patch)?)
}

fn build_patch<S: KeyValueStore, C: Clock>(
    categories: &CategoryManager<S, C>,
    opts: &EditOptions,
) -> Result<TaskPatch> {
    let category_id = match &opts.category {
        Some(name) => Some(categories.resolve(name)?.id.clone()),
        None => None,
    };

    let due_date = if opts.no_due {
        Some(None)
    } else {
        opts.due.clone().map(Some)
    };

    Ok(TaskPatch {
        title: opts.title.clone(),
        description: opts.description.clone(),
        category_id,
        priority: opts.priority.clone(),
        status: opts.status.clone(),
        due_date,
    })
}
