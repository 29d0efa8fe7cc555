//! Show command implementation.
//!
//! Displays detailed information about a single task.

use taskboard_core::Clock;

use super::{open_managers, BoardStorage, CommandContext, Result};
use crate::output::{format_task_details_table, format_task_json};

/// Options for the show command.
#[derive(Debug)]
pub struct ShowOptions {
    /// Task ID (full ID or prefix).
    pub task_id: String,
}

/// Executes the show command.
///
/// # Errors
///
/// Returns an error if the task is not found or the prefix is ambiguous.
pub fn execute(ctx: &CommandContext, opts: &ShowOptions, storage: &BoardStorage) -> Result<()> {
    let (tasks, categories) = open_managers(storage)?;
    let task = tasks.find_task(&opts.task_id)?;
    let today = storage.clock().today();

    if ctx.json_output {
        let output = format_task_json(task, &categories, today)?;
        println!("{output}");
    } else {
        let output =
            format_task_details_table(task, &categories, today, ctx.date_format, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}
