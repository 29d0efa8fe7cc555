//! Delete command implementation.
//!
//! Removes task(s) from the store after confirmation.

use serde::Serialize;
use taskboard_core::{Clock, Task};
use taskboard_store::{KeyValueStore, TaskManager};

use super::{
    confirm_operation, open_managers, BoardStorage, CommandContext, ConfirmResult, Result,
};
use crate::output::helpers::truncate_id;

/// Options for the delete command.
#[derive(Debug)]
pub struct DeleteOptions {
    /// Task IDs (full IDs or prefixes).
    pub task_ids: Vec<String>,
    /// Skip confirmation.
    pub force: bool,
}

/// Executes the delete command.
///
/// All IDs are resolved before anything is deleted, so a bad ID aborts the
/// whole operation.
///
/// # Errors
///
/// Returns an error if any task cannot be resolved or confirmation is refused.
pub fn execute(ctx: &CommandContext, opts: &DeleteOptions, storage: &BoardStorage) -> Result<()> {
    let (mut tasks, _) = open_managers(storage)?;
    let ids = resolve_ids(&tasks, &opts.task_ids)?;

    let items: Vec<String> = ids
        .iter()
        .filter_map(|id| tasks.get_task(id))
        .map(|t| format!("{} ({})", t.title, truncate_id(&t.id)))
        .collect();
    let prompt = format!("Delete {} task(s)?", items.len());

    match confirm_operation(&prompt, &items, opts.force, ctx.quiet)? {
        ConfirmResult::Confirmed => {}
        ConfirmResult::Aborted => {
            if !ctx.quiet {
                eprintln!("Aborted.");
            }
            return Ok(());
        }
    }

    let deleted = delete_tasks(&mut tasks, &ids)?;

    if ctx.json_output {
        println!("{}", format_delete_results_json(&deleted)?);
    } else if !ctx.quiet {
        for task in &deleted {
            println!("Deleted: {} ({})", task.title, truncate_id(&task.id));
        }
    }

    Ok(())
}

/// Resolves each ID or prefix to a full ID, dropping duplicates.
pub fn resolve_ids<S: KeyValueStore, C: Clock>(
    tasks: &TaskManager<S, C>,
    requested: &[String],
) -> Result<Vec<String>> {
    let mut ids: Vec<String> = Vec::with_capacity(requested.len());
    for id_or_prefix in requested {
        let id = tasks.find_task(id_or_prefix)?.id.clone();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Deletes the tasks with the given full IDs.
pub fn delete_tasks<S: KeyValueStore, C: Clock>(
    tasks: &mut TaskManager<S, C>,
    ids: &[String],
) -> Result<Vec<Task>> {
    let mut deleted = Vec::with_capacity(ids.len());
    for id in ids {
        deleted.push(tasks.delete_task(id)?);
    }
    Ok(deleted)
}

fn format_delete_results_json(deleted: &[Task]) -> Result<String> {
    #[derive(Serialize)]
    struct DeleteOutput<'a> {
        deleted: Vec<DeletedTask<'a>>,
        total_deleted: usize,
    }

    #[derive(Serialize)]
    struct DeletedTask<'a> {
        id: &'a str,
        title: &'a str,
    }

    let output = DeleteOutput {
        deleted: deleted
            .iter()
            .map(|t| DeletedTask {
                id: &t.id,
                title: &t.title,
            })
            .collect(),
        total_deleted: deleted.len(),
    };

    Ok(serde_json::to_string_pretty(&output)?)
}
