//! Toggle command implementation.
//!
//! Advances each task's status: pending, in progress, completed, then back
//! to pending.

use serde::Serialize;
use taskboard_core::{Clock, Task};
use taskboard_store::{KeyValueStore, TaskManager};

use super::{open_managers, BoardStorage, CommandContext, CommandError, Result};
use crate::output::helpers::truncate_id;

/// Options for the toggle command.
#[derive(Debug)]
pub struct ToggleOptions {
    /// Task IDs (full IDs or prefixes).
    pub task_ids: Vec<String>,
}

/// Result of toggling a single task.
#[derive(Debug)]
pub struct ToggleResult {
    /// The ID as given on the command line.
    pub requested: String,
    /// The updated task, or the error message.
    pub outcome: std::result::Result<Task, String>,
}

/// Executes the toggle command.
///
/// Each ID is handled independently; one failure does not stop the rest.
///
/// # Errors
///
/// Returns an error if every task failed.
pub fn execute(ctx: &CommandContext, opts: &ToggleOptions, storage: &BoardStorage) -> Result<()> {
    let (mut tasks, _) = open_managers(storage)?;
    let results = toggle_tasks(&mut tasks, &opts.task_ids);

    if ctx.json_output {
        println!("{}", format_toggle_results_json(&results)?);
    } else {
        for result in &results {
            match &result.outcome {
                Ok(task) if !ctx.quiet => println!(
                    "{}: {} ({})",
                    task.status.label(),
                    task.title,
                    truncate_id(&task.id)
                ),
                Ok(_) => {}
                Err(err) => eprintln!("Failed to toggle {}: {}", result.requested, err),
            }
        }
    }

    let failed = results.iter().filter(|r| r.outcome.is_err()).count();
    if failed > 0 && failed == results.len() {
        return Err(CommandError::Config(format!(
            "failed to toggle {failed} task(s)"
        )));
    }

    Ok(())
}

/// Toggles each task in order.
pub fn toggle_tasks<S: KeyValueStore, C: Clock>(
    tasks: &mut TaskManager<S, C>,
    ids: &[String],
) -> Vec<ToggleResult> {
    ids.iter()
        .map(|requested| {
            let outcome = tasks
                .find_task(requested)
                .map(|t| t.id.clone())
                .and_then(|id| tasks.toggle_status(&id))
                .map_err(|e| e.to_string());
            ToggleResult {
                requested: requested.clone(),
                outcome,
            }
        })
        .collect()
}

fn format_toggle_results_json(results: &[ToggleResult]) -> Result<String> {
    #[derive(Serialize)]
    struct ToggleOutput<'a> {
        toggled: Vec<ToggledTask<'a>>,
        failed: Vec<FailedTask<'a>>,
    }

    #[derive(Serialize)]
    struct ToggledTask<'a> {
        id: &'a str,
        title: &'a str,
        status: &'a str,
    }

    #[derive(Serialize)]
    struct FailedTask<'a> {
        id: &'a str,
        error: &'a str,
    }

    let mut output = ToggleOutput {
        toggled: Vec::new(),
        failed: Vec::new(),
    };
    for result in results {
        match &result.outcome {
            Ok(task) => output.toggled.push(ToggledTask {
                id: &task.id,
                title: &task.title,
                status: task.status.as_str(),
            }),
            Err(error) => output.failed.push(FailedTask {
                id: &result.requested,
                error,
            }),
        }
    }

    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use taskboard_core::{FixedClock, Status};
    use taskboard_store::{MemoryStore, Storage, TaskDraft};

    fn manager(store: &MemoryStore) -> TaskManager<&MemoryStore, FixedClock> {
        let clock = FixedClock::at(Utc.with_ymd_and_hms(2025, 12, 9, 10, 0, 0).unwrap());
        TaskManager::new(Storage::with_clock(store, clock)).unwrap()
    }

    #[test]
    fn test_toggle_cycles_status() {
        let store = MemoryStore::new();
        let mut tasks = manager(&store);
        let id = tasks
            .add_task(TaskDraft::new("Water plants", "default-personal"))
            .unwrap()
            .id;

        let ids = vec![id.clone()];
        let expected = [Status::InProgress, Status::Completed, Status::Pending];
        for status in expected {
            let results = toggle_tasks(&mut tasks, &ids);
            let task = results[0].outcome.as_ref().unwrap();
            assert_eq!(task.status, status);
        }
    }

    #[test]
    fn test_toggle_partial_failure() {
        let store = MemoryStore::new();
        let mut tasks = manager(&store);
        let id = tasks
            .add_task(TaskDraft::new("Water plants", "default-personal"))
            .unwrap()
            .id;

        let results = toggle_tasks(&mut tasks, &["missing".to_string(), id[..6].to_string()]);
        assert!(results[0].outcome.is_err());
        assert_eq!(
            results[1].outcome.as_ref().unwrap().status,
            Status::InProgress
        );

        let json = format_toggle_results_json(&results).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["toggled"][0]["status"], "in-progress");
        assert_eq!(value["failed"][0]["id"], "missing");
    }
}
