//! Data commands: export, import, info and clear.
//!
//! These work on the whole store rather than individual tasks.

use std::fs;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use serde_json::Value;
use taskboard_store::ImportSummary;

use super::{confirm_operation, BoardStorage, CommandContext, ConfirmResult, Result};

/// Options for the export command.
#[derive(Debug, Default)]
pub struct ExportOptions {
    /// Destination file. Stdout when unset.
    pub output: Option<PathBuf>,
    /// Wrap the export in backup metadata.
    pub backup: bool,
}

/// Options for the import command.
#[derive(Debug)]
pub struct ImportOptions {
    pub file: PathBuf,
    /// Skip confirmation.
    pub force: bool,
}

/// Writes an export (or backup) as pretty JSON.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the file cannot be written.
pub fn execute_export(
    ctx: &CommandContext,
    opts: &ExportOptions,
    storage: &BoardStorage,
) -> Result<()> {
    let json = if opts.backup {
        serde_json::to_string_pretty(&storage.create_backup()?)?
    } else {
        serde_json::to_string_pretty(&storage.export()?)?
    };

    match &opts.output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))?;
            tracing::debug!(path = %path.display(), "export written");
            if !ctx.quiet && !ctx.json_output {
                eprintln!("Exported to {}", path.display());
            }
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Replaces store contents with those of an export or backup file.
///
/// # Errors
///
/// Returns an error if the file is unreadable, is not JSON, or has the wrong
/// shape.
pub fn execute_import(
    ctx: &CommandContext,
    opts: &ImportOptions,
    storage: &BoardStorage,
) -> Result<()> {
    let content = fs::read_to_string(&opts.file)?;
    let document: Value = serde_json::from_str(&content)?;

    let prompt = format!(
        "Replace current data with the contents of {}?",
        opts.file.display()
    );
    match confirm_operation(&prompt, &[], opts.force, ctx.quiet)? {
        ConfirmResult::Confirmed => {}
        ConfirmResult::Aborted => {
            if !ctx.quiet {
                eprintln!("Aborted.");
            }
            return Ok(());
        }
    }

    let summary = storage.import_document(&document)?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !ctx.quiet {
        println!("{}", describe_import(&summary));
    }

    Ok(())
}

/// One-line summary of what an import replaced.
fn describe_import(summary: &ImportSummary) -> String {
    let mut parts = Vec::new();
    if let Some(n) = summary.tasks {
        parts.push(format!("{n} task(s)"));
    }
    if let Some(n) = summary.categories {
        parts.push(format!("{n} category(ies)"));
    }
    if summary.settings {
        parts.push("settings".to_string());
    }

    if parts.is_empty() {
        "Nothing to import.".to_string()
    } else {
        format!("Imported {}.", parts.join(", "))
    }
}

/// Shows storage usage.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn execute_info(ctx: &CommandContext, storage: &BoardStorage) -> Result<()> {
    let info = storage.storage_info()?;
    let path = storage.store().path();

    if ctx.json_output {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct InfoOutput<'a> {
            path: String,
            #[serde(flatten)]
            info: &'a taskboard_store::StorageInfo,
        }

        let output = InfoOutput {
            path: path.display().to_string(),
            info: &info,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let label = |s: &'static str| {
            if ctx.use_colors {
                s.bold().to_string()
            } else {
                s.to_string()
            }
        };
        println!("{} {}", label("Store:"), path.display());
        println!("{} {}", label("Size:"), info.size_formatted);
        println!("{} {}", label("Keys:"), info.item_count);
    }

    Ok(())
}

/// Deletes everything and re-seeds the default categories.
///
/// # Errors
///
/// Returns an error if confirmation is refused or the store cannot be written.
pub fn execute_clear(ctx: &CommandContext, force: bool, storage: &BoardStorage) -> Result<()> {
    let tasks = storage.tasks()?.len();
    let prompt = format!("Delete all data ({tasks} task(s))? This cannot be undone");

    match confirm_operation(&prompt, &[], force, ctx.quiet)? {
        ConfirmResult::Confirmed => {}
        ConfirmResult::Aborted => {
            if !ctx.quiet {
                eprintln!("Aborted.");
            }
            return Ok(());
        }
    }

    storage.clear_all()?;

    if ctx.json_output {
        println!("{}", serde_json::json!({ "cleared": true, "tasks_removed": tasks }));
    } else if !ctx.quiet {
        println!("All data cleared.");
    }

    Ok(())
}
