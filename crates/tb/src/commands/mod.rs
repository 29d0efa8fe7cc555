//! Command implementations for the tb CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod add;
pub mod categories;
pub mod completions;
pub mod config;
pub mod data;
pub mod delete;
pub mod edit;
pub mod list;
pub mod show;
pub mod toggle;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use dialoguer::Confirm;
use taskboard_store::{
    CategoryManager, FileStore, ManagerError, Storage, StoreError, TaskManager,
};

use crate::cli::Cli;
use config::{Config, DateFormat};

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Task or category operation failed.
    #[error(transparent)]
    Manager(#[from] ManagerError),

    /// Store read/write error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// A value could not be parsed.
    #[error(transparent)]
    Core(#[from] taskboard_core::CoreError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// The storage type every command works against.
pub type BoardStorage = Storage<FileStore>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Store directory override.
    pub data_dir: Option<PathBuf>,
    /// How due dates are rendered.
    pub date_format: DateFormat,
    /// Loaded configuration file.
    pub config: Config,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and the config file.
    ///
    /// Flags win over config; `NO_COLOR` disables colors regardless.
    pub fn new(cli: &Cli, config: Config) -> Self {
        let color_enabled = config.output.color.unwrap_or(true);
        let no_color_env = std::env::var_os("NO_COLOR").is_some();

        Self {
            json_output: cli.json,
            use_colors: color_enabled && !cli.no_color && !no_color_env,
            quiet: cli.quiet,
            verbose: cli.verbose,
            data_dir: cli.data_dir.clone().or_else(|| config.data_dir.clone()),
            date_format: config.output.date_format.unwrap_or_default(),
            config,
        }
    }

    /// Opens the file store in the configured or default data directory.
    pub fn open_storage(&self) -> Result<BoardStorage> {
        let store = match &self.data_dir {
            Some(dir) => FileStore::in_dir(dir),
            None => FileStore::new()?,
        };
        tracing::debug!(path = %store.path().display(), "opening store");

        let storage = Storage::new(store);
        storage.initialize()?;
        Ok(storage)
    }
}

/// Loads both managers over the same storage.
pub fn open_managers(
    storage: &BoardStorage,
) -> Result<(TaskManager<FileStore>, CategoryManager<FileStore>)> {
    Ok((
        TaskManager::new(storage.clone())?,
        CategoryManager::new(storage.clone())?,
    ))
}

/// Outcome of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    Confirmed,
    Aborted,
}

/// Asks the user to confirm a destructive operation.
///
/// `force` skips the prompt. Without a terminal the operation is refused
/// rather than silently confirmed.
pub fn confirm_operation(prompt: &str, items: &[String], force: bool, quiet: bool) -> Result<ConfirmResult> {
    if force {
        return Ok(ConfirmResult::Confirmed);
    }

    if !io::stdin().is_terminal() {
        return Err(CommandError::Config(
            "refusing to proceed without confirmation; pass --force".to_string(),
        ));
    }

    if !quiet {
        for item in items {
            eprintln!("  {item}");
        }
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CommandError::Io(io::Error::other(e.to_string())))?;

    Ok(if confirmed {
        ConfirmResult::Confirmed
    } else {
        ConfirmResult::Aborted
    })
}
