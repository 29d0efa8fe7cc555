use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::load_config;
use commands::{CommandContext, CommandError};
use dispatch::{NoStoreCommand, NoStoreDispatch, StoreCommand, StoreDispatch};
use taskboard_store::{ManagerError, StoreError};

/// Environment variable holding a tracing filter, e.g. `taskboard_store=debug`.
const LOG_ENV: &str = "TASKBOARD_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                let rendered = serde_json::to_string_pretty(&error_json)
                    .unwrap_or_else(|_| error_json.to_string());
                eprintln!("{rendered}");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(error_exit_code(&e))
        }
    }
}

/// Logs go to stderr so JSON output on stdout stays clean.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose)
        .without_time()
        .try_init();
}

fn run(cli: &Cli) -> commands::Result<()> {
    let config = load_config()?;
    let ctx = CommandContext::new(cli, config);

    if let Some(dispatch) = NoStoreDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    let Some(dispatch) = StoreDispatch::from_cli(cli) else {
        return Err(CommandError::Config(format!(
            "unhandled command: {:?}",
            cli.command
        )));
    };

    let storage = ctx.open_storage()?;
    dispatch.execute(&ctx, &storage)
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Manager(err) => manager_error_code(err),
        CommandError::Store(_) => "STORE_ERROR",
        CommandError::Core(_) => "INVALID_ARGUMENT",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

fn manager_error_code(e: &ManagerError) -> &'static str {
    match e {
        ManagerError::TaskNotFound(_) | ManagerError::CategoryNotFound { .. } => "NOT_FOUND",
        ManagerError::AmbiguousTask { .. } => "AMBIGUOUS_ID",
        ManagerError::Validation(_) => "VALIDATION_ERROR",
        ManagerError::DuplicateCategory(_) | ManagerError::CategoryInUse { .. } => "CONFLICT",
        ManagerError::Store(_) => "STORE_ERROR",
    }
}

/// Returns the process exit status for an error.
fn error_exit_code(e: &CommandError) -> u8 {
    match e {
        CommandError::Manager(ManagerError::TaskNotFound(_))
        | CommandError::Manager(ManagerError::CategoryNotFound { .. }) => 5,
        CommandError::Manager(ManagerError::Store(err)) | CommandError::Store(err) => {
            store_exit_code(err)
        }
        CommandError::Manager(_) => 1,
        CommandError::Core(_) => 1,
        CommandError::Config(_) => 5,
        CommandError::Io(_) => 3,
        CommandError::Json(_) => 1,
    }
}

fn store_exit_code(e: &StoreError) -> u8 {
    match e {
        StoreError::InvalidImport(_) | StoreError::Json(_) => 1,
        _ => 5,
    }
}
