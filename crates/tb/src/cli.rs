//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the tb CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use taskboard_core::{CoreError, Priority, SortKey, Status};

// Priority and Status also convert from any String, so clap must be pointed
// at the strict parsers.
fn parse_priority(s: &str) -> Result<Priority, CoreError> {
    s.parse()
}

fn parse_status(s: &str) -> Result<Status, CoreError> {
    s.parse()
}

fn parse_sort_key(s: &str) -> Result<SortKey, CoreError> {
    s.parse()
}

/// tb - a local task board with filtering and sorting
#[derive(Parser, Debug)]
#[command(name = "tb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Directory holding the task store (default: XDG data dir)
    #[arg(long, global = true, env = "TASKBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tasks
    #[command(alias = "l")]
    List {
        /// Match title or description (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by category name or ID (repeatable)
        #[arg(short, long, action = clap::ArgAction::Append)]
        category: Vec<String>,

        /// Filter by priority: low, medium, high (repeatable)
        #[arg(short, long, action = clap::ArgAction::Append, value_parser = parse_priority)]
        priority: Vec<Priority>,

        /// Filter by status: pending, in-progress, completed (repeatable)
        #[arg(long, action = clap::ArgAction::Append, value_parser = parse_status)]
        status: Vec<Status>,

        /// Show overdue tasks
        #[arg(long)]
        overdue: bool,

        /// Show tasks due today
        #[arg(long)]
        today: bool,

        /// Show tasks due between today and Saturday
        #[arg(long)]
        week: bool,

        /// Match any criterion instead of all
        #[arg(long)]
        any: bool,

        /// Sort order (e.g. due-asc, priority-desc)
        #[arg(long, value_parser = parse_sort_key)]
        sort: Option<SortKey>,

        /// Store --sort as the default order for later listings
        #[arg(long, requires = "sort")]
        save_sort: bool,

        /// Limit results (default: from config, else 50)
        #[arg(long)]
        limit: Option<usize>,

        /// Show all tasks (no limit)
        #[arg(long)]
        all: bool,
    },

    /// Add a new task
    #[command(alias = "a")]
    Add {
        /// Task title
        title: String,

        /// Category name or ID (default: first category)
        #[arg(short, long)]
        category: Option<String>,

        /// Priority: low, medium, high
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<Priority>,

        /// Initial status
        #[arg(long, value_parser = parse_status)]
        status: Option<Status>,

        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,

        /// Task description
        #[arg(long)]
        description: Option<String>,
    },

    /// Show task details
    #[command(alias = "s")]
    Show {
        /// Task ID or unique prefix
        task_id: String,
    },

    /// Edit a task
    #[command(alias = "e")]
    Edit {
        /// Task ID or unique prefix
        task_id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// Move to category (name or ID)
        #[arg(short, long)]
        category: Option<String>,

        /// Change priority
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<Priority>,

        /// Change status
        #[arg(long, value_parser = parse_status)]
        status: Option<Status>,

        /// Change due date (YYYY-MM-DD)
        #[arg(short, long, conflicts_with = "no_due")]
        due: Option<String>,

        /// Remove due date
        #[arg(long)]
        no_due: bool,

        /// New description (empty string clears it)
        #[arg(long)]
        description: Option<String>,
    },

    /// Advance task status (pending, in progress, completed)
    #[command(alias = "t")]
    Toggle {
        /// Task ID(s) or unique prefixes
        #[arg(required = true)]
        task_ids: Vec<String>,
    },

    /// Delete task(s)
    #[command(alias = "rm")]
    Delete {
        /// Task ID(s) or unique prefixes
        #[arg(required = true)]
        task_ids: Vec<String>,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// List and manage categories
    #[command(alias = "c")]
    Categories {
        #[command(subcommand)]
        command: Option<CategoriesCommands>,
    },

    /// Export all data as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Wrap the export as a versioned backup
        #[arg(long)]
        backup: bool,
    },

    /// Import an export or backup file, replacing current data
    Import {
        /// File to import
        file: PathBuf,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show storage usage
    Info,

    /// Delete all data and restore defaults
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// View and edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoriesCommands {
    /// List categories with task counts
    List,

    /// Create a category
    Add {
        /// Category name
        name: String,

        /// Hex color (e.g. #3498db)
        #[arg(long)]
        color: Option<String>,
    },

    /// Rename or recolor a category
    Edit {
        /// Category name or ID
        category: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New hex color
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete an unused category
    Delete {
        /// Category name or ID
        category: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. output.color, list.sort)
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}
