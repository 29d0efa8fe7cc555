//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands split into those that need the task store and those that
//! don't, so `config` and `completions` work even when the store is broken.

use crate::cli::{CategoriesCommands, Cli, Commands, ConfigCommands, Shell};
use crate::commands::add::AddOptions;
use crate::commands::categories::{
    CategoryAddOptions, CategoryDeleteOptions, CategoryEditOptions,
};
use crate::commands::data::{ExportOptions, ImportOptions};
use crate::commands::delete::DeleteOptions;
use crate::commands::edit::EditOptions;
use crate::commands::list::ListOptions;
use crate::commands::show::ShowOptions;
use crate::commands::toggle::ToggleOptions;
use crate::commands::{self, BoardStorage, CommandContext, CommandError, Result};

/// Trait for commands that run without opening the store.
pub trait NoStoreCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that read or write the store.
pub trait StoreCommand {
    fn execute(&self, ctx: &CommandContext, storage: &BoardStorage) -> Result<()>;
}

/// Commands that don't touch the store.
pub enum NoStoreDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> NoStoreDispatch<'a> {
    /// Returns `None` if the command needs the store.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl NoStoreCommand for NoStoreDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("tb - local task board");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that work against the store, with their options resolved.
#[derive(Debug)]
pub enum StoreDispatch {
    List(ListOptions),
    Add(AddOptions),
    Show(ShowOptions),
    Edit(EditOptions),
    Toggle(ToggleOptions),
    Delete(DeleteOptions),
    CategoriesList,
    CategoriesAdd(CategoryAddOptions),
    CategoriesEdit(CategoryEditOptions),
    CategoriesDelete(CategoryDeleteOptions),
    Export(ExportOptions),
    Import(ImportOptions),
    Info,
    Clear { force: bool },
}

impl StoreDispatch {
    /// Builds the dispatch for a store command.
    ///
    /// Returns `None` for commands handled by [`NoStoreDispatch`].
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        let dispatch = match cli.command.as_ref()? {
            Commands::List {
                search,
                category,
                priority,
                status,
                overdue,
                today,
                week,
                any,
                sort,
                save_sort,
                limit,
                all,
            } => Self::List(ListOptions {
                search: search.clone(),
                categories: category.clone(),
                priorities: priority.clone(),
                statuses: status.clone(),
                overdue: *overdue,
                today: *today,
                week: *week,
                any: *any,
                sort: *sort,
                save_sort: *save_sort,
                limit: *limit,
                all: *all,
            }),
            Commands::Add {
                title,
                category,
                priority,
                status,
                due,
                description,
            } => Self::Add(AddOptions {
                title: title.clone(),
                category: category.clone(),
                priority: priority.clone(),
                status: status.clone(),
                due: due.clone(),
                description: description.clone(),
            }),
            Commands::Show { task_id } => Self::Show(ShowOptions {
                task_id: task_id.clone(),
            }),
            Commands::Edit {
                task_id,
                title,
                category,
                priority,
                status,
                due,
                no_due,
                description,
            } => Self::Edit(EditOptions {
                task_id: task_id.clone(),
                title: title.clone(),
                category: category.clone(),
                priority: priority.clone(),
                status: status.clone(),
                due: due.clone(),
                no_due: *no_due,
                description: description.clone(),
            }),
            Commands::Toggle { task_ids } => Self::Toggle(ToggleOptions {
                task_ids: task_ids.clone(),
            }),
            Commands::Delete { task_ids, force } => Self::Delete(DeleteOptions {
                task_ids: task_ids.clone(),
                force: *force,
            }),
            Commands::Categories { command } => match command {
                Some(CategoriesCommands::List) | None => Self::CategoriesList,
                Some(CategoriesCommands::Add { name, color }) => {
                    Self::CategoriesAdd(CategoryAddOptions {
                        name: name.clone(),
                        color: color.clone(),
                    })
                }
                Some(CategoriesCommands::Edit {
                    category,
                    name,
                    color,
                }) => Self::CategoriesEdit(CategoryEditOptions {
                    category: category.clone(),
                    name: name.clone(),
                    color: color.clone(),
                }),
                Some(CategoriesCommands::Delete { category, force }) => {
                    Self::CategoriesDelete(CategoryDeleteOptions {
                        category: category.clone(),
                        force: *force,
                    })
                }
            },
            Commands::Export { output, backup } => Self::Export(ExportOptions {
                output: output.clone(),
                backup: *backup,
            }),
            Commands::Import { file, force } => Self::Import(ImportOptions {
                file: file.clone(),
                force: *force,
            }),
            Commands::Info => Self::Info,
            Commands::Clear { force } => Self::Clear { force: *force },
            // Handled by NoStoreDispatch
            Commands::Config { .. } | Commands::Completions { .. } => return None,
        };
        Some(dispatch)
    }
}

impl StoreCommand for StoreDispatch {
    fn execute(&self, ctx: &CommandContext, storage: &BoardStorage) -> Result<()> {
        match self {
            Self::List(opts) => commands::list::execute(ctx, opts, storage),
            Self::Add(opts) => commands::add::execute(ctx, opts, storage),
            Self::Show(opts) => commands::show::execute(ctx, opts, storage),
            Self::Edit(opts) => commands::edit::execute(ctx, opts, storage),
            Self::Toggle(opts) => commands::toggle::execute(ctx, opts, storage),
            Self::Delete(opts) => commands::delete::execute(ctx, opts, storage),
            Self::CategoriesList => commands::categories::execute_list(ctx, storage),
            Self::CategoriesAdd(opts) => commands::categories::execute_add(ctx, opts, storage),
            Self::CategoriesEdit(opts) => commands::categories::execute_edit(ctx, opts, storage),
            Self::CategoriesDelete(opts) => {
                commands::categories::execute_delete(ctx, opts, storage)
            }
            Self::Export(opts) => commands::data::execute_export(ctx, opts, storage),
            Self::Import(opts) => commands::data::execute_import(ctx, opts, storage),
            Self::Info => commands::data::execute_info(ctx, storage),
            Self::Clear { force } => commands::data::execute_clear(ctx, *force, storage),
        }
    }
}
