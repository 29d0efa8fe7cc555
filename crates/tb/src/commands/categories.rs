//! Categories command implementation.
//!
//! Lists, creates, edits and deletes categories.

use super::{
    confirm_operation, open_managers, BoardStorage, CommandContext, CommandError, ConfirmResult,
    Result,
};
use crate::output::helpers::truncate_id;
use crate::output::{format_categories_json, format_categories_table, format_category_json};

/// Options for `categories add`.
#[derive(Debug)]
pub struct CategoryAddOptions {
    pub name: String,
    /// Hex color; the default is used when unset.
    pub color: Option<String>,
}

/// Options for `categories edit`.
#[derive(Debug)]
pub struct CategoryEditOptions {
    /// Category name or ID.
    pub category: String,
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Options for `categories delete`.
#[derive(Debug)]
pub struct CategoryDeleteOptions {
    /// Category name or ID.
    pub category: String,
    /// Skip confirmation.
    pub force: bool,
}

/// Lists categories with task counts.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn execute_list(ctx: &CommandContext, storage: &BoardStorage) -> Result<()> {
    let (tasks, categories) = open_managers(storage)?;
    let counts = tasks.filter_counts().categories;

    if ctx.json_output {
        let output = format_categories_json(categories.categories(), &counts)?;
        println!("{output}");
    } else {
        let output = format_categories_table(categories.categories(), &counts, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

/// Creates a category.
///
/// # Errors
///
/// Returns an error if the name is taken or the color is invalid.
pub fn execute_add(
    ctx: &CommandContext,
    opts: &CategoryAddOptions,
    storage: &BoardStorage,
) -> Result<()> {
    let (_, mut categories) = open_managers(storage)?;
    let category = categories.add(&opts.name, opts.color.as_deref())?;

    if ctx.json_output {
        println!("{}", format_category_json(&category)?);
    } else if !ctx.quiet {
        println!(
            "Created category: {} ({})",
            category.name,
            truncate_id(&category.id)
        );
    }

    Ok(())
}

/// Renames or recolors a category.
///
/// # Errors
///
/// Returns an error if the category is not found, nothing would change, or
/// the new values are invalid.
pub fn execute_edit(
    ctx: &CommandContext,
    opts: &CategoryEditOptions,
    storage: &BoardStorage,
) -> Result<()> {
    if opts.name.is_none() && opts.color.is_none() {
        return Err(CommandError::Config(
            "nothing to change; pass --name or --color".to_string(),
        ));
    }

    let (_, mut categories) = open_managers(storage)?;
    let id = categories.resolve(&opts.category)?.id.clone();
    let category = categories.update(&id, opts.name.as_deref(), opts.color.as_deref())?;

    if ctx.json_output {
        println!("{}", format_category_json(&category)?);
    } else if !ctx.quiet {
        println!("Updated category: {}", category.name);
    }

    Ok(())
}

/// Deletes a category that no task uses.
///
/// # Errors
///
/// Returns an error if the category is not found or still has tasks.
pub fn execute_delete(
    ctx: &CommandContext,
    opts: &CategoryDeleteOptions,
    storage: &BoardStorage,
) -> Result<()> {
    let (_, mut categories) = open_managers(storage)?;
    let category = categories.resolve(&opts.category)?.clone();

    let prompt = format!("Delete category '{}'?", category.name);
    match confirm_operation(&prompt, &[], opts.force, ctx.quiet)? {
        ConfirmResult::Confirmed => {}
        ConfirmResult::Aborted => {
            if !ctx.quiet {
                eprintln!("Aborted.");
            }
            return Ok(());
        }
    }

    let removed = categories.delete(&category.id)?;

    if ctx.json_output {
        println!("{}", format_category_json(&removed)?);
    } else if !ctx.quiet {
        println!("Deleted category: {}", removed.name);
    }

    Ok(())
}
