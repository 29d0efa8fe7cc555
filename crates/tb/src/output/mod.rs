//! Output formatting utilities for the tb CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by entity type:
//!
//! - [`tasks`] - Task output formatting (list, show, add, edit)
//! - [`categories`] - Category output formatting
//! - [`helpers`] - Common formatting utilities (truncation, labels, due dates)

mod categories;
pub mod helpers;
mod tasks;

pub use categories::{format_categories_json, format_categories_table, format_category_json};
pub use tasks::{format_task_details_table, format_task_json, format_tasks_json, format_tasks_table};
