//! Category output formatting.

use std::collections::BTreeMap;

use owo_colors::OwoColorize;
use serde::Serialize;
use taskboard_store::Category;

use super::helpers::{format_category, truncate_id};

/// JSON output structure for a category.
#[derive(Serialize)]
pub struct CategoryOutput<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub color: &'a str,
    pub task_count: usize,
}

/// Formats categories as JSON.
pub fn format_categories_json(
    categories: &[Category],
    counts: &BTreeMap<String, usize>,
) -> Result<String, serde_json::Error> {
    let output: Vec<CategoryOutput> = categories
        .iter()
        .map(|c| CategoryOutput {
            id: &c.id,
            name: &c.name,
            color: &c.color,
            task_count: counts.get(&c.id).copied().unwrap_or(0),
        })
        .collect();

    serde_json::to_string_pretty(&output)
}

/// Formats a single category as JSON.
pub fn format_category_json(category: &Category) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(category)
}

/// Formats categories as a table.
pub fn format_categories_table(
    categories: &[Category],
    counts: &BTreeMap<String, usize>,
    use_colors: bool,
) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!("{:<8} {:<20} {:<9} {}", "ID", "Name", "Color", "Tasks");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for category in categories {
        let count = counts.get(&category.id).copied().unwrap_or(0);
        output.push_str(&format!(
            "{:<8} {} {:<9} {}\n",
            truncate_id(&category.id),
            format_category(&category.name, &category.color, 20, use_colors),
            category.color,
            count
        ));
    }

    output
}
