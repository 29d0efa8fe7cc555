//! Error types for storage and the managers built on it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing the key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to determine the XDG data directory.
    #[error("failed to determine data directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read store file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write store file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create data directory '{path}': {source}")]
    CreateDirError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing store refused a write.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// An import or backup document had the wrong shape.
    #[error("invalid import document: {0}")]
    InvalidImport(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors from task and category management.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("task '{0}' not found")]
    TaskNotFound(String),

    /// More than one task id starts with the given prefix.
    #[error("ambiguous task id '{prefix}': {count} tasks match this prefix")]
    AmbiguousTask { prefix: String, count: usize },

    #[error("{}", category_not_found_message(.identifier, .suggestion.as_deref()))]
    CategoryNotFound {
        identifier: String,
        suggestion: Option<String>,
    },

    #[error("category name '{0}' already exists")]
    DuplicateCategory(String),

    #[error("cannot delete category: it is being used by {count} task(s)")]
    CategoryInUse { id: String, count: usize },

    /// One or more validation rules failed.
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ManagerError {
    /// Returns the validation messages, if this is a validation error.
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            ManagerError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

fn category_not_found_message(identifier: &str, suggestion: Option<&str>) -> String {
    let base = format!("category '{identifier}' not found");
    match suggestion {
        Some(s) => format!("{base}. Did you mean '{s}'?"),
        None => base,
    }
}

/// Result type for manager operations.
pub type ManagerResult<T> = std::result::Result<T, ManagerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_not_found_with_suggestion() {
        let err = ManagerError::CategoryNotFound {
            identifier: "wrok".to_string(),
            suggestion: Some("Work".to_string()),
        };
        assert_eq!(err.to_string(), "category 'wrok' not found. Did you mean 'Work'?");
    }

    #[test]
    fn test_category_not_found_without_suggestion() {
        let err = ManagerError::CategoryNotFound {
            identifier: "garden".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "category 'garden' not found");
    }

    #[test]
    fn test_validation_joins_messages() {
        let err = ManagerError::Validation(vec![
            "Title is required and cannot be empty".to_string(),
            "Valid category is required".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Title is required and cannot be empty; Valid category is required"
        );
        assert_eq!(err.validation_errors().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_category_in_use_message() {
        let err = ManagerError::CategoryInUse {
            id: "default-work".to_string(),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "cannot delete category: it is being used by 2 task(s)"
        );
    }
}
