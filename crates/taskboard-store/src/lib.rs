//! Persistence and management for taskboard.
//!
//! [`Storage`] gives typed access to tasks, categories and settings kept in a
//! [`KeyValueStore`]. [`TaskManager`] and [`CategoryManager`] sit on top of it,
//! validating input and writing every change through.
//!
//! # Example
//!
//! ```
//! use taskboard_store::{MemoryStore, Storage, TaskDraft, TaskManager};
//!
//! let store = MemoryStore::new();
//! let mut tasks = TaskManager::new(Storage::new(&store))?;
//! let task = tasks.add_task(TaskDraft::new("Write report", "default-work"))?;
//! assert_eq!(tasks.visible_tasks()[0].id, task.id);
//! # Ok::<(), taskboard_store::ManagerError>(())
//! ```

pub mod categories;
pub mod error;
pub mod kv;
pub mod model;
pub mod storage;
pub mod tasks;
pub mod validate;

pub use categories::{CategoryManager, UNKNOWN_CATEGORY_COLOR, UNKNOWN_CATEGORY_NAME};
pub use error::{ManagerError, ManagerResult, Result, StoreError};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use model::{
    Backup, Category, ExportData, ImportSummary, Settings, StorageInfo, TaskDraft, TaskPatch,
    DEFAULT_CATEGORY_COLOR,
};
pub use storage::{format_bytes, Storage};
pub use tasks::{FilterCounts, TaskFilters, TaskManager};
pub use validate::{validate_due_date, validate_task};
