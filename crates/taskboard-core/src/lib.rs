//! Filtering and sorting engine for taskboard.
//!
//! This crate takes a flat collection of [`Task`]s together with a
//! declarative [`FilterSpec`] and [`SortKey`] and produces the visible,
//! ordered subset. It performs no I/O: the only ambient input, the current
//! day, comes from an injected [`Clock`].
//!
//! # Example
//!
//! ```
//! use taskboard_core::{query, FilterSpec, FixedClock, Priority, SortKey, Task};
//! use chrono::Utc;
//!
//! let clock = FixedClock::from_ymd("2025-12-09").unwrap();
//! let tasks = vec![
//!     Task::new("1", "Write report", "default-work", Utc::now()).with_priority(Priority::High),
//!     Task::new("2", "Buy milk", "default-shopping", Utc::now()).with_priority(Priority::Low),
//! ];
//!
//! let spec = FilterSpec::default().with_search("report");
//! let visible = query(&tasks, Some(&spec), Some(SortKey::PriorityDesc), &clock);
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].id, "1");
//! ```

pub mod clock;
pub mod dates;
pub mod error;
pub mod filter;
pub mod model;
pub mod pipeline;
pub mod sort;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dates::{due_date_status, DueDateStatus};
pub use error::{CoreError, CoreResult};
pub use filter::{FilterEvaluator, FilterSpec, Operator};
pub use model::{Priority, Status, Task};
pub use pipeline::{query, query_records};
pub use sort::{sort_by_name, sort_tasks, SortKey};
