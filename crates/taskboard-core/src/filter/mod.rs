//! Declarative task filtering.
//!
//! A [`FilterSpec`] is a record of optional criteria. Each criterion that is
//! present and non-empty *participates*; the participating results are then
//! combined by the top-level [`Operator`].
//!
//! # Criteria
//!
//! Evaluated in this order:
//!
//! - `categories` - task category id is one of the listed ids
//! - `priorities` - task priority is one of the listed priorities
//! - `statuses` - task status is one of the listed statuses
//! - `searchTerm` - case-insensitive substring of title or description
//! - date group - any requested of `overdue`, `dueToday`, `dueThisWeek`
//!
//! The three date flags form a single criterion: their results are OR-ed
//! together before the operator is applied.
//!
//! # Example
//!
//! ```
//! use taskboard_core::filter::{FilterEvaluator, FilterSpec, Operator};
//! use taskboard_core::{FixedClock, Priority, Task};
//!
//! let clock = FixedClock::from_ymd("2025-12-09").unwrap();
//! let spec = FilterSpec::default()
//!     .with_priorities([Priority::High])
//!     .with_overdue(true)
//!     .with_operator(Operator::Or);
//!
//! let task = Task::new("1", "Ship release", "default-work", chrono::Utc::now())
//!     .with_priority(Priority::High);
//!
//! let evaluator = FilterEvaluator::new(&spec, &clock);
//! assert!(evaluator.matches(&task));
//! ```

mod evaluator;
mod spec;

pub use evaluator::{matches, FilterEvaluator};
pub use spec::{FilterSpec, Operator};
