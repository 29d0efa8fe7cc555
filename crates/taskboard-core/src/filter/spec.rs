//! Filter specification types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{Priority, Status};

/// How participating criteria are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    /// Every participating criterion must hold.
    #[default]
    And,
    /// At least one participating criterion must hold.
    Or,
}

impl Operator {
    /// Returns the canonical uppercase form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }

    /// Parses an operator, falling back to `And` for anything unrecognized.
    ///
    /// The fallback is logged at warn level.
    pub fn parse_lenient(s: &str) -> Operator {
        match s.parse() {
            Ok(op) => op,
            Err(_) => {
                tracing::warn!(operator = s, "unknown filter operator, using AND");
                Operator::And
            }
        }
    }
}

impl FromStr for Operator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(Operator::And),
            "OR" => Ok(Operator::Or),
            _ => Err(CoreError::unknown_value("operator", s, &["AND", "OR"])),
        }
    }
}

impl From<String> for Operator {
    fn from(value: String) -> Self {
        Operator::parse_lenient(&value)
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of criteria a query filters by.
///
/// Every field is optional. `None`, an empty list, a blank search term and
/// `Some(false)` all mean the criterion does not participate, but they stay
/// distinguishable so a caller can round-trip exactly what it was given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priorities: Option<Vec<Priority>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<Status>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub overdue: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_today: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_this_week: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
}

impl FilterSpec {
    /// Keeps tasks in any of these category ids.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Keeps tasks with any of these priorities.
    pub fn with_priorities(mut self, priorities: impl IntoIterator<Item = Priority>) -> Self {
        self.priorities = Some(priorities.into_iter().collect());
        self
    }

    /// Keeps tasks with any of these statuses.
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = Status>) -> Self {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    /// Sets the title/description search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Selects overdue tasks when `true`.
    pub fn with_overdue(mut self, overdue: bool) -> Self {
        self.overdue = Some(overdue);
        self
    }

    /// Selects tasks due today when `true`.
    pub fn with_due_today(mut self, due_today: bool) -> Self {
        self.due_today = Some(due_today);
        self
    }

    /// Selects tasks due between today and the end of the week when `true`.
    pub fn with_due_this_week(mut self, due_this_week: bool) -> Self {
        self.due_this_week = Some(due_this_week);
        self
    }

    /// Sets how participating criteria combine.
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// The effective operator (`And` when unset).
    pub fn operator(&self) -> Operator {
        self.operator.unwrap_or_default()
    }

    /// Returns the trimmed search term if it participates.
    pub fn search(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// True if any of the date flags is set to `true`.
    pub fn has_date_group(&self) -> bool {
        self.overdue == Some(true) || self.due_today == Some(true) || self.due_this_week == Some(true)
    }

    /// True if no criterion participates, so every task matches.
    pub fn is_empty(&self) -> bool {
        fn unset<T>(list: &Option<Vec<T>>) -> bool {
            list.as_ref().map_or(true, Vec::is_empty)
        }

        unset(&self.categories)
            && unset(&self.priorities)
            && unset(&self.statuses)
            && self.search().is_none()
            && !self.has_date_group()
    }
}
