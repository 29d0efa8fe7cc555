//! Task management: CRUD, filter state and the visible task list.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use taskboard_core::{query, Clock, FilterSpec, Operator, Priority, SortKey, Status, SystemClock, Task};
use tracing::debug;
use uuid::Uuid;

use crate::error::{ManagerError, ManagerResult};
use crate::kv::KeyValueStore;
use crate::model::{TaskDraft, TaskPatch};
use crate::storage::Storage;
use crate::validate::validate_task;

/// The filter selections a user has made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub search: String,
    pub categories: Vec<String>,
    pub priorities: Vec<Priority>,
    pub statuses: Vec<Status>,
    pub overdue: bool,
    pub today: bool,
    pub week: bool,
    pub operator: Operator,
}

impl TaskFilters {
    /// Builds the query specification for these selections.
    pub fn to_spec(&self) -> FilterSpec {
        FilterSpec {
            categories: Some(self.categories.clone()),
            priorities: Some(self.priorities.clone()),
            statuses: Some(self.statuses.clone()),
            search_term: Some(self.search.clone()),
            overdue: Some(self.overdue),
            due_today: Some(self.today),
            due_this_week: Some(self.week),
            operator: Some(self.operator),
        }
    }

    /// True if any selection would narrow the task list.
    pub fn is_active(&self) -> bool {
        !self.to_spec().is_empty()
    }
}

/// Task counts per filter option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCounts {
    /// Count per category id.
    pub categories: BTreeMap<String, usize>,
    pub priorities: Vec<(Priority, usize)>,
    pub statuses: Vec<(Status, usize)>,
}

/// Owns the task list and the current filter and sort selection.
///
/// Every mutation is written through to storage immediately. The in-memory
/// list only changes once the write succeeds.
#[derive(Debug)]
pub struct TaskManager<S, C = SystemClock> {
    storage: Storage<S, C>,
    tasks: Vec<Task>,
    filters: TaskFilters,
    sort: Option<SortKey>,
}

impl<S: KeyValueStore, C: Clock> TaskManager<S, C> {
    /// Loads tasks and the saved sort order, seeding defaults if needed.
    pub fn new(storage: Storage<S, C>) -> ManagerResult<Self> {
        storage.initialize()?;
        let tasks = storage.tasks()?;
        let sort = match storage.settings()? {
            Some(settings) => settings.sort_key(),
            None => Some(SortKey::default()),
        };
        debug!(count = tasks.len(), ?sort, "tasks loaded");

        Ok(Self {
            storage,
            tasks,
            filters: TaskFilters::default(),
            sort,
        })
    }

    pub fn storage(&self) -> &Storage<S, C> {
        &self.storage
    }

    /// Re-reads tasks from storage.
    pub fn reload(&mut self) -> ManagerResult<()> {
        self.tasks = self.storage.tasks()?;
        Ok(())
    }

    /// All tasks in stored order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Finds a task by exact id or unique id prefix.
    pub fn find_task(&self, id_or_prefix: &str) -> ManagerResult<&Task> {
        if let Some(task) = self.get_task(id_or_prefix) {
            return Ok(task);
        }

        let matches: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| !id_or_prefix.is_empty() && t.id.starts_with(id_or_prefix))
            .collect();

        match matches.as_slice() {
            [] => Err(ManagerError::TaskNotFound(id_or_prefix.to_string())),
            [task] => Ok(task),
            _ => Err(ManagerError::AmbiguousTask {
                prefix: id_or_prefix.to_string(),
                count: matches.len(),
            }),
        }
    }

    // ==================== Mutations ====================

    /// Validates and stores a new task.
    pub fn add_task(&mut self, draft: TaskDraft) -> ManagerResult<Task> {
        let errors = validate_task(&draft, self.storage.clock().today());
        if !errors.is_empty() {
            return Err(ManagerError::Validation(errors));
        }

        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: draft.title.trim().to_string(),
            description: clean_description(draft.description.as_deref()),
            category_id: draft.category_id,
            priority: draft.priority,
            status: draft.status,
            due_date: draft.due_date.filter(|d| !d.is_empty()),
            created_at: self.storage.clock().now(),
            updated_at: None,
        };

        let mut staged = self.tasks.clone();
        staged.push(task.clone());
        self.commit(staged)?;
        debug!(id = %task.id, "task added");
        Ok(task)
    }

    /// Applies `patch` to the task with the given id.
    ///
    /// The merged task is validated; the due date is only checked when the
    /// patch changes it, so an overdue task can still be edited.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> ManagerResult<Task> {
        let index = self.index_of(id)?;

        let mut check = merge_draft(&self.tasks[index], &patch);
        if patch.due_date.is_none() {
            check.due_date = None;
        }
        let errors = validate_task(&check, self.storage.clock().today());
        if !errors.is_empty() {
            return Err(ManagerError::Validation(errors));
        }

        self.apply_patch(index, patch)
    }

    /// Removes a task, returning it.
    pub fn delete_task(&mut self, id: &str) -> ManagerResult<Task> {
        let index = self.index_of(id)?;
        let mut staged = self.tasks.clone();
        let task = staged.remove(index);
        self.commit(staged)?;
        debug!(id = %task.id, "task deleted");
        Ok(task)
    }

    /// Advances the status: pending, in-progress, completed, then pending again.
    pub fn toggle_status(&mut self, id: &str) -> ManagerResult<Task> {
        let index = self.index_of(id)?;
        let patch = TaskPatch {
            status: Some(self.tasks[index].status.next()),
            ..TaskPatch::default()
        };
        self.apply_patch(index, patch)
    }

    fn index_of(&self, id: &str) -> ManagerResult<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ManagerError::TaskNotFound(id.to_string()))
    }

    fn apply_patch(&mut self, index: usize, patch: TaskPatch) -> ManagerResult<Task> {
        let now = self.storage.clock().now();
        let mut staged = self.tasks.clone();
        let task = &mut staged[index];

        if let Some(title) = patch.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            task.description = clean_description(Some(&description));
        }
        if let Some(category_id) = patch.category_id {
            task.category_id = category_id;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date.filter(|d| !d.is_empty());
        }
        task.updated_at = Some(now);

        let updated = task.clone();
        self.commit(staged)?;
        Ok(updated)
    }

    /// Writes `tasks` to storage, then adopts them as the current list.
    fn commit(&mut self, tasks: Vec<Task>) -> ManagerResult<()> {
        self.storage.save_tasks(&tasks)?;
        self.tasks = tasks;
        Ok(())
    }

    // ==================== Filters & Sorting ====================

    pub fn filters(&self) -> &TaskFilters {
        &self.filters
    }

    pub fn set_search_filter(&mut self, term: impl Into<String>) {
        self.filters.search = term.into();
    }

    pub fn set_category_filters(&mut self, category_ids: Vec<String>) {
        self.filters.categories = category_ids;
    }

    pub fn set_priority_filters(&mut self, priorities: Vec<Priority>) {
        self.filters.priorities = priorities;
    }

    pub fn set_status_filters(&mut self, statuses: Vec<Status>) {
        self.filters.statuses = statuses;
    }

    pub fn set_date_filters(&mut self, overdue: bool, today: bool, week: bool) {
        self.filters.overdue = overdue;
        self.filters.today = today;
        self.filters.week = week;
    }

    pub fn set_operator(&mut self, operator: Operator) {
        self.filters.operator = operator;
    }

    pub fn clear_filters(&mut self) {
        self.filters = TaskFilters::default();
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.is_active()
    }

    /// The current sort key; `None` keeps stored order.
    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort
    }

    /// Changes the sort order and persists it as the `sortBy` setting.
    pub fn set_sorting(&mut self, key: SortKey) -> ManagerResult<()> {
        self.storage
            .update_setting("sortBy", Value::String(key.as_str().to_string()))?;
        self.sort = Some(key);
        Ok(())
    }

    /// Changes the sort order for this session only.
    pub fn set_sort_override(&mut self, key: Option<SortKey>) {
        self.sort = key;
    }

    /// Tasks matching the current filters, in the current sort order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        let spec = self.filters.to_spec();
        query(&self.tasks, Some(&spec), self.sort, self.storage.clock())
    }

    /// Counts tasks per category, priority and status over the whole list.
    pub fn filter_counts(&self) -> FilterCounts {
        let mut categories = BTreeMap::new();
        for task in &self.tasks {
            *categories.entry(task.category_id.clone()).or_insert(0) += 1;
        }

        let priorities = [Priority::High, Priority::Medium, Priority::Low]
            .into_iter()
            .map(|p| {
                let count = self.tasks.iter().filter(|t| t.priority == p).count();
                (p, count)
            })
            .collect();

        let statuses = Status::ALL
            .into_iter()
            .map(|s| {
                let count = self.tasks.iter().filter(|t| t.status == s).count();
                (s, count)
            })
            .collect();

        FilterCounts {
            categories,
            priorities,
            statuses,
        }
    }
}

fn clean_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

fn merge_draft(task: &Task, patch: &TaskPatch) -> TaskDraft {
    let mut draft = TaskDraft::from(task);
    if let Some(title) = &patch.title {
        draft.title = title.clone();
    }
    if let Some(description) = &patch.description {
        draft.description = Some(description.clone());
    }
    if let Some(category_id) = &patch.category_id {
        draft.category_id = category_id.clone();
    }
    if let Some(priority) = &patch.priority {
        draft.priority = priority.clone();
    }
    if let Some(status) = &patch.status {
        draft.status = status.clone();
    }
    if let Some(due_date) = &patch.due_date {
        draft.due_date = due_date.clone();
    }
    draft
}
