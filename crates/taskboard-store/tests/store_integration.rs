//! Integration tests for file-backed storage and the managers.
//!
//! These tests verify that tasks, categories and settings survive a restart
//! when written to disk.

use std::fs;

use serde_json::json;
use taskboard_core::{FixedClock, Operator, Priority, SortKey, Status};
use taskboard_store::{
    CategoryManager, FileStore, ManagerError, Storage, TaskDraft, TaskManager, TaskPatch,
};
use tempfile::tempdir;

fn clock() -> FixedClock {
    FixedClock::from_ymd("2025-12-09").expect("valid date")
}

#[test]
fn test_tasks_survive_restart() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = FileStore::in_dir(temp_dir.path());

    let id = {
        let mut tasks =
            TaskManager::new(Storage::with_clock(&store, clock())).expect("failed to open tasks");
        let task = tasks
            .add_task(
                TaskDraft::new("Pay rent", "default-personal")
                    .with_priority(Priority::High)
                    .with_due_date("2025-12-12"),
            )
            .expect("failed to add task");
        tasks.toggle_status(&task.id).expect("failed to toggle");
        tasks
            .set_sorting(SortKey::DueAsc)
            .expect("failed to persist sort");
        task.id
    };

    assert!(store.exists(), "store file should exist after a write");

    let reopened = FileStore::in_dir(temp_dir.path());
    let tasks =
        TaskManager::new(Storage::with_clock(&reopened, clock())).expect("failed to reopen");
    let task = tasks.get_task(&id).expect("task should be persisted");

    assert_eq!(task.title, "Pay rent");
    assert_eq!(task.status, Status::InProgress);
    assert_eq!(task.due_date.as_deref(), Some("2025-12-12"));
    assert!(task.updated_at.is_some());
    assert_eq!(tasks.sort_key(), Some(SortKey::DueAsc));
}

#[test]
fn test_managers_share_one_store() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = FileStore::in_dir(temp_dir.path());
    let storage = Storage::with_clock(&store, clock());

    let mut categories = CategoryManager::new(storage.clone()).expect("failed to open categories");
    let mut tasks = TaskManager::new(storage.clone()).expect("failed to open tasks");

    let garden = categories
        .add("Garden", Some("#2ecc71"))
        .expect("failed to add category");
    tasks
        .add_task(TaskDraft::new("Plant bulbs", &garden.id))
        .expect("failed to add task");

    let err = categories.delete(&garden.id).unwrap_err();
    assert!(matches!(err, ManagerError::CategoryInUse { count: 1, .. }));

    let task_id = tasks.tasks()[0].id.clone();
    tasks
        .update_task(
            &task_id,
            TaskPatch {
                category_id: Some("default-personal".to_string()),
                ..TaskPatch::default()
            },
        )
        .expect("failed to move task");
    categories
        .delete(&garden.id)
        .expect("category should be deletable once unused");
}

#[test]
fn test_filtered_view_over_file_store() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = FileStore::in_dir(temp_dir.path());
    let mut tasks =
        TaskManager::new(Storage::with_clock(&store, clock())).expect("failed to open tasks");

    for (title, category, priority, due) in [
        ("Report", "default-work", Priority::High, Some("2025-12-09")),
        ("Groceries", "default-shopping", Priority::Low, Some("2025-12-11")),
        ("Call mom", "default-personal", Priority::Medium, None),
    ] {
        let mut draft = TaskDraft::new(title, category).with_priority(priority);
        draft.due_date = due.map(str::to_string);
        tasks.add_task(draft).expect("failed to add task");
    }

    tasks.set_sorting(SortKey::DueAsc).expect("failed to sort");
    let titles: Vec<&str> = tasks.visible_tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Report", "Groceries", "Call mom"]);

    tasks.set_date_filters(false, true, false);
    tasks.set_priority_filters(vec![Priority::Medium]);
    tasks.set_operator(Operator::Or);
    let titles: Vec<&str> = tasks.visible_tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Report", "Call mom"]);

    tasks.set_operator(Operator::And);
    assert!(tasks.visible_tasks().is_empty());
}

#[test]
fn test_backup_restore_roundtrip_on_disk() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = FileStore::in_dir(temp_dir.path().join("data"));
    let storage = Storage::with_clock(&store, clock());

    let mut tasks = TaskManager::new(storage.clone()).expect("failed to open tasks");
    tasks
        .add_task(TaskDraft::new("Keep me", "default-work"))
        .expect("failed to add task");

    let backup = storage.create_backup().expect("failed to create backup");
    let backup_path = temp_dir.path().join(backup.file_name());
    fs::write(
        &backup_path,
        serde_json::to_string_pretty(&backup).expect("failed to serialize backup"),
    )
    .expect("failed to write backup");

    storage.clear_all().expect("failed to clear");
    assert!(storage.tasks().expect("failed to read").is_empty());

    let document: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(&backup_path).expect("failed to read backup"),
    )
    .expect("backup should be valid JSON");
    let summary = storage
        .import_document(&document)
        .expect("failed to restore");

    assert_eq!(summary.tasks, Some(1));
    assert_eq!(summary.categories, Some(3));
    assert!(summary.settings);
    assert_eq!(storage.tasks().expect("failed to read")[0].title, "Keep me");
}

#[test]
fn test_import_rejects_bad_backup() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = FileStore::in_dir(temp_dir.path());
    let storage = Storage::with_clock(&store, clock());

    let err = storage
        .restore_backup(&json!({ "data": "nope" }))
        .unwrap_err();
    assert!(err.to_string().contains("invalid backup file format"));
}

#[test]
fn test_corrupt_store_file_is_preserved() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = FileStore::in_dir(temp_dir.path());
    fs::write(store.path(), "definitely not json").expect("failed to write junk");

    let tasks =
        TaskManager::new(Storage::with_clock(&store, clock())).expect("should recover");
    assert!(tasks.tasks().is_empty());

    let categories =
        CategoryManager::new(Storage::with_clock(&store, clock())).expect("should recover");
    assert_eq!(categories.categories().len(), 3);

    let saved: Vec<_> = fs::read_dir(temp_dir.path())
        .expect("failed to read temp dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.to_string_lossy().contains("store.json.corrupt-"))
        .collect();
    assert_eq!(saved.len(), 1, "the corrupt file should be kept aside");
    assert_eq!(
        fs::read_to_string(&saved[0]).expect("failed to read corrupt copy"),
        "definitely not json"
    );
    assert!(store.exists(), "a fresh store should be written");
}
