//! Storage tests against an in-memory SQLite database.
//!
//! Exercises the migrations, the SeaORM repositories and the Unit of Work
//! without a running PostgreSQL server.

use chrono::NaiveDate;
use uuid::Uuid;

use common::DatabaseConfig;
use domain::{Password, Project, ProjectDraft, Task, TaskDraft, TaskStatus, User, UserRole};
use tracker_lib::infra::{Persistence, Transaction, UnitOfWork};
use tracker_lib::repository::{ProjectRepository, SeaStore, TaskRepository, UserRepository};
use tracker_lib::Database;

// =============================================================================
// Test Helpers
// =============================================================================

/// One pooled connection, so every query sees the same in-memory database.
async fn database() -> Database {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    Database::connect(&config).await.unwrap()
}

fn user(username: &str) -> User {
    User::new(
        username.to_string(),
        Password::from_hash("stored-hash".to_string()),
        UserRole::Member,
    )
}

fn project(name: &str, manager_id: Option<Uuid>) -> Project {
    Project::new(
        ProjectDraft {
            name: name.to_string(),
            ..Default::default()
        },
        manager_id,
    )
}

fn task(project_id: Uuid, assignee_id: Option<Uuid>, due: Option<NaiveDate>) -> Task {
    Task::new(
        TaskDraft {
            title: "Review draft".to_string(),
            due_date: due,
            assignee_id,
            ..Default::default()
        },
        project_id,
    )
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Migration Tests
// =============================================================================

#[tokio::test]
async fn test_all_migrations_applied_on_connect() {
    let db = database().await;

    let status = db.migration_status().await.unwrap();
    assert_eq!(status.len(), 3);
    assert!(status.iter().all(|(_, applied)| *applied));

    db.ping().await.unwrap();
}

// =============================================================================
// Repository Tests
// =============================================================================

#[tokio::test]
async fn test_user_round_trip() {
    let store = SeaStore::new(database().await.get_connection());

    let mut alice = UserRepository::insert(&store, user("alice")).await.unwrap();
    let found = UserRepository::find_by_username(&store, "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, alice.id);
    assert_eq!(found.role, UserRole::Member);

    alice.apply_profile(
        "Alice Liddell".to_string(),
        "alice@example.com".to_string(),
        None,
    );
    UserRepository::update(&store, alice.clone()).await.unwrap();

    let reloaded = UserRepository::find_by_id(&store, alice.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.name.as_deref(), Some("Alice Liddell"));
    assert_eq!(reloaded.password_hash, "stored-hash");
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let store = SeaStore::new(database().await.get_connection());

    UserRepository::insert(&store, user("alice")).await.unwrap();
    assert!(UserRepository::insert(&store, user("alice")).await.is_err());
}

#[tokio::test]
async fn test_deleting_project_cascades_to_tasks() {
    let store = SeaStore::new(database().await.get_connection());

    let kept = ProjectRepository::insert(&store, project("Kept", None))
        .await
        .unwrap();
    let doomed = ProjectRepository::insert(&store, project("Doomed", None))
        .await
        .unwrap();
    TaskRepository::insert(&store, task(kept.id, None, None))
        .await
        .unwrap();
    TaskRepository::insert(&store, task(doomed.id, None, None))
        .await
        .unwrap();
    TaskRepository::insert(&store, task(doomed.id, None, None))
        .await
        .unwrap();

    ProjectRepository::delete(&store, doomed.id).await.unwrap();

    assert!(store.tasks_by_project(doomed.id).await.unwrap().is_empty());
    assert_eq!(store.tasks_by_project(kept.id).await.unwrap().len(), 1);
    assert!(ProjectRepository::find_by_id(&store, doomed.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_delete_missing_rows_is_not_found() {
    let store = SeaStore::new(database().await.get_connection());

    let result = ProjectRepository::delete(&store, Uuid::new_v4()).await;
    assert!(matches!(result, Err(common::AppError::NotFound(_))));

    let result = TaskRepository::delete(&store, Uuid::new_v4()).await;
    assert!(matches!(result, Err(common::AppError::NotFound(_))));
}

#[tokio::test]
async fn test_task_queries() {
    let store = SeaStore::new(database().await.get_connection());

    let bob = UserRepository::insert(&store, user("bob")).await.unwrap();
    let first = ProjectRepository::insert(&store, project("First", Some(bob.id)))
        .await
        .unwrap();
    let second = ProjectRepository::insert(&store, project("Second", None))
        .await
        .unwrap();

    let late = task(first.id, Some(bob.id), Some(date(2026, 11, 20)));
    let soon = task(second.id, Some(bob.id), Some(date(2026, 10, 20)));
    TaskRepository::insert(&store, late.clone()).await.unwrap();
    TaskRepository::insert(&store, soon.clone()).await.unwrap();
    TaskRepository::insert(&store, task(second.id, None, None))
        .await
        .unwrap();

    let assigned = store.tasks_by_assignee(bob.id).await.unwrap();
    let ids: Vec<Uuid> = assigned.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![soon.id, late.id]);

    assert!(store.list_for_projects(Vec::new()).await.unwrap().is_empty());
    assert_eq!(
        store
            .list_for_projects(vec![first.id, second.id])
            .await
            .unwrap()
            .len(),
        3
    );

    let removed = store.delete_by_project(second.id).await.unwrap();
    assert_eq!(removed, 2);
}

#[tokio::test]
async fn test_task_update_persists_status() {
    let store = SeaStore::new(database().await.get_connection());

    let owner = ProjectRepository::insert(&store, project("Owner", None))
        .await
        .unwrap();
    let mut saved = TaskRepository::insert(&store, task(owner.id, None, None))
        .await
        .unwrap();
    saved.status = TaskStatus::Completed;
    TaskRepository::update(&store, saved.clone()).await.unwrap();

    let reloaded = TaskRepository::find_by_id(&store, saved.id)
        .await
        .unwrap()
        .unwrap();
    assert!(reloaded.is_completed());
}

// =============================================================================
// Unit of Work Tests
// =============================================================================

#[tokio::test]
async fn test_rolled_back_transaction_leaves_no_trace() {
    let db = database().await;
    let uow = Persistence::new(db.get_connection());

    let tx = uow.begin().await.unwrap();
    let carol = tx.users().insert(user("carol")).await.unwrap();
    tx.rollback().await.unwrap();

    let tx = uow.begin().await.unwrap();
    assert!(tx.users().find_by_id(carol.id).await.unwrap().is_none());
    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn test_committed_transaction_is_visible() {
    let db = database().await;
    let uow = Persistence::new(db.get_connection());

    let tx = uow.begin().await.unwrap();
    let dave = tx.users().insert(user("dave")).await.unwrap();
    tx.commit().await.unwrap();

    let store = SeaStore::new(db.get_connection());
    let found = UserRepository::find_by_id(&store, dave.id).await.unwrap();
    assert!(found.is_some());
}
