//! Integration tests for taskdeck-core services
//!
//! These tests exercise the full service stack against real DuckDB.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::sync::Arc;

use chrono::{Duration, Utc};
use tempfile::TempDir;
use uuid::Uuid;

use taskdeck_core::adapters::duckdb::DuckDbStore;
use taskdeck_core::domain::{SortPagination, TaskStatus, User, UserId};
use taskdeck_core::ports::{ListStore, ListVisibility, TaskStore};
use taskdeck_core::services::{
    CreateList, CreateTask, ListService, ListView, TaskService, TaskView, UpdateList, UpdateTask,
};
use taskdeck_core::Error;

// ============================================================================
// Test Helpers
// ============================================================================

struct TestEnv {
    _temp_dir: TempDir,
    store: Arc<DuckDbStore>,
    lists: Arc<ListService>,
    tasks: TaskService,
}

/// Create list and task services over a fresh on-disk database
fn create_test_env() -> TestEnv {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.duckdb");
    let store = Arc::new(DuckDbStore::new(&db_path).expect("Failed to open database"));
    store.ensure_schema().expect("Failed to initialize schema");

    let lists = Arc::new(ListService::new(
        Arc::clone(&store) as Arc<dyn ListStore>,
        Arc::clone(&store) as Arc<dyn TaskStore>,
    ));
    let tasks = TaskService::new(
        Arc::clone(&store) as Arc<dyn TaskStore>,
        Arc::clone(&lists) as Arc<dyn ListVisibility>,
    );

    TestEnv {
        _temp_dir: temp_dir,
        store,
        lists,
        tasks,
    }
}

fn test_user(name: &str) -> User {
    User::new(UserId::new(), name, format!("{}@example.com", name.to_lowercase()))
}

async fn make_list(env: &TestEnv, name: &str, is_public: bool, owner: &User) -> ListView {
    env.lists
        .create_list(
            CreateList {
                name: name.to_string(),
                is_public,
            },
            owner,
        )
        .await
        .unwrap()
}

async fn make_task(env: &TestEnv, title: &str, list_id: Uuid, creator: &User) -> TaskView {
    env.tasks
        .create_task(
            CreateTask {
                title: title.to_string(),
                description: None,
                due_date: None,
                status: TaskStatus::Pending,
                list_id,
            },
            creator,
        )
        .await
        .unwrap()
}

fn update_from_view(view: &TaskView) -> UpdateTask {
    UpdateTask {
        id: view.id,
        title: view.title.clone(),
        description: view.description.clone(),
        due_date: view.due_date,
        status: TaskStatus::from_id(view.status_id).unwrap(),
        list_id: view.list_id,
        assigned_to: view.assigned_to,
        order: view.order,
    }
}

// ============================================================================
// List Visibility
// ============================================================================

#[tokio::test]
async fn test_private_list_invisible_to_strangers() {
    let env = create_test_env();
    let alice = test_user("Alice");
    let bob = test_user("Bob");

    let list = make_list(&env, "Alice private", false, &alice).await;

    let fetched = env.lists.get_list_by_id(list.id, &alice).await.unwrap();
    assert_eq!(fetched.name, "Alice private");

    let err = env.lists.get_list_by_id(list.id, &bob).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));
}

#[tokio::test]
async fn test_public_list_readable_but_not_writable_by_strangers() {
    let env = create_test_env();
    let alice = test_user("Alice");
    let bob = test_user("Bob");

    let list = make_list(&env, "Shared board", true, &alice).await;

    assert!(env.lists.get_list_by_id(list.id, &bob).await.is_ok());

    let err = env
        .lists
        .update_list(
            UpdateList {
                id: list.id,
                name: "Taken over".to_string(),
                is_public: false,
            },
            &bob,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let err = env.lists.delete_list(list.id, &bob).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));
}

#[tokio::test]
async fn test_list_view_embeds_tasks() {
    let env = create_test_env();
    let alice = test_user("Alice");

    let list = make_list(&env, "Inbox", false, &alice).await;
    make_task(&env, "First", list.id, &alice).await;
    make_task(&env, "Second", list.id, &alice).await;

    let fetched = env.lists.get_list_by_id(list.id, &alice).await.unwrap();
    assert_eq!(fetched.tasks.len(), 2);
}

#[tokio::test]
async fn test_delete_list_takes_tasks_with_it() {
    let env = create_test_env();
    let alice = test_user("Alice");

    let list = make_list(&env, "Doomed", false, &alice).await;
    let task = make_task(&env, "Goes too", list.id, &alice).await;

    assert!(env.lists.delete_list(list.id, &alice).await.unwrap());

    let err = env.tasks.get_task_by_id(task.id, &alice).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

// ============================================================================
// Task Completion State Machine
// ============================================================================

#[tokio::test]
async fn test_complete_then_complete_again_fails() {
    let env = create_test_env();
    let alice = test_user("Alice");

    let list = make_list(&env, "Inbox", false, &alice).await;
    let task = make_task(&env, "One shot", list.id, &alice).await;

    let completed = env.tasks.complete_task(task.id, &alice).await.unwrap();
    assert_eq!(completed.status, "Completed");

    let err = env.tasks.complete_task(task.id, &alice).await.unwrap_err();
    assert!(matches!(err, Error::InvalidOperation(_)));
}

#[tokio::test]
async fn test_completed_task_survives_update_and_delete_attempts() {
    let env = create_test_env();
    let alice = test_user("Alice");

    let list = make_list(&env, "Inbox", false, &alice).await;
    let task = make_task(&env, "Locked in", list.id, &alice).await;
    env.tasks.complete_task(task.id, &alice).await.unwrap();

    let mut input = update_from_view(&task);
    input.title = "Tampered".to_string();
    let err = env.tasks.update_task(input, &alice).await.unwrap_err();
    assert!(matches!(err, Error::InvalidOperation(_)));

    let err = env.tasks.delete_task(task.id, &alice).await.unwrap_err();
    assert!(matches!(err, Error::InvalidOperation(_)));

    // Still there, untouched
    let fetched = env.tasks.get_task_by_id(task.id, &alice).await.unwrap();
    assert_eq!(fetched.title, "Locked in");
    assert_eq!(fetched.status_id, TaskStatus::Completed.id());
}

#[tokio::test]
async fn test_stranger_completes_public_task_but_cannot_update() {
    let env = create_test_env();
    let alice = test_user("Alice");
    let bob = test_user("Bob");

    let list = make_list(&env, "Community", true, &alice).await;
    let task = make_task(&env, "Anyone may finish", list.id, &alice).await;

    // Bob is neither creator nor assignee but the list is public
    let completed = env.tasks.complete_task(task.id, &bob).await.unwrap();
    assert_eq!(completed.status, "Completed");
    assert_eq!(completed.list_name.as_deref(), Some("Community"));

    // Completion rights never implied update rights
    let open_task = make_task(&env, "Still Alice's", list.id, &alice).await;
    let mut input = update_from_view(&open_task);
    input.title = "Bob's now".to_string();
    let err = env.tasks.update_task(input, &bob).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));
}

#[tokio::test]
async fn test_stranger_cannot_complete_in_private_list() {
    let env = create_test_env();
    let alice = test_user("Alice");
    let bob = test_user("Bob");

    let list = make_list(&env, "Private", false, &alice).await;
    let task = make_task(&env, "Hands off", list.id, &alice).await;

    let err = env.tasks.complete_task(task.id, &bob).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));
}

#[tokio::test]
async fn test_assignee_holds_mutation_rights() {
    let env = create_test_env();
    let alice = test_user("Alice");
    let bob = test_user("Bob");

    let list = make_list(&env, "Handover", false, &alice).await;
    let task = make_task(&env, "Delegated", list.id, &alice).await;

    let mut input = update_from_view(&task);
    input.assigned_to = bob.id;
    env.tasks.update_task(input, &alice).await.unwrap();

    // Bob may now update even though Alice created the task
    let fetched = env.tasks.get_task_by_id(task.id, &alice).await.unwrap();
    let mut input = update_from_view(&fetched);
    input.status = TaskStatus::InProgress;
    let updated = env.tasks.update_task(input, &bob).await.unwrap();
    assert_eq!(updated.status, "In Progress");
}

// ============================================================================
// Filtered Queries
// ============================================================================

#[tokio::test]
async fn test_list_tasks_exclude_completed() {
    let env = create_test_env();
    let alice = test_user("Alice");

    let list = make_list(&env, "Inbox", false, &alice).await;
    make_task(&env, "Open one", list.id, &alice).await;
    make_task(&env, "Open two", list.id, &alice).await;
    let done = make_task(&env, "Done", list.id, &alice).await;
    env.tasks.complete_task(done.id, &alice).await.unwrap();

    let page = env
        .tasks
        .get_tasks_by_list_id(list.id, &SortPagination::default(), &alice)
        .await
        .unwrap();
    assert_eq!(page.total_count, 2);
    assert!(page.items.iter().all(|t| t.status_id != TaskStatus::Completed.id()));
}

#[tokio::test]
async fn test_today_filter_ignores_other_days() {
    let env = create_test_env();
    let alice = test_user("Alice");
    let list = make_list(&env, "Agenda", false, &alice).await;

    let cases = [
        ("Yesterday", Utc::now() - Duration::days(1)),
        ("Today", Utc::now()),
        ("Tomorrow", Utc::now() + Duration::days(1)),
    ];
    for (title, due) in cases {
        env.tasks
            .create_task(
                CreateTask {
                    title: title.to_string(),
                    description: None,
                    due_date: Some(due),
                    status: TaskStatus::Pending,
                    list_id: list.id,
                },
                &alice,
            )
            .await
            .unwrap();
    }

    let today = env
        .tasks
        .get_today_tasks(&SortPagination::default(), &alice)
        .await
        .unwrap();
    assert_eq!(today.total_count, 1);
    assert_eq!(today.items[0].title, "Today");

    let upcoming = env
        .tasks
        .get_upcoming_tasks(&SortPagination::default(), &alice)
        .await
        .unwrap();
    assert_eq!(upcoming.total_count, 1);
    assert_eq!(upcoming.items[0].title, "Tomorrow");
}

#[tokio::test]
async fn test_user_tasks_union_of_own_and_public() {
    let env = create_test_env();
    let alice = test_user("Alice");
    let bob = test_user("Bob");

    let mine = make_list(&env, "Mine", false, &alice).await;
    let square = make_list(&env, "Town square", true, &bob).await;
    let bobs = make_list(&env, "Bob only", false, &bob).await;

    make_task(&env, "My errand", mine.id, &alice).await;
    make_task(&env, "Posted publicly", square.id, &bob).await;
    make_task(&env, "Invisible to Alice", bobs.id, &bob).await;
    // A task Alice created in the public list must not be duplicated
    make_task(&env, "Mine in public", square.id, &alice).await;

    let mut titles: Vec<String> = env
        .tasks
        .get_user_tasks(&alice, None)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    titles.sort();
    assert_eq!(titles, ["Mine in public", "My errand", "Posted publicly"]);
}

#[tokio::test]
async fn test_user_tasks_search_matches_title_and_description() {
    let env = create_test_env();
    let alice = test_user("Alice");
    let list = make_list(&env, "Mine", false, &alice).await;

    env.tasks
        .create_task(
            CreateTask {
                title: "Weekly shop".to_string(),
                description: Some("Milk, eggs, bread".to_string()),
                due_date: None,
                status: TaskStatus::Pending,
                list_id: list.id,
            },
            &alice,
        )
        .await
        .unwrap();
    make_task(&env, "Call plumber", list.id, &alice).await;

    let by_description = env
        .tasks
        .get_user_tasks(&alice, Some("eggs"))
        .await
        .unwrap();
    assert_eq!(by_description.len(), 1);
    assert_eq!(by_description[0].title, "Weekly shop");

    // Case matters
    let none = env.tasks.get_user_tasks(&alice, Some("EGGS")).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_status_listing_scoped_to_caller() {
    let env = create_test_env();
    let alice = test_user("Alice");
    let bob = test_user("Bob");

    let alices = make_list(&env, "Alice list", false, &alice).await;
    let bobs = make_list(&env, "Bob list", false, &bob).await;
    make_task(&env, "Alice pending", alices.id, &alice).await;
    make_task(&env, "Bob pending", bobs.id, &bob).await;

    let scoped = env
        .tasks
        .get_tasks_by_status(
            TaskStatus::Pending.id(),
            &SortPagination::default(),
            Some(&alice),
        )
        .await
        .unwrap();
    assert_eq!(scoped.total_count, 1);
    assert_eq!(scoped.items[0].title, "Alice pending");

    let all = env
        .tasks
        .get_tasks_by_status(TaskStatus::Pending.id(), &SortPagination::default(), None)
        .await
        .unwrap();
    assert_eq!(all.total_count, 2);
}

#[tokio::test]
async fn test_tasks_by_tag() {
    let env = create_test_env();
    let alice = test_user("Alice");
    let list = make_list(&env, "Projects", false, &alice).await;

    let tagged = make_task(&env, "Paint shed", list.id, &alice).await;
    make_task(&env, "Untagged", list.id, &alice).await;

    let tag = taskdeck_core::domain::Tag::new(Uuid::new_v4(), "outdoor", "#00ff00", alice.id);
    env.store.insert_tag(&tag).await.unwrap();
    env.store.tag_task(tagged.id, tag.id).await.unwrap();

    let page = env
        .tasks
        .get_tasks_by_tag(tag.id, &SortPagination::default())
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].id, tagged.id);
    assert_eq!(page.items[0].tags.len(), 1);
    assert_eq!(page.items[0].tags[0].name, "outdoor");
}

// ============================================================================
// Sorting and Paging
// ============================================================================

#[tokio::test]
async fn test_paging_through_list_tasks() {
    let env = create_test_env();
    let alice = test_user("Alice");
    let list = make_list(&env, "Backlog", false, &alice).await;

    for i in 0..12 {
        let mut input = update_from_view(&make_task(&env, &format!("Item {i:02}"), list.id, &alice).await);
        input.order = i;
        env.tasks.update_task(input, &alice).await.unwrap();
    }

    let first = env
        .tasks
        .get_tasks_by_list_id(list.id, &SortPagination::new(5, 0, None, "asc"), &alice)
        .await
        .unwrap();
    assert_eq!(first.total_count, 12);
    assert_eq!(first.items.len(), 5);
    assert_eq!(first.current_page, 1);
    assert_eq!(first.total_pages(), 3);
    assert!(first.has_next());
    assert!(!first.has_previous());

    let last = env
        .tasks
        .get_tasks_by_list_id(list.id, &SortPagination::new(5, 10, None, "asc"), &alice)
        .await
        .unwrap();
    assert_eq!(last.items.len(), 2);
    assert!(!last.has_next());
}

#[tokio::test]
async fn test_sort_by_title_descending() {
    let env = create_test_env();
    let alice = test_user("Alice");
    let list = make_list(&env, "Sorted", false, &alice).await;

    for title in ["Bravo", "Alpha", "Charlie"] {
        make_task(&env, title, list.id, &alice).await;
    }

    let page = env
        .tasks
        .get_tasks_by_list_id(
            list.id,
            &SortPagination::new(10, 0, Some("title"), "desc"),
            &alice,
        )
        .await
        .unwrap();
    let titles: Vec<&str> = page.items.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["Charlie", "Bravo", "Alpha"]);
}

// ============================================================================
// Precondition Ordering
// ============================================================================

#[tokio::test]
async fn test_missing_task_reported_before_authorization() {
    let env = create_test_env();
    let bob = test_user("Bob");

    // Bob has no rights to anything, but a missing id is still NotFound
    let err = env
        .tasks
        .get_task_by_id(Uuid::new_v4(), &bob)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_already_completed_reported_before_authorization() {
    let env = create_test_env();
    let alice = test_user("Alice");
    let bob = test_user("Bob");

    let list = make_list(&env, "Private", false, &alice).await;
    let task = make_task(&env, "Done deal", list.id, &alice).await;
    env.tasks.complete_task(task.id, &alice).await.unwrap();

    // Bob would be Forbidden on an open task, but the terminal state
    // is checked first for completion.
    let err = env.tasks.complete_task(task.id, &bob).await.unwrap_err();
    assert!(matches!(err, Error::InvalidOperation(_)));
}
