//! Task service - task CRUD, visibility, and the completion state machine

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{Page, SortPagination, Tag, Task, TaskStatus, User, UserId};
use crate::ports::{ListVisibility, TaskFilter, TaskStore};

/// Input for creating a task
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: TaskStatus,
    pub list_id: Uuid,
}

/// Input for updating a task. Every field overwrites the stored value;
/// `created_by` and the id itself are immutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub list_id: Uuid,
    pub assigned_to: UserId,
    pub order: i32,
}

/// Read-only task projection returned to callers
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    /// Resolved status display name
    pub status: &'static str,
    pub status_id: i32,
    pub list_id: Uuid,
    /// Populated on single-task reads, where the parent list is
    /// already loaded for the visibility check
    pub list_name: Option<String>,
    pub created_by: UserId,
    pub assigned_to: UserId,
    pub order: i32,
    pub tags: Vec<Tag>,
}

impl TaskView {
    pub(crate) fn from_task(task: Task, list_name: Option<String>) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            status: task.status.name(),
            status_id: task.status.id(),
            list_id: task.list_id,
            list_name,
            created_by: task.created_by,
            assigned_to: task.assigned_to,
            order: task.order,
            tags: task.tags,
        }
    }
}

/// Task service.
///
/// All cross-entity checks go through the [`ListVisibility`]
/// capability; this service never inspects raw list rows itself.
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    lists: Arc<dyn ListVisibility>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>, lists: Arc<dyn ListVisibility>) -> Self {
        Self { store, lists }
    }

    /// Create a task. The caller becomes both creator and assignee.
    ///
    /// The referenced list is not checked here; a dangling `list_id`
    /// is rejected by the store's foreign key.
    pub async fn create_task(&self, input: CreateTask, user: &User) -> Result<TaskView> {
        let mut task = Task::new(Uuid::new_v4(), input.title, input.list_id, user.id);
        task.description = input.description;
        task.due_date = input.due_date;
        task.status = input.status;

        self.store.insert_task(&task).await?;
        Ok(TaskView::from_task(task, None))
    }

    /// Fetch one task, enforcing list visibility
    pub async fn get_task_by_id(&self, task_id: Uuid, user: &User) -> Result<TaskView> {
        if task_id.is_nil() {
            return Err(Error::invalid_argument("task id cannot be empty"));
        }

        let task = self
            .store
            .get_task_by_id(task_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("task with id {task_id} not found")))?;

        let access = self.lists.access(task.list_id, user).await?;
        if !access.readable() {
            return Err(Error::forbidden("you are not allowed to view this task"));
        }

        Ok(TaskView::from_task(task, Some(access.name)))
    }

    /// Unrestricted listing. No per-row visibility filter is applied;
    /// callers must treat this as a privileged surface.
    pub async fn get_all_tasks(&self) -> Result<Vec<TaskView>> {
        let tasks = self.store.get_all_tasks().await?;
        Ok(tasks
            .into_iter()
            .map(|t| TaskView::from_task(t, None))
            .collect())
    }

    /// Open tasks in a list, sorted and paged. Completed tasks are
    /// never included.
    pub async fn get_tasks_by_list_id(
        &self,
        list_id: Uuid,
        sort_pagination: &SortPagination,
        user: &User,
    ) -> Result<Page<TaskView>> {
        if list_id.is_nil() {
            return Err(Error::invalid_argument("list id cannot be empty"));
        }

        let access = self.lists.access(list_id, user).await?;
        if !access.readable() {
            return Err(Error::forbidden("you are not allowed to view this list"));
        }

        let filter = TaskFilter {
            list_id: Some(list_id),
            exclude_completed: true,
            ..TaskFilter::default()
        };
        let page = self.store.find_tasks_paged(&filter, sort_pagination).await?;
        Ok(page.map(|t| TaskView::from_task(t, None)))
    }

    /// Tasks with the given status. With a user, restricted to tasks
    /// that user created; without, lists all of them.
    pub async fn get_tasks_by_status(
        &self,
        status_id: i32,
        sort_pagination: &SortPagination,
        user: Option<&User>,
    ) -> Result<Page<TaskView>> {
        if status_id <= 0 {
            return Err(Error::invalid_argument("status id must be positive"));
        }

        let filter = TaskFilter {
            status_id: Some(status_id),
            created_by: user.map(|u| u.id),
            ..TaskFilter::default()
        };
        let page = self.store.find_tasks_paged(&filter, sort_pagination).await?;
        Ok(page.map(|t| TaskView::from_task(t, None)))
    }

    /// Tasks carrying the given tag
    pub async fn get_tasks_by_tag(
        &self,
        tag_id: Uuid,
        sort_pagination: &SortPagination,
    ) -> Result<Page<TaskView>> {
        if tag_id.is_nil() {
            return Err(Error::invalid_argument("tag id cannot be empty"));
        }

        let filter = TaskFilter {
            tag_id: Some(tag_id),
            ..TaskFilter::default()
        };
        let page = self.store.find_tasks_paged(&filter, sort_pagination).await?;
        Ok(page.map(|t| TaskView::from_task(t, None)))
    }

    /// The caller's open tasks due today (UTC)
    pub async fn get_today_tasks(
        &self,
        sort_pagination: &SortPagination,
        user: &User,
    ) -> Result<Page<TaskView>> {
        let filter = TaskFilter {
            created_by: Some(user.id),
            exclude_completed: true,
            due_on: Some(Utc::now().date_naive()),
            ..TaskFilter::default()
        };
        let page = self.store.find_tasks_paged(&filter, sort_pagination).await?;
        Ok(page.map(|t| TaskView::from_task(t, None)))
    }

    /// The caller's open tasks due after today (UTC)
    pub async fn get_upcoming_tasks(
        &self,
        sort_pagination: &SortPagination,
        user: &User,
    ) -> Result<Page<TaskView>> {
        let filter = TaskFilter {
            created_by: Some(user.id),
            exclude_completed: true,
            due_after: Some(Utc::now().date_naive()),
            ..TaskFilter::default()
        };
        let page = self.store.find_tasks_paged(&filter, sort_pagination).await?;
        Ok(page.map(|t| TaskView::from_task(t, None)))
    }

    /// The caller's completed tasks
    pub async fn get_completed_tasks(
        &self,
        sort_pagination: &SortPagination,
        user: &User,
    ) -> Result<Page<TaskView>> {
        self.get_tasks_by_status(TaskStatus::Completed.id(), sort_pagination, Some(user))
            .await
    }

    /// Open tasks the caller created, plus open tasks in public lists,
    /// optionally narrowed by a case-sensitive substring search on
    /// title or description.
    pub async fn get_user_tasks(
        &self,
        user: &User,
        search_term: Option<&str>,
    ) -> Result<Vec<TaskView>> {
        let search = search_term
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let own_filter = TaskFilter {
            created_by: Some(user.id),
            exclude_completed: true,
            search: search.clone(),
            ..TaskFilter::default()
        };
        let mut tasks = self.store.find_tasks(&own_filter).await?;

        let public_ids = self.lists.public_list_ids().await?;
        if !public_ids.is_empty() {
            let public_filter = TaskFilter {
                list_ids: Some(public_ids),
                exclude_completed: true,
                search,
                ..TaskFilter::default()
            };
            tasks.extend(self.store.find_tasks(&public_filter).await?);
        }

        // A task the caller created in a public list matches both
        // queries; keep the first occurrence.
        let mut seen = HashSet::new();
        tasks.retain(|t| seen.insert(t.id));

        Ok(tasks
            .into_iter()
            .map(|t| TaskView::from_task(t, None))
            .collect())
    }

    /// Update a task. Creator or assignee only; completed tasks are
    /// immutable.
    pub async fn update_task(&self, input: UpdateTask, user: &User) -> Result<TaskView> {
        if input.id.is_nil() {
            return Err(Error::invalid_argument("task id cannot be empty"));
        }

        let mut task = self
            .store
            .get_task_by_id(input.id)
            .await?
            .ok_or_else(|| Error::not_found(format!("task with id {} not found", input.id)))?;

        if !task.can_mutate(user.id) {
            return Err(Error::forbidden("you are not allowed to update this task"));
        }
        if task.status.is_terminal() {
            return Err(Error::invalid_operation("cannot update a completed task"));
        }

        task.title = input.title;
        task.description = input.description;
        task.due_date = input.due_date;
        task.status = input.status;
        task.list_id = input.list_id;
        task.assigned_to = input.assigned_to;
        task.order = input.order;

        self.store.update_task(&task).await?;
        Ok(TaskView::from_task(task, None))
    }

    /// Delete a task. Creator or assignee only; completed tasks cannot
    /// be deleted.
    pub async fn delete_task(&self, task_id: Uuid, user: &User) -> Result<bool> {
        if task_id.is_nil() {
            return Err(Error::invalid_argument("task id cannot be empty"));
        }

        let task = self
            .store
            .get_task_by_id(task_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("task with id {task_id} not found")))?;

        if !task.can_mutate(user.id) {
            return Err(Error::forbidden("you are not allowed to delete this task"));
        }
        if task.status.is_terminal() {
            return Err(Error::invalid_operation("cannot delete a completed task"));
        }

        self.store.delete_task(task_id).await
    }

    /// Mark a task completed. Creator and assignee always may; anyone
    /// may complete a task in a public list. A second call on the same
    /// task fails InvalidOperation rather than silently succeeding.
    pub async fn complete_task(&self, task_id: Uuid, user: &User) -> Result<TaskView> {
        if task_id.is_nil() {
            return Err(Error::invalid_argument("task id cannot be empty"));
        }

        let mut task = self
            .store
            .get_task_by_id(task_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("task with id {task_id} not found")))?;

        if task.status.is_terminal() {
            return Err(Error::invalid_operation("task is already completed"));
        }

        let access = self.lists.access(task.list_id, user).await?;
        if !task.can_mutate(user.id) && !access.is_public {
            return Err(Error::forbidden(
                "you are not allowed to complete this task",
            ));
        }

        task.status = TaskStatus::Completed;
        self.store.update_task(&task).await?;
        Ok(TaskView::from_task(task, Some(access.name)))
    }
}
