//! Entity store ports - persistence abstraction
//!
//! The original system handed the store arbitrary expression
//! predicates; here each entity gets a filter struct the adapters
//! translate (to SQL, or to in-memory matching).

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::result::Result;
use crate::domain::{Page, SortPagination, Tag, Task, TaskList, UserId};

/// Filter for list queries
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub is_public: Option<bool>,
    pub created_by: Option<UserId>,
}

/// Filter for task queries. All populated fields must match.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub list_id: Option<Uuid>,
    /// Restrict to tasks in any of these lists
    pub list_ids: Option<Vec<Uuid>>,
    pub status_id: Option<i32>,
    pub exclude_completed: bool,
    pub created_by: Option<UserId>,
    pub tag_id: Option<Uuid>,
    /// Due on exactly this UTC date
    pub due_on: Option<NaiveDate>,
    /// Due strictly after this UTC date
    pub due_after: Option<NaiveDate>,
    /// Case-sensitive substring match on title or description
    pub search: Option<String>,
}

/// Persistence port for task lists
#[async_trait]
pub trait ListStore: Send + Sync {
    async fn get_list_by_id(&self, id: Uuid) -> Result<Option<TaskList>>;

    async fn get_all_lists(&self) -> Result<Vec<TaskList>>;

    async fn find_lists(&self, filter: &ListFilter) -> Result<Vec<TaskList>>;

    async fn insert_list(&self, list: &TaskList) -> Result<()>;

    async fn update_list(&self, list: &TaskList) -> Result<()>;

    /// Delete a list; returns false when the id does not exist
    async fn delete_list(&self, id: Uuid) -> Result<bool>;
}

/// Persistence port for tasks and their tag attachments
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn get_task_by_id(&self, id: Uuid) -> Result<Option<Task>>;

    async fn get_all_tasks(&self) -> Result<Vec<Task>>;

    async fn find_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>>;

    /// Filtered find with sorting and paging applied by the store
    async fn find_tasks_paged(
        &self,
        filter: &TaskFilter,
        sort_pagination: &SortPagination,
    ) -> Result<Page<Task>>;

    async fn insert_task(&self, task: &Task) -> Result<()>;

    async fn update_task(&self, task: &Task) -> Result<()>;

    /// Delete a task; returns false when the id does not exist
    async fn delete_task(&self, id: Uuid) -> Result<bool>;

    // === Tags ===

    async fn insert_tag(&self, tag: &Tag) -> Result<()>;

    async fn get_tags(&self) -> Result<Vec<Tag>>;

    /// Attach a tag to a task
    async fn tag_task(&self, task_id: Uuid, tag_id: Uuid) -> Result<()>;
}
