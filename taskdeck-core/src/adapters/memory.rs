//! In-memory store adapter
//!
//! Backs unit tests and examples. Filter semantics are kept in lockstep
//! with the DuckDB adapter, including the foreign-key check on task
//! insertion and the cascade on list deletion.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{Page, SortOrder, SortPagination, Tag, Task, TaskList};
use crate::ports::{ListFilter, ListStore, TaskFilter, TaskStore};

#[derive(Default)]
pub struct MemoryStore {
    lists: RwLock<HashMap<Uuid, TaskList>>,
    tasks: RwLock<HashMap<Uuid, Task>>,
    tags: RwLock<HashMap<Uuid, Tag>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn list_matches(list: &TaskList, filter: &ListFilter) -> bool {
    if let Some(is_public) = filter.is_public {
        if list.is_public != is_public {
            return false;
        }
    }
    if let Some(created_by) = filter.created_by {
        if list.created_by != created_by {
            return false;
        }
    }
    true
}

fn task_matches(task: &Task, filter: &TaskFilter) -> bool {
    if let Some(list_id) = filter.list_id {
        if task.list_id != list_id {
            return false;
        }
    }
    if let Some(list_ids) = &filter.list_ids {
        if !list_ids.contains(&task.list_id) {
            return false;
        }
    }
    if let Some(status_id) = filter.status_id {
        if task.status.id() != status_id {
            return false;
        }
    }
    if filter.exclude_completed && task.status.is_terminal() {
        return false;
    }
    if let Some(created_by) = filter.created_by {
        if task.created_by != created_by {
            return false;
        }
    }
    if let Some(tag_id) = filter.tag_id {
        if !task.tags.iter().any(|t| t.id == tag_id) {
            return false;
        }
    }
    if let Some(due_on) = filter.due_on {
        match task.due_date {
            Some(due) if due.date_naive() == due_on => {}
            _ => return false,
        }
    }
    if let Some(due_after) = filter.due_after {
        match task.due_date {
            Some(due) if due.date_naive() > due_after => {}
            _ => return false,
        }
    }
    if let Some(search) = &filter.search {
        let in_title = task.title.contains(search.as_str());
        let in_description = task
            .description
            .as_deref()
            .is_some_and(|d| d.contains(search.as_str()));
        if !in_title && !in_description {
            return false;
        }
    }
    true
}

fn sort_tasks(tasks: &mut [Task], sort_pagination: &SortPagination) {
    // Stable base order so paging is deterministic
    tasks.sort_by_key(|t| (t.order, t.id));

    let Some(field) = sort_pagination.sort_by.as_deref() else {
        return;
    };
    match field {
        "title" => tasks.sort_by(|a, b| a.title.cmp(&b.title)),
        "dueDate" | "due_date" => tasks.sort_by_key(|t| t.due_date),
        "order" => tasks.sort_by_key(|t| t.order),
        "status" => tasks.sort_by_key(|t| t.status.id()),
        _ => return,
    }
    if sort_pagination.sort_order == SortOrder::Desc {
        tasks.reverse();
    }
}

#[async_trait]
impl ListStore for MemoryStore {
    async fn get_list_by_id(&self, id: Uuid) -> Result<Option<TaskList>> {
        Ok(self.lists.read().unwrap().get(&id).cloned())
    }

    async fn get_all_lists(&self) -> Result<Vec<TaskList>> {
        Ok(self.lists.read().unwrap().values().cloned().collect())
    }

    async fn find_lists(&self, filter: &ListFilter) -> Result<Vec<TaskList>> {
        Ok(self
            .lists
            .read()
            .unwrap()
            .values()
            .filter(|l| list_matches(l, filter))
            .cloned()
            .collect())
    }

    async fn insert_list(&self, list: &TaskList) -> Result<()> {
        self.lists.write().unwrap().insert(list.id, list.clone());
        Ok(())
    }

    async fn update_list(&self, list: &TaskList) -> Result<()> {
        self.lists.write().unwrap().insert(list.id, list.clone());
        Ok(())
    }

    async fn delete_list(&self, id: Uuid) -> Result<bool> {
        let removed = self.lists.write().unwrap().remove(&id).is_some();
        if removed {
            self.tasks.write().unwrap().retain(|_, t| t.list_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn get_task_by_id(&self, id: Uuid) -> Result<Option<Task>> {
        Ok(self.tasks.read().unwrap().get(&id).cloned())
    }

    async fn get_all_tasks(&self) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self.tasks.read().unwrap().values().cloned().collect();
        tasks.sort_by_key(|t| (t.order, t.id));
        Ok(tasks)
    }

    async fn find_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .read()
            .unwrap()
            .values()
            .filter(|t| task_matches(t, filter))
            .cloned()
            .collect();
        tasks.sort_by_key(|t| (t.order, t.id));
        Ok(tasks)
    }

    async fn find_tasks_paged(
        &self,
        filter: &TaskFilter,
        sort_pagination: &SortPagination,
    ) -> Result<Page<Task>> {
        let mut tasks = self.find_tasks(filter).await?;
        sort_tasks(&mut tasks, sort_pagination);

        let total_count = tasks.len();
        let page = sort_pagination.page();
        let items = tasks
            .into_iter()
            .skip((page - 1) * sort_pagination.limit)
            .take(sort_pagination.limit)
            .collect();

        Ok(Page::new(items, total_count, page, sort_pagination.limit))
    }

    async fn insert_task(&self, task: &Task) -> Result<()> {
        if !self.lists.read().unwrap().contains_key(&task.list_id) {
            return Err(Error::database(format!(
                "foreign key violation: list {} does not exist",
                task.list_id
            )));
        }
        self.tasks.write().unwrap().insert(task.id, task.clone());
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> Result<()> {
        self.tasks.write().unwrap().insert(task.id, task.clone());
        Ok(())
    }

    async fn delete_task(&self, id: Uuid) -> Result<bool> {
        Ok(self.tasks.write().unwrap().remove(&id).is_some())
    }

    async fn insert_tag(&self, tag: &Tag) -> Result<()> {
        self.tags.write().unwrap().insert(tag.id, tag.clone());
        Ok(())
    }

    async fn get_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.read().unwrap().values().cloned().collect())
    }

    async fn tag_task(&self, task_id: Uuid, tag_id: Uuid) -> Result<()> {
        let tag = self
            .tags
            .read()
            .unwrap()
            .get(&tag_id)
            .cloned()
            .ok_or_else(|| Error::database(format!("tag {tag_id} does not exist")))?;

        let mut tasks = self.tasks.write().unwrap();
        let task = tasks
            .get_mut(&task_id)
            .ok_or_else(|| Error::database(format!("task {task_id} does not exist")))?;
        if !task.tags.iter().any(|t| t.id == tag_id) {
            task.tags.push(tag);
        }
        Ok(())
    }
}
