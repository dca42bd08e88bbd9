//! List service - list CRUD and the visibility source of truth

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{TaskList, User, UserId};
use crate::ports::{ListAccess, ListFilter, ListStore, ListVisibility, TaskFilter, TaskStore};
use crate::services::task::TaskView;

/// Input for creating a list
#[derive(Debug, Clone, Deserialize)]
pub struct CreateList {
    pub name: String,
    #[serde(default)]
    pub is_public: bool,
}

/// Input for updating a list. Only name and visibility are mutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateList {
    pub id: Uuid,
    pub name: String,
    pub is_public: bool,
}

/// Read-only list projection
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub id: Uuid,
    pub name: String,
    pub created_by: UserId,
    pub is_public: bool,
    pub tasks: Vec<TaskView>,
}

impl ListView {
    fn from_list(list: TaskList, tasks: Vec<TaskView>) -> Self {
        Self {
            id: list.id,
            name: list.name,
            created_by: list.created_by,
            is_public: list.is_public,
            tasks,
        }
    }
}

/// List service. Also implements [`ListVisibility`], which the task
/// service depends on for cross-entity checks.
pub struct ListService {
    store: Arc<dyn ListStore>,
    tasks: Arc<dyn TaskStore>,
}

impl ListService {
    pub fn new(store: Arc<dyn ListStore>, tasks: Arc<dyn TaskStore>) -> Self {
        Self { store, tasks }
    }

    /// Create a list owned by the caller. Any authenticated caller may
    /// create lists; no further authorization applies.
    pub async fn create_list(&self, input: CreateList, user: &User) -> Result<ListView> {
        let list = TaskList::new(Uuid::new_v4(), input.name, user.id, input.is_public);
        self.store.insert_list(&list).await?;
        Ok(ListView::from_list(list, Vec::new()))
    }

    /// Fetch one list with its task collection. Private lists are
    /// visible to their owner only.
    pub async fn get_list_by_id(&self, list_id: Uuid, user: &User) -> Result<ListView> {
        if list_id.is_nil() {
            return Err(Error::invalid_argument("list id cannot be empty"));
        }

        let list = self
            .store
            .get_list_by_id(list_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("list with id {list_id} not found")))?;

        if !list.visible_to(user.id) {
            return Err(Error::forbidden("you are not allowed to view this list"));
        }

        let tasks = self.tasks_of(list_id).await?;
        Ok(ListView::from_list(list, tasks))
    }

    /// Unrestricted listing. No ownership filter is applied; callers
    /// must treat this as a privileged surface.
    pub async fn get_all_lists(&self) -> Result<Vec<ListView>> {
        let lists = self.store.get_all_lists().await?;
        Ok(lists
            .into_iter()
            .map(|l| ListView::from_list(l, Vec::new()))
            .collect())
    }

    /// All public lists
    pub async fn get_public_lists(&self) -> Result<Vec<ListView>> {
        let filter = ListFilter {
            is_public: Some(true),
            ..ListFilter::default()
        };
        let lists = self.store.find_lists(&filter).await?;
        Ok(lists
            .into_iter()
            .map(|l| ListView::from_list(l, Vec::new()))
            .collect())
    }

    /// Lists created by the given user
    pub async fn get_user_lists(&self, owner: UserId) -> Result<Vec<ListView>> {
        if owner.is_nil() {
            return Err(Error::invalid_argument("user id cannot be empty"));
        }

        let filter = ListFilter {
            created_by: Some(owner),
            ..ListFilter::default()
        };
        let lists = self.store.find_lists(&filter).await?;
        Ok(lists
            .into_iter()
            .map(|l| ListView::from_list(l, Vec::new()))
            .collect())
    }

    /// Rename a list or change its visibility. Owner only; id and
    /// creator are immutable.
    pub async fn update_list(&self, input: UpdateList, user: &User) -> Result<ListView> {
        let mut list = self
            .store
            .get_list_by_id(input.id)
            .await?
            .ok_or_else(|| Error::not_found(format!("list with id {} not found", input.id)))?;

        if !list.owned_by(user.id) {
            return Err(Error::forbidden("you are not allowed to update this list"));
        }

        list.name = input.name;
        list.is_public = input.is_public;
        self.store.update_list(&list).await?;

        Ok(ListView::from_list(list, Vec::new()))
    }

    /// Delete a list. Owner only.
    pub async fn delete_list(&self, list_id: Uuid, user: &User) -> Result<bool> {
        if list_id.is_nil() {
            return Err(Error::invalid_argument("list id cannot be empty"));
        }

        let list = self
            .store
            .get_list_by_id(list_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("list with id {list_id} not found")))?;

        if !list.owned_by(user.id) {
            return Err(Error::forbidden("you are not allowed to delete this list"));
        }

        self.store.delete_list(list_id).await
    }

    async fn tasks_of(&self, list_id: Uuid) -> Result<Vec<TaskView>> {
        let filter = TaskFilter {
            list_id: Some(list_id),
            ..TaskFilter::default()
        };
        let tasks = self.tasks.find_tasks(&filter).await?;
        Ok(tasks
            .into_iter()
            .map(|t| TaskView::from_task(t, None))
            .collect())
    }
}

#[async_trait]
impl ListVisibility for ListService {
    async fn access(&self, list_id: Uuid, user: &User) -> Result<ListAccess> {
        let list = self
            .store
            .get_list_by_id(list_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("list with id {list_id} not found")))?;

        Ok(ListAccess {
            name: list.name.clone(),
            is_public: list.is_public,
            owned: list.owned_by(user.id),
        })
    }

    async fn public_list_ids(&self) -> Result<Vec<Uuid>> {
        let filter = ListFilter {
            is_public: Some(true),
            ..ListFilter::default()
        };
        let lists = self.store.find_lists(&filter).await?;
        Ok(lists.into_iter().map(|l| l.id).collect())
    }
}
