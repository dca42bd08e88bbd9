//! Task domain model and lifecycle states

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::tag::Tag;
use super::user::UserId;

/// Task lifecycle status.
///
/// `Completed` is terminal: once a task reaches it, no update, delete,
/// or further complete is permitted. Pending and InProgress are freely
/// interchangeable via update, and any state may move directly to
/// Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Numeric id as stored and exposed to callers
    pub fn id(self) -> i32 {
        match self {
            TaskStatus::Pending => 1,
            TaskStatus::InProgress => 2,
            TaskStatus::Completed => 3,
        }
    }

    /// Display name exposed alongside the numeric id
    pub fn name(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(TaskStatus::Pending),
            2 => Some(TaskStatus::InProgress),
            3 => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    /// True for states that permit no further transition
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// A work item belonging to exactly one list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub list_id: Uuid,
    pub created_by: UserId,
    pub assigned_to: UserId,
    pub order: i32,
    pub tags: Vec<Tag>,
}

impl Task {
    /// Create a new task. The creator is the default assignee.
    pub fn new(
        id: Uuid,
        title: impl Into<String>,
        list_id: Uuid,
        created_by: UserId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            due_date: None,
            status: TaskStatus::Pending,
            list_id,
            created_by,
            assigned_to: created_by,
            order: 0,
            tags: Vec::new(),
        }
    }

    /// Whether the given principal may update or delete this task.
    /// Assignee and creator both hold mutation rights.
    pub fn can_mutate(&self, user_id: UserId) -> bool {
        self.assigned_to == user_id || self.created_by == user_id
    }
}
