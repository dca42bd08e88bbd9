//! Task list domain model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// A named collection of tasks with a single owner.
///
/// A public list grants read (and task-completion) rights to all
/// users; write rights over the list itself always stay with the
/// owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskList {
    pub id: Uuid,
    pub name: String,
    pub created_by: UserId,
    pub is_public: bool,
}

impl TaskList {
    pub fn new(id: Uuid, name: impl Into<String>, created_by: UserId, is_public: bool) -> Self {
        Self {
            id,
            name: name.into(),
            created_by,
            is_public,
        }
    }

    /// Whether the given principal may read this list and its tasks
    pub fn visible_to(&self, user_id: UserId) -> bool {
        self.is_public || self.created_by == user_id
    }

    /// Whether the given principal may rename, re-visibility, or
    /// delete this list. Owner only; there is no assignee concept for
    /// lists.
    pub fn owned_by(&self, user_id: UserId) -> bool {
        self.created_by == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_list_visible_to_owner_only() {
        let owner = UserId::new();
        let other = UserId::new();
        let list = TaskList::new(Uuid::new_v4(), "Groceries", owner, false);

        assert!(list.visible_to(owner));
        assert!(!list.visible_to(other));
    }

    #[test]
    fn test_public_list_visible_to_all_but_owned_by_creator() {
        let owner = UserId::new();
        let other = UserId::new();
        let list = TaskList::new(Uuid::new_v4(), "Team board", owner, true);

        assert!(list.visible_to(other));
        assert!(!list.owned_by(other));
        assert!(list.owned_by(owner));
    }
}
