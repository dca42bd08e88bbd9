//! Tag domain model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// A label that can be attached to any number of tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub created_by: UserId,
}

impl Tag {
    pub fn new(id: Uuid, name: impl Into<String>, color: impl Into<String>, created_by: UserId) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            created_by,
        }
    }
}
