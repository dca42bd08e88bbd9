//! List visibility capability
//!
//! The task component must not re-derive list visibility from raw list
//! rows; it depends on this narrow read-only capability instead, so
//! the visibility rule has a single source of truth (the list
//! component implements this trait).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::result::Result;
use crate::domain::User;

/// What a given user may do with a given list
#[derive(Debug, Clone)]
pub struct ListAccess {
    /// List name, for read-only projections
    pub name: String,
    pub is_public: bool,
    /// True when the user is the list owner
    pub owned: bool,
}

impl ListAccess {
    /// Read rights: public, or owned by the caller
    pub fn readable(&self) -> bool {
        self.is_public || self.owned
    }
}

#[async_trait]
pub trait ListVisibility: Send + Sync {
    /// Resolve access rights for one list. Fails NotFound when the
    /// list does not exist.
    async fn access(&self, list_id: Uuid, user: &User) -> Result<ListAccess>;

    /// Ids of all public lists
    async fn public_list_ids(&self) -> Result<Vec<Uuid>>;
}
