//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod identity;
mod store;
mod visibility;

pub use identity::{BearerIdentity, IdentityResolver, LocalIdentity};
pub use store::{ListFilter, ListStore, TaskFilter, TaskStore};
pub use visibility::{ListAccess, ListVisibility};
