//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod list;
pub mod page;
pub mod result;
mod tag;
mod task;
mod user;

pub use list::TaskList;
pub use page::{Page, SortOrder, SortPagination};
pub use tag::Tag;
pub use task::{Task, TaskStatus};
pub use user::{User, UserId};
