//! Taskdeck Core - Business logic for shared to-do lists
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (TaskList, Task, Tag, User)
//! - **ports**: Trait definitions for external dependencies (stores, identity)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (DuckDB, in-memory)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::duckdb::DuckDbStore;
use config::Config;
use ports::IdentityResolver;
use services::{ListService, TaskService};

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{
    Page, SortOrder, SortPagination, Tag, Task, TaskList, TaskStatus, User, UserId,
};

/// Main context for Taskdeck operations
///
/// This is the primary entry point for all business logic. It holds
/// the database connection, configuration, and all services.
pub struct TaskdeckContext {
    pub config: Config,
    pub store: Arc<DuckDbStore>,
    pub identity: Box<dyn IdentityResolver>,
    pub list_service: Arc<ListService>,
    pub task_service: TaskService,
}

impl TaskdeckContext {
    /// Create a new Taskdeck context
    pub fn new(taskdeck_dir: &Path) -> Result<Self> {
        let config = Config::load(taskdeck_dir)?;

        let db_path = taskdeck_dir.join("taskdeck.duckdb");
        let store = Arc::new(DuckDbStore::new(&db_path)?);

        // Initialize schema
        store.ensure_schema()?;

        let identity = config.identity_resolver();

        let list_service = Arc::new(ListService::new(
            Arc::clone(&store) as Arc<dyn ports::ListStore>,
            Arc::clone(&store) as Arc<dyn ports::TaskStore>,
        ));
        let task_service = TaskService::new(
            Arc::clone(&store) as Arc<dyn ports::TaskStore>,
            Arc::clone(&list_service) as Arc<dyn ports::ListVisibility>,
        );

        Ok(Self {
            config,
            store,
            identity,
            list_service,
            task_service,
        })
    }

    /// Resolve the acting user from an optional credential using the
    /// configured identity strategy.
    pub fn resolve_user(&self, credential: Option<&str>) -> domain::result::Result<User> {
        self.identity.resolve(credential)
    }
}
