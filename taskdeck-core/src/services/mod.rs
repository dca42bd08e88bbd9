pub mod event_log;
pub mod list;
pub mod migration;
pub mod task;

pub use event_log::{EntryPoint, EventLogService, LogEntry, LogEvent};
pub use list::{CreateList, ListService, ListView, UpdateList};
pub use migration::{MigrationResult, MigrationService};
pub use task::{CreateTask, TaskService, TaskView, UpdateTask};
