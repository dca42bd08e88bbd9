//! CLI command implementations

pub mod list;
pub mod logs;
pub mod task;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};

use taskdeck_core::services::{EntryPoint, EventLogService, LogEvent};
use taskdeck_core::{OperationResult, TaskdeckContext, User};

/// Get the event log service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<EventLogService> {
    let taskdeck_dir = get_taskdeck_dir();
    std::fs::create_dir_all(&taskdeck_dir).ok()?;
    EventLogService::new(&taskdeck_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<EventLogService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the taskdeck directory from environment or default
pub fn get_taskdeck_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TASKDECK_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".taskdeck")
    }
}

/// Get or create the taskdeck context
pub fn get_context() -> Result<TaskdeckContext> {
    let taskdeck_dir = get_taskdeck_dir();

    std::fs::create_dir_all(&taskdeck_dir)
        .with_context(|| format!("Failed to create taskdeck directory: {:?}", taskdeck_dir))?;

    TaskdeckContext::new(&taskdeck_dir).context("Failed to initialize taskdeck context")
}

/// Resolve the acting user through the configured identity strategy.
/// In bearer mode the credential comes from TASKDECK_TOKEN.
pub fn resolve_user(ctx: &TaskdeckContext) -> Result<User> {
    let token = std::env::var("TASKDECK_TOKEN").ok();
    let user = ctx.resolve_user(token.as_deref())?;
    Ok(user)
}

/// Parse a due date argument: either a plain date (interpreted as
/// midnight UTC) or a full RFC 3339 timestamp.
pub fn parse_due_date(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {} (expected YYYY-MM-DD or RFC 3339)", s))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .context("Invalid date")?
        .and_utc();
    Ok(midnight)
}

/// Print an operation result as JSON. Failures exit with code 1 after
/// printing, matching the human-readable error path.
pub fn print_json<T: serde::Serialize>(
    result: taskdeck_core::domain::result::Result<T>,
) -> Result<()> {
    let op = OperationResult::from(result);
    println!("{}", serde_json::to_string_pretty(&op)?);
    if !op.success {
        std::process::exit(1);
    }
    Ok(())
}
