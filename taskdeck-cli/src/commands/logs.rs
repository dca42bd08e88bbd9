//! Logs command - inspect the local event log

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use comfy_table::Cell;

use super::get_logger;
use crate::output;

pub fn run(errors_only: bool, limit: usize, export: Option<PathBuf>, json: bool) -> Result<()> {
    let logger = get_logger().context("Failed to open event log")?;

    if let Some(path) = export {
        let written = logger.export(&path)?;
        output::success(&format!("Exported event log to {}", written.display()));
        return Ok(());
    }

    let entries = if errors_only {
        logger.get_errors(limit)?
    } else {
        logger.get_recent(limit)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        output::info("No log entries");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Time", "Event", "Task", "List", "Error"]);
    for entry in &entries {
        let time = Utc
            .timestamp_millis_opt(entry.timestamp)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| entry.timestamp.to_string());
        table.add_row(vec![
            Cell::new(time),
            Cell::new(&entry.event),
            Cell::new(entry.task_id.as_deref().unwrap_or("")),
            Cell::new(entry.list_id.as_deref().unwrap_or("")),
            Cell::new(entry.error_message.as_deref().unwrap_or("")),
        ]);
    }
    println!("{table}");
    println!("{} entries", logger.count()?);

    Ok(())
}
