//! Taskdeck CLI - shared to-do lists in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{list, logs, task};

/// Taskdeck - shared to-do lists in your terminal
#[derive(Parser)]
#[command(name = "td", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage task lists
    List {
        #[command(subcommand)]
        command: list::ListCommands,
    },

    /// Manage tasks
    Task {
        #[command(subcommand)]
        command: task::TaskCommands,
    },

    /// Inspect the local event log
    Logs {
        /// Show only entries with errors
        #[arg(long)]
        errors: bool,
        /// Maximum number of entries
        #[arg(long, default_value_t = 50)]
        limit: usize,
        /// Export the log database to a file
        #[arg(long)]
        export: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::List { command } => list::run(command).await,
        Commands::Task { command } => task::run(command).await,
        Commands::Logs {
            errors,
            limit,
            export,
            json,
        } => logs::run(errors, limit, export, json),
    }
}
