//! List commands - create, inspect, and manage task lists

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use comfy_table::Cell;
use uuid::Uuid;

use taskdeck_core::services::{CreateList, LogEvent, UpdateList};

use super::{get_context, get_logger, log_event, print_json, resolve_user};
use crate::output;

#[derive(Subcommand)]
pub enum ListCommands {
    /// Create a new list
    New {
        /// List name
        name: String,
        /// Make the list visible to everyone
        #[arg(long)]
        public: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one list with its tasks
    Show {
        /// List ID
        id: Uuid,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List your lists
    Ls {
        /// Show all public lists instead of your own
        #[arg(long)]
        public: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename a list or change its visibility
    Edit {
        /// List ID
        id: Uuid,
        /// New name
        name: String,
        /// Make the list public (omit for private)
        #[arg(long)]
        public: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a list and its tasks
    Rm {
        /// List ID
        id: Uuid,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: ListCommands) -> Result<()> {
    let ctx = get_context()?;
    let user = resolve_user(&ctx)?;
    let logger = get_logger();

    match command {
        ListCommands::New { name, public, json } => {
            let result = ctx
                .list_service
                .create_list(
                    CreateList {
                        name,
                        is_public: public,
                    },
                    &user,
                )
                .await;

            if let Ok(list) = &result {
                log_event(
                    &logger,
                    LogEvent::new("list_created")
                        .with_list(list.id)
                        .with_actor(user.id),
                );
            }

            if json {
                return print_json(result);
            }

            let list = result?;
            output::success(&format!("Created list '{}'", list.name));
            println!("  id: {}", list.id);
            println!("  visibility: {}", visibility(list.is_public));
            Ok(())
        }

        ListCommands::Show { id, json } => {
            let result = ctx.list_service.get_list_by_id(id, &user).await;

            if json {
                return print_json(result);
            }

            let list = result?;
            println!("{} ({})", list.name.bold(), visibility(list.is_public));
            println!("  id: {}", list.id);
            println!("  owner: {}", list.created_by);
            println!();

            if list.tasks.is_empty() {
                output::info("No tasks");
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["ID", "Title", "Status", "Due"]);
            for task in &list.tasks {
                table.add_row(vec![
                    Cell::new(task.id),
                    Cell::new(&task.title),
                    Cell::new(output::colorize_status(task.status)),
                    Cell::new(
                        task.due_date
                            .map(|d| d.format("%Y-%m-%d").to_string())
                            .unwrap_or_default(),
                    ),
                ]);
            }
            println!("{table}");
            Ok(())
        }

        ListCommands::Ls { public, json } => {
            let result = if public {
                ctx.list_service.get_public_lists().await
            } else {
                ctx.list_service.get_user_lists(user.id).await
            };

            if json {
                return print_json(result);
            }

            let lists = result?;
            if lists.is_empty() {
                output::info("No lists");
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["ID", "Name", "Visibility"]);
            for list in &lists {
                table.add_row(vec![
                    Cell::new(list.id),
                    Cell::new(&list.name),
                    Cell::new(visibility(list.is_public)),
                ]);
            }
            println!("{table}");
            Ok(())
        }

        ListCommands::Edit {
            id,
            name,
            public,
            json,
        } => {
            let result = ctx
                .list_service
                .update_list(
                    UpdateList {
                        id,
                        name,
                        is_public: public,
                    },
                    &user,
                )
                .await;

            if result.is_ok() {
                log_event(
                    &logger,
                    LogEvent::new("list_updated").with_list(id).with_actor(user.id),
                );
            }

            if json {
                return print_json(result);
            }

            let list = result?;
            output::success(&format!(
                "Updated list '{}' ({})",
                list.name,
                visibility(list.is_public)
            ));
            Ok(())
        }

        ListCommands::Rm { id, json } => {
            let result = ctx.list_service.delete_list(id, &user).await;

            if result.is_ok() {
                log_event(
                    &logger,
                    LogEvent::new("list_deleted").with_list(id).with_actor(user.id),
                );
            }

            if json {
                return print_json(result);
            }

            result?;
            output::success("List deleted");
            Ok(())
        }
    }
}

fn visibility(is_public: bool) -> &'static str {
    if is_public {
        "public"
    } else {
        "private"
    }
}
