//! Task commands - the task lifecycle from creation to completion

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use comfy_table::Cell;
use uuid::Uuid;

use taskdeck_core::domain::result::Result as CoreResult;
use taskdeck_core::services::{CreateTask, LogEvent, TaskView, UpdateTask};
use taskdeck_core::{Page, SortPagination, TaskStatus};

use super::{get_context, get_logger, log_event, parse_due_date, print_json, resolve_user};
use crate::output;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to a list
    Add {
        /// Task title
        title: String,
        /// List ID
        #[arg(long)]
        list: Uuid,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one task
    Show {
        /// Task ID
        id: Uuid,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List open tasks in a list
    Ls {
        /// List ID
        #[arg(long)]
        list: Uuid,
        /// Page size
        #[arg(long, default_value_t = 10)]
        limit: i64,
        /// Offset into the result set
        #[arg(long, default_value_t = 0)]
        offset: i64,
        /// Sort column (title, dueDate, order, status)
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit a task
    Edit {
        /// Task ID
        id: Uuid,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,
        /// New status id (1 = Pending, 2 = In Progress)
        #[arg(long)]
        status: Option<i32>,
        /// Reassign to this user ID
        #[arg(long)]
        assign: Option<Uuid>,
        /// Manual sort position
        #[arg(long)]
        order: Option<i32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a task completed
    Done {
        /// Task ID
        id: Uuid,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a task
    Rm {
        /// Task ID
        id: Uuid,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Your open tasks due today
    Today {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Your open tasks due after today
    Upcoming {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Your completed tasks
    Completed {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search your tasks and public tasks by title or description
    Search {
        /// Substring to search for (case-sensitive)
        term: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: TaskCommands) -> Result<()> {
    let ctx = get_context()?;
    let user = resolve_user(&ctx)?;
    let logger = get_logger();

    match command {
        TaskCommands::Add {
            title,
            list,
            description,
            due,
            json,
        } => {
            let due_date = due.as_deref().map(parse_due_date).transpose()?;
            let result = ctx
                .task_service
                .create_task(
                    CreateTask {
                        title,
                        description,
                        due_date,
                        status: TaskStatus::Pending,
                        list_id: list,
                    },
                    &user,
                )
                .await;

            if let Ok(task) = &result {
                log_event(
                    &logger,
                    LogEvent::new("task_created")
                        .with_task(task.id)
                        .with_list(list)
                        .with_actor(user.id),
                );
            }

            if json {
                return print_json(result);
            }

            let task = result?;
            output::success(&format!("Created task '{}'", task.title));
            println!("  id: {}", task.id);
            Ok(())
        }

        TaskCommands::Show { id, json } => {
            let result = ctx.task_service.get_task_by_id(id, &user).await;

            if json {
                return print_json(result);
            }

            let task = result?;
            println!("{}", task.title.bold());
            println!("  id: {}", task.id);
            println!("  status: {}", output::colorize_status(task.status));
            if let Some(list_name) = &task.list_name {
                println!("  list: {} ({})", list_name, task.list_id);
            }
            if let Some(description) = &task.description {
                println!("  description: {}", description);
            }
            if let Some(due) = task.due_date {
                println!("  due: {}", due.format("%Y-%m-%d %H:%M UTC"));
            }
            println!("  created by: {}", task.created_by);
            println!("  assigned to: {}", task.assigned_to);
            if !task.tags.is_empty() {
                let names: Vec<&str> = task.tags.iter().map(|t| t.name.as_str()).collect();
                println!("  tags: {}", names.join(", "));
            }
            Ok(())
        }

        TaskCommands::Ls {
            list,
            limit,
            offset,
            sort,
            desc,
            json,
        } => {
            let sp = SortPagination::new(
                limit,
                offset,
                sort.as_deref(),
                if desc { "desc" } else { "asc" },
            );
            let result = ctx.task_service.get_tasks_by_list_id(list, &sp, &user).await;

            if json {
                return print_json(result);
            }

            print_task_page(result?);
            Ok(())
        }

        TaskCommands::Edit {
            id,
            title,
            description,
            due,
            status,
            assign,
            order,
            json,
        } => {
            // Read-modify-write: unspecified fields keep their value
            let current = ctx.task_service.get_task_by_id(id, &user).await?;

            let new_status = match status {
                Some(s) => TaskStatus::from_id(s)
                    .ok_or_else(|| anyhow::anyhow!("Unknown status id: {}", s))?,
                None => TaskStatus::from_id(current.status_id).unwrap_or_default(),
            };
            let due_date = match due.as_deref() {
                Some(s) => Some(parse_due_date(s)?),
                None => current.due_date,
            };

            let input = UpdateTask {
                id,
                title: title.unwrap_or(current.title),
                description: description.or(current.description),
                due_date,
                status: new_status,
                list_id: current.list_id,
                assigned_to: assign.map(Into::into).unwrap_or(current.assigned_to),
                order: order.unwrap_or(current.order),
            };
            let result = ctx.task_service.update_task(input, &user).await;

            if result.is_ok() {
                log_event(
                    &logger,
                    LogEvent::new("task_updated").with_task(id).with_actor(user.id),
                );
            }

            if json {
                return print_json(result);
            }

            let task = result?;
            output::success(&format!("Updated task '{}'", task.title));
            Ok(())
        }

        TaskCommands::Done { id, json } => {
            let result = ctx.task_service.complete_task(id, &user).await;

            match &result {
                Ok(task) => log_event(
                    &logger,
                    LogEvent::new("task_completed")
                        .with_task(task.id)
                        .with_actor(user.id),
                ),
                Err(e) => log_event(
                    &logger,
                    LogEvent::new("task_complete_failed")
                        .with_task(id)
                        .with_actor(user.id)
                        .with_error(e.to_string()),
                ),
            }

            if json {
                return print_json(result);
            }

            let task = result?;
            output::success(&format!("Completed '{}'", task.title));
            Ok(())
        }

        TaskCommands::Rm { id, json } => {
            let result = ctx.task_service.delete_task(id, &user).await;

            if result.is_ok() {
                log_event(
                    &logger,
                    LogEvent::new("task_deleted").with_task(id).with_actor(user.id),
                );
            }

            if json {
                return print_json(result);
            }

            result?;
            output::success("Task deleted");
            Ok(())
        }

        TaskCommands::Today { json } => {
            let result = ctx
                .task_service
                .get_today_tasks(&SortPagination::default(), &user)
                .await;
            finish_page(result, json, "Nothing due today")
        }

        TaskCommands::Upcoming { json } => {
            let result = ctx
                .task_service
                .get_upcoming_tasks(&SortPagination::default(), &user)
                .await;
            finish_page(result, json, "Nothing coming up")
        }

        TaskCommands::Completed { json } => {
            let result = ctx
                .task_service
                .get_completed_tasks(&SortPagination::default(), &user)
                .await;
            finish_page(result, json, "No completed tasks")
        }

        TaskCommands::Search { term, json } => {
            let result = ctx.task_service.get_user_tasks(&user, term.as_deref()).await;

            if json {
                return print_json(result);
            }

            let tasks = result?;
            if tasks.is_empty() {
                output::info("No matching tasks");
                return Ok(());
            }
            print_task_table(&tasks);
            Ok(())
        }
    }
}

fn finish_page(result: CoreResult<Page<TaskView>>, json: bool, empty_msg: &str) -> Result<()> {
    if json {
        return print_json(result);
    }

    let page = result?;
    if page.items.is_empty() {
        output::info(empty_msg);
        return Ok(());
    }
    print_task_page(page);
    Ok(())
}

fn print_task_page(page: Page<TaskView>) {
    print_task_table(&page.items);
    if page.total_pages() > 1 {
        println!(
            "Page {} of {} ({} tasks)",
            page.current_page,
            page.total_pages(),
            page.total_count
        );
    }
}

fn print_task_table(tasks: &[TaskView]) {
    let mut table = output::create_table();
    table.set_header(vec!["ID", "Title", "Status", "Due", "List"]);
    for task in tasks {
        table.add_row(vec![
            Cell::new(task.id),
            Cell::new(&task.title),
            Cell::new(output::colorize_status(task.status)),
            Cell::new(
                task.due_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
            Cell::new(task.list_id),
        ]);
    }
    println!("{table}");
}
