//! Task management and month calendar command handlers

use crate::api::{Task, TaskDraft, TaskQuery};
use crate::calendar::{month_grid, tasks_on};
use crate::chat::classifier::month_from_name;
use crate::cli::TaskCommand;
use crate::config::Config;
use crate::error::{Result, TaskmateError};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use colored::Colorize;
use prettytable::{format, row, Table};

use super::build_client;

const DUE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// Enough to cover six weeks of a busy calendar in one request
const CALENDAR_PAGE_SIZE: u32 = 500;

/// Handle task commands
pub async fn handle_tasks(config: &Config, command: TaskCommand) -> Result<()> {
    let client = build_client(config)?;

    match command {
        TaskCommand::List {
            page,
            size,
            sort_by,
            sort_dir,
            status,
            priority,
            from,
            to,
            json,
        } => {
            let query = TaskQuery {
                page,
                size,
                sort_by,
                sort_dir,
                status,
                priority,
                from_date_time: from.as_deref().map(parse_due_date).transpose()?,
                to_date_time: to.as_deref().map(parse_due_date).transpose()?,
            };
            let result = client.list_tasks(&query).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }

            if result.content.is_empty() {
                println!("{}", "No tasks found.".yellow());
                return Ok(());
            }

            print_task_table(&result.content);
            println!(
                "Page {} of {} ({} tasks)\n",
                result.current_page + 1,
                result.total_pages.max(1),
                result.total_elements
            );
        }
        TaskCommand::Show { id } => {
            let task = client.get_task(&id).await?;
            print_task_details(&task);
        }
        TaskCommand::Create {
            title,
            description,
            status,
            priority,
            due,
        } => {
            if title.trim().is_empty() {
                return Err(TaskmateError::Validation("Title is required".to_string()).into());
            }
            let draft = TaskDraft {
                title,
                description,
                status,
                priority,
                due_date: parse_due_date(&due)?,
            };
            let task = client.create_task(&draft).await?;
            println!("{} {}", "Created task".green(), task.id.cyan());
        }
        TaskCommand::Update {
            id,
            title,
            description,
            status,
            priority,
            due,
        } => {
            let existing = client.get_task(&id).await?;
            let mut draft = TaskDraft::from(&existing);
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(status) = status {
                draft.status = status;
            }
            if let Some(priority) = priority {
                draft.priority = priority;
            }
            if let Some(due) = due {
                draft.due_date = parse_due_date(&due)?;
            }
            let task = client.update_task(&id, &draft).await?;
            println!("{} {}", "Updated task".green(), task.id.cyan());
        }
        TaskCommand::Delete { id } => {
            let ack = client.delete_task(&id).await?;
            if ack.message.is_empty() {
                println!("{} {}", "Deleted task".green(), id.cyan());
            } else {
                println!("{}", ack.message.green());
            }
        }
        TaskCommand::Calendar { month, year, day } => {
            let today = Local::now().date_naive();
            let month = match month {
                Some(name) => month_from_name(&name).ok_or_else(|| {
                    TaskmateError::Validation(format!("Unknown month: {}", name))
                })?,
                None => today.month(),
            };
            let year = year.unwrap_or_else(|| today.year());
            let selected = day.as_deref().map(parse_day).transpose()?;

            // Bounds come from an empty grid so the query matches its six weeks
            let (first, last) = grid_bounds(year, month, today)?;
            let query = TaskQuery {
                size: Some(CALENDAR_PAGE_SIZE),
                from_date_time: Some(format!("{}T00:00:00", first.format("%Y-%m-%d"))),
                to_date_time: Some(format!("{}T23:59:59", last.format("%Y-%m-%d"))),
                ..TaskQuery::default()
            };
            let tasks = client.list_tasks(&query).await?.content;

            let grid = month_grid(year, month, &tasks, today)?;
            println!();
            print!("{}", grid.paint());
            println!("{} task(s) due this month\n", grid.tasks_in_month());

            if let Some(date) = selected {
                let due = tasks_on(&tasks, date);
                println!("{}", date.format("%A, %B %-d, %Y").to_string().bold());
                if due.is_empty() {
                    println!("{}", "No tasks due.".yellow());
                } else {
                    let owned: Vec<Task> = due.into_iter().cloned().collect();
                    print_task_table(&owned);
                }
            }
        }
    }

    Ok(())
}

fn grid_bounds(year: i32, month: u32, today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let grid = month_grid(year, month, &[], today)?;
    match (grid.days.first(), grid.days.last()) {
        (Some(first), Some(last)) => Ok((first.date, last.date)),
        _ => Err(TaskmateError::Validation("Empty calendar grid".to_string()).into()),
    }
}

fn parse_day(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        TaskmateError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", input)).into()
    })
}

/// Normalize a user supplied due date to `YYYY-MM-DDTHH:MM:SS`
///
/// Accepts a bare date (midnight), or a date-time with or without seconds.
pub fn parse_due_date(input: &str) -> Result<String> {
    let input = input.trim();
    for pattern in [DUE_FORMAT, "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, pattern) {
            return Ok(parsed.format(DUE_FORMAT).to_string());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(format!("{}T00:00:00", date.format("%Y-%m-%d")));
    }
    Err(TaskmateError::Validation(format!(
        "Invalid due date '{}', expected YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS]",
        input
    ))
    .into())
}

fn print_task_table(tasks: &[Task]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row![
        "ID".bold(),
        "Title".bold(),
        "Status".bold(),
        "Priority".bold(),
        "Due".bold()
    ]);

    for task in tasks {
        let title = if task.title.chars().count() > 40 {
            format!("{}...", task.title.chars().take(37).collect::<String>())
        } else {
            task.title.clone()
        };
        table.add_row(row![
            task.id.cyan(),
            title,
            task.status,
            task.priority,
            task.due_date.replace('T', " ")
        ]);
    }

    println!();
    table.printstd();
    println!();
}

fn print_task_details(task: &Task) {
    println!("\n{} {}", task.title.bold(), format!("#{}", task.id).dimmed());
    println!("  Status:   {}", task.status);
    println!("  Priority: {}", task.priority);
    println!("  Due:      {}", task.due_date.replace('T', " "));
    if !task.description.is_empty() {
        println!("\n  {}", task.description);
    }
    if !task.updated_at.is_empty() {
        println!("\n  {}", format!("updated {}", task.updated_at).dimmed());
    }
    println!();
}
