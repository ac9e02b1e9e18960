use crate::board::TaskBoard;
use crate::cli::commands::{RecurrenceArg, TaskPriorityArg, TaskViewArg};
use crate::model::{NewRecurringTemplate, NewTask, TaskView};
use anyhow::Result;
use colored::Colorize;
use std::rc::Rc;

use super::CommandContext;
use super::utils::{format_status, parse_due, print_task, print_task_list};

/// Parameters for task creation
pub struct AddParams {
    pub title: String,
    pub due: String,
    pub estimate: u32,
    pub priority: TaskPriorityArg,
    pub description: Option<String>,
    pub json: bool,
}

pub async fn handle_tasks(ctx: &CommandContext, view: TaskViewArg, json: bool) -> Result<()> {
    ctx.require_session()?;
    let board = TaskBoard::new(Rc::clone(&ctx.api));
    let view: TaskView = view.into();
    board.load(view).await?;

    // The priority endpoint already orders; keep the local sort as the tiebreak.
    let tasks = match view {
        TaskView::Priority => board.priority_sorted(),
        _ => board.tasks(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        print_task_list(&tasks);
    }
    Ok(())
}

pub async fn handle_add(ctx: &CommandContext, params: AddParams) -> Result<()> {
    let task = NewTask {
        title: params.title,
        description: params.description,
        due_date: parse_due(&params.due)?,
        estimated_minutes: params.estimate,
        priority: params.priority.into(),
    };
    crate::validation::validate_new_task(&task)?;
    ctx.require_session()?;

    let board = TaskBoard::new(Rc::clone(&ctx.api));
    let created = board.create(task).await?;

    if params.json {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else {
        print!("{} ", "Created".green());
        print_task(&created);
    }
    Ok(())
}

pub async fn handle_toggle(ctx: &CommandContext, id: String) -> Result<()> {
    crate::validation::validate_id(&id)?;
    ctx.require_session()?;
    let board = TaskBoard::new(Rc::clone(&ctx.api));
    board.refresh().await?;

    match board.toggle_complete(&id).await? {
        Some(task) => println!(
            "{} {} is now {}",
            "Updated".green(),
            task.id.cyan(),
            format_status(task.status)
        ),
        None => println!("{} {}", "No such task:".yellow(), id),
    }
    Ok(())
}

pub async fn handle_delete(ctx: &CommandContext, id: String) -> Result<()> {
    crate::validation::validate_id(&id)?;
    ctx.require_session()?;
    let board = TaskBoard::new(Rc::clone(&ctx.api));
    board.refresh().await?;

    if board.delete(&id).await? {
        println!("{} {}", "Deleted".red(), id.cyan());
    } else {
        println!("{} {}", "No such task:".yellow(), id);
    }
    Ok(())
}

pub async fn handle_recurring(
    ctx: &CommandContext,
    title: String,
    estimate: u32,
    every: RecurrenceArg,
) -> Result<()> {
    let template = NewRecurringTemplate {
        title,
        estimated_minutes: estimate,
        recurrence_type: every.into(),
    };
    crate::validation::validate_recurring(&template)?;
    ctx.require_session()?;

    let board = TaskBoard::new(Rc::clone(&ctx.api));
    let created = board.create_recurring(template).await?;
    println!(
        "{} {} ({}, {}m)",
        "Created recurring".green(),
        created.title,
        created.recurrence_type.to_string().blue(),
        created.estimated_minutes
    );
    Ok(())
}
