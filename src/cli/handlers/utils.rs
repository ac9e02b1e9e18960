use crate::model::{Notification, NotificationType, Task, TaskPriority, TaskStatus};
use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Parse a due date given as RFC 3339 or as local "YYYY-MM-DD[ HH:MM]".
///
/// A bare date means the end of that day.
pub fn parse_due(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        dt
    } else if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        date.and_hms_opt(23, 59, 0)
            .context("Invalid end-of-day time")?
    } else {
        anyhow::bail!(
            "Invalid due date '{}'. Use RFC 3339, YYYY-MM-DD or \"YYYY-MM-DD HH:MM\"",
            input
        );
    };

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("'{}' does not exist in the local time zone", input))
}

/// Read a password line from stdin.
pub fn read_password() -> Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }
    Ok(password)
}

/// Format status with color coding
pub fn format_status(status: TaskStatus) -> colored::ColoredString {
    match status {
        TaskStatus::Pending => "pending".yellow(),
        TaskStatus::Completed => "completed".green(),
    }
}

/// Format priority with color coding
pub fn format_priority(priority: TaskPriority) -> colored::ColoredString {
    match priority {
        TaskPriority::High => "high".red().bold(),
        TaskPriority::Medium => "medium".white(),
        TaskPriority::Low => "low".dimmed(),
    }
}

fn format_kind(kind: NotificationType) -> colored::ColoredString {
    match kind {
        NotificationType::Reminder => "reminder".blue(),
        NotificationType::Overdue => "overdue".red(),
    }
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn print_task(task: &Task) {
    let overdue = !task.is_completed() && task.is_overdue(Utc::now());
    let due = local_time(task.due_date);
    let due = if overdue { due.red() } else { due.dimmed() };
    println!(
        "{} {} [{}] {} {} ({}m)",
        task.id.cyan(),
        format_status(task.status),
        format_priority(task.priority),
        task.title,
        due,
        task.estimated_minutes
    );
}

/// Print a list of tasks (compact format)
pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    for task in tasks {
        print_task(task);
    }
}

pub fn print_notification_list(notifications: &[Notification]) {
    if notifications.is_empty() {
        println!("No notifications.");
        return;
    }
    for n in notifications {
        let marker = if n.read { " ".normal() } else { "*".yellow().bold() };
        println!(
            "{} {} [{}] {} {}",
            marker,
            n.id.cyan(),
            format_kind(n.notification_type),
            n.message,
            local_time(n.created_at).dimmed()
        );
    }
}

pub fn print_unread(count: usize) {
    let label = format!("{} unread", count);
    if count == 0 {
        println!("{}", label.green());
    } else {
        println!("{}", label.yellow().bold());
    }
}
