//! Input validation for payloads sent to the task service.

use crate::error::{Result, TaskoraError};
use crate::model::{NewRecurringTemplate, NewTask, ReminderDefaults};

/// Maximum allowed length for a task or template title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum allowed length for a task description.
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;

/// Maximum allowed length for an entity ID.
pub const MAX_ID_LENGTH: usize = 64;

/// Characters that cannot appear in IDs used as URL path segments.
const FORBIDDEN_ID_CHARS: &[char] = &['/', '\\', '?', '#', '\0'];

/// Validates a title.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(TaskoraError::Validation("Title cannot be empty".to_string()));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(TaskoraError::Validation(format!(
            "Title exceeds maximum length of {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

/// Validates a task description.
pub fn validate_description(description: &str) -> Result<()> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(TaskoraError::Validation(format!(
            "Description exceeds maximum length of {} characters",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(())
}

/// Validates an entity ID before it is placed in a request path.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(TaskoraError::Validation("ID cannot be empty".to_string()));
    }
    if id.len() > MAX_ID_LENGTH {
        return Err(TaskoraError::Validation(format!(
            "ID exceeds maximum length of {} characters",
            MAX_ID_LENGTH
        )));
    }
    if id.contains("..") {
        return Err(TaskoraError::Validation(
            "ID cannot contain '..'".to_string(),
        ));
    }
    for c in FORBIDDEN_ID_CHARS {
        if id.contains(*c) {
            return Err(TaskoraError::Validation(format!("ID cannot contain '{}'", c)));
        }
    }
    Ok(())
}

/// Estimates are whole, positive minutes.
pub fn validate_estimate(minutes: u32) -> Result<()> {
    if minutes == 0 {
        return Err(TaskoraError::Validation(
            "Estimated minutes must be a positive number".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_snooze_minutes(minutes: u32) -> Result<()> {
    if minutes == 0 {
        return Err(TaskoraError::Validation(
            "Snooze duration must be at least one minute".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(TaskoraError::Validation(format!(
            "Invalid email address: {}",
            email
        )));
    }
    Ok(())
}

pub fn validate_new_task(task: &NewTask) -> Result<()> {
    validate_title(&task.title)?;
    if let Some(description) = &task.description {
        validate_description(description)?;
    }
    validate_estimate(task.estimated_minutes)
}

pub fn validate_recurring(template: &NewRecurringTemplate) -> Result<()> {
    validate_title(&template.title)?;
    validate_estimate(template.estimated_minutes)
}

pub fn validate_reminder_defaults(defaults: &ReminderDefaults) -> Result<()> {
    if let Some(p) = defaults
        .default_notify_percentage
        .iter()
        .find(|p| **p == 0 || **p > 100)
    {
        return Err(TaskoraError::Validation(format!(
            "Reminder percentage must be between 1 and 100, got {}",
            p
        )));
    }
    if defaults.default_notify_before_hours.contains(&0) {
        return Err(TaskoraError::Validation(
            "Reminder hours must be positive".to_string(),
        ));
    }
    Ok(())
}
