//! Data models for taskora.
//!
//! This module defines the entities held in the local cache and the payloads
//! exchanged with the task service:
//!
//! - [`Task`]: A schedulable unit of work with a binary status
//! - [`Notification`]: A reminder or overdue alert with a mutable `read` flag
//! - [`NewRecurringTemplate`]: Write-only recurrence template
//! - [`ReminderDefaults`], [`LoginGrant`], [`TelegramLink`]: account-level payloads

mod account;
mod notification;
mod recurring;
mod task;
mod types;

pub use account::{LoginGrant, ReminderDefaults, TelegramLink};
pub use notification::{Notification, NotificationPage};
pub use recurring::{NewRecurringTemplate, RecurringTemplate};
pub use task::{NewTask, Task, TaskPatch, sort_by_priority};
pub use types::{NotificationType, RecurrenceType, TaskPriority, TaskStatus, TaskView};

/// Anything the [`EntityStore`](crate::store::EntityStore) can hold.
///
/// Entities are plain value snapshots; equality is field-wise so a rolled-back
/// snapshot can be compared against the one captured before the mutation.
pub trait Entity: Clone + PartialEq + std::fmt::Debug + 'static {
    fn id(&self) -> &str;
}

impl Entity for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Notification {
    fn id(&self) -> &str {
        &self.id
    }
}
