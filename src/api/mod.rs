//! Remote task service contract.
//!
//! [`RemoteApi`] is the seam between the sync engine and the network. The
//! production implementation is [`HttpApi`]; tests substitute in-process fakes.
//! Futures are not `Send`: the client runs on a single-threaded runtime.

mod http;

pub use http::HttpApi;

use crate::error::Result;
use crate::model::{
    LoginGrant, NewRecurringTemplate, NewTask, NotificationPage, RecurringTemplate,
    ReminderDefaults, Task, TaskPatch, TaskView,
};
use async_trait::async_trait;
use serde::Deserialize;

/// `{ "data": ... }` wrapper used by most endpoints.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[async_trait(?Send)]
pub trait RemoteApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginGrant>;

    async fn list_tasks(&self, view: TaskView) -> Result<Vec<Task>>;
    async fn create_task(&self, task: &NewTask) -> Result<Task>;
    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task>;
    async fn delete_task(&self, id: &str) -> Result<()>;

    async fn create_recurring(&self, template: &NewRecurringTemplate) -> Result<RecurringTemplate>;

    async fn list_notifications(&self) -> Result<NotificationPage>;
    /// Set the read flag; the wire body carries the inverse as `unread`.
    async fn set_notification_read(&self, id: &str, read: bool) -> Result<()>;
    async fn mark_all_read(&self) -> Result<()>;
    async fn snooze_notification(&self, id: &str, duration_minutes: u32) -> Result<()>;

    async fn reminder_defaults(&self) -> Result<ReminderDefaults>;
    async fn save_reminder_defaults(&self, defaults: &ReminderDefaults) -> Result<()>;

    /// One-time code the user sends to the Telegram bot to link accounts.
    async fn generate_telegram_link(&self) -> Result<String>;
}
