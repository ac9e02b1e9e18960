use super::types::NotificationType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,

    #[serde(rename = "type")]
    pub notification_type: NotificationType,

    pub message: String,

    /// The only field this client ever changes.
    #[serde(default)]
    pub read: bool,

    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        id: impl Into<String>,
        notification_type: NotificationType,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            notification_type,
            message: message.into(),
            read: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }
}

/// Body of `GET /notifications`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPage {
    #[serde(default)]
    pub notifications: Vec<Notification>,

    #[serde(default)]
    pub total_count: Option<u64>,
}
