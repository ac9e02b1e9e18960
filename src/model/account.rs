use serde::{Deserialize, Serialize};

/// Successful `POST /auth/login` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginGrant {
    pub token: String,
    pub email: String,
}

/// Account-wide reminder settings, served without the `data` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDefaults {
    #[serde(default)]
    pub default_notify_before_hours: Vec<u32>,

    #[serde(default)]
    pub default_notify_percentage: Vec<u32>,

    #[serde(default = "default_min_gap_minutes")]
    pub default_min_gap_minutes: u32,
}

fn default_min_gap_minutes() -> u32 {
    58
}

impl Default for ReminderDefaults {
    fn default() -> Self {
        Self {
            default_notify_before_hours: Vec::new(),
            default_notify_percentage: Vec::new(),
            default_min_gap_minutes: default_min_gap_minutes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramLink {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub code: Option<String>,
}
