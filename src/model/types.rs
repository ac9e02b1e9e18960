use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    /// Status is a binary toggle; there is no third state to land in.
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    /// Sort key for the priority view, most urgent first.
    pub fn rank(self) -> u8 {
        match self {
            TaskPriority::High => 0,
            TaskPriority::Medium => 1,
            TaskPriority::Low => 2,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskPriority::Low => write!(f, "low"),
            TaskPriority::Medium => write!(f, "medium"),
            TaskPriority::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationType {
    Reminder,
    Overdue,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationType::Reminder => write!(f, "reminder"),
            NotificationType::Overdue => write!(f, "overdue"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecurrenceType {
    #[default]
    Daily,
    Monthly,
    Yearly,
}

impl fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceType::Daily => write!(f, "daily"),
            RecurrenceType::Monthly => write!(f, "monthly"),
            RecurrenceType::Yearly => write!(f, "yearly"),
        }
    }
}

/// Which server-side listing feeds the task slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskView {
    #[default]
    All,
    Daily,
    Priority,
}

impl TaskView {
    pub fn path(self) -> &'static str {
        match self {
            TaskView::All => "tasks",
            TaskView::Daily => "tasks/daily",
            TaskView::Priority => "tasks/priority",
        }
    }
}

impl fmt::Display for TaskView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskView::All => write!(f, "all"),
            TaskView::Daily => write!(f, "daily"),
            TaskView::Priority => write!(f, "priority"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_toggle_is_involution() {
        assert_eq!(TaskStatus::Pending.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Completed.toggled(), TaskStatus::Pending);
        assert_eq!(TaskStatus::Pending.toggled().toggled(), TaskStatus::Pending);
    }

    #[test]
    fn test_wire_format_is_uppercase() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );
        assert_eq!(
            serde_json::from_str::<TaskPriority>("\"HIGH\"").unwrap(),
            TaskPriority::High
        );
        assert_eq!(
            serde_json::from_str::<NotificationType>("\"OVERDUE\"").unwrap(),
            NotificationType::Overdue
        );
    }

    #[test]
    fn test_view_paths() {
        assert_eq!(TaskView::All.path(), "tasks");
        assert_eq!(TaskView::Daily.path(), "tasks/daily");
        assert_eq!(TaskView::Priority.path(), "tasks/priority");
    }
}
