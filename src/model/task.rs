use super::types::{TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub due_date: DateTime<Utc>,

    pub estimated_minutes: u32,

    #[serde(default)]
    pub priority: TaskPriority,

    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, due_date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            due_date,
            estimated_minutes: 30,
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_estimate(mut self, minutes: u32) -> Self {
        self.estimated_minutes = minutes;
        self
    }

    /// A copy with the status flipped; the snapshot itself is left untouched.
    pub fn toggled(&self) -> Self {
        let mut next = self.clone();
        next.status = self.status.toggled();
        next
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed() && self.due_date < now
    }
}

/// Create payload: every task field except the server-assigned `id` and `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub due_date: DateTime<Utc>,

    pub estimated_minutes: u32,

    pub priority: TaskPriority,
}

/// Partial update body for `PUT /tasks/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Presentation ordering for the priority view: most urgent first, then earliest due.
///
/// Returns a sorted copy; the store's insertion order is never rewritten.
pub fn sort_by_priority(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then(a.due_date.cmp(&b.due_date))
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn due(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_deserialize_server_task() {
        let json = r#"{
            "id": "t1",
            "title": "Write report",
            "dueDate": "2026-03-01T09:00:00.000Z",
            "estimatedMinutes": 45,
            "priority": "HIGH",
            "status": "PENDING",
            "userId": "ignored"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "t1");
        assert_eq!(task.description, None);
        assert_eq!(task.estimated_minutes, 45);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.due_date, due(1));
    }

    #[test]
    fn test_toggled_leaves_original_untouched() {
        let task = Task::new("t1", "Read", due(2));
        let flipped = task.toggled();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(flipped.status, TaskStatus::Completed);
        assert_eq!(flipped.toggled(), task);
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let body = serde_json::to_value(TaskPatch::status(TaskStatus::Completed)).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "COMPLETED" }));
    }

    #[test]
    fn test_new_task_omits_missing_description() {
        let new = NewTask {
            title: "Gym".to_string(),
            description: None,
            due_date: due(3),
            estimated_minutes: 60,
            priority: TaskPriority::Low,
        };
        let body = serde_json::to_value(&new).unwrap();
        assert!(body.get("description").is_none());
        assert_eq!(body["estimatedMinutes"], 60);
        assert_eq!(body["priority"], "LOW");
    }

    #[test]
    fn test_sort_by_priority_does_not_mutate_input() {
        let tasks = vec![
            Task::new("a", "low", due(1)).with_priority(TaskPriority::Low),
            Task::new("b", "high late", due(5)).with_priority(TaskPriority::High),
            Task::new("c", "high early", due(2)).with_priority(TaskPriority::High),
        ];
        let sorted = sort_by_priority(&tasks);
        let ids: Vec<_> = sorted.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert_eq!(tasks[0].id, "a");
    }

    #[test]
    fn test_overdue_ignores_completed() {
        let now = due(10);
        let open = Task::new("t1", "late", due(1));
        let done = open.clone().with_status(TaskStatus::Completed);
        assert!(open.is_overdue(now));
        assert!(!done.is_overdue(now));
    }
}
