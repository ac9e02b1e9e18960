use super::types::RecurrenceType;
use serde::{Deserialize, Serialize};

/// Body of `POST /recurring`.
///
/// Templates are never cached; the tasks they materialize arrive through the
/// normal task listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecurringTemplate {
    pub title: String,
    pub estimated_minutes: u32,
    pub recurrence_type: RecurrenceType,
}

/// Template as echoed back by the server after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTemplate {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub estimated_minutes: u32,
    pub recurrence_type: RecurrenceType,
}
