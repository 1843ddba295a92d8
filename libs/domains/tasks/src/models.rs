use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A task as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Storage-assigned identifier, immutable after creation
    pub id: i32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the task is due, RFC 3339
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
}

/// Payload for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(required(message = "due date is required"))]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
}

/// Partial update for a task. Absent fields keep their current value.
///
/// `due_date` arrives as a raw string and is parsed when the patch is
/// applied, so a malformed timestamp fails at merge time rather than
/// at deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl Task {
    /// Merges a patch into this task. Fields absent from the patch are
    /// left untouched.
    pub fn apply_patch(&mut self, patch: TaskPatch) -> Result<(), chrono::ParseError> {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(raw) = patch.due_date {
            let parsed = DateTime::parse_from_rfc3339(&raw)?;
            self.due_date = Some(parsed.with_timezone(&Utc));
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        Ok(())
    }
}

/// Listing filter. Both criteria are optional and combine with AND.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TaskFilter {
    pub completed: Option<bool>,
    /// Matches tasks whose due date falls on this calendar day (UTC).
    pub due_date: Option<NaiveDate>,
}

/// One page of tasks together with pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaskPage {
    /// Total number of pages for the current filter
    pub count_page: u64,
    /// The page actually served, after clamping
    pub cur_page: u64,
    pub tasks: Vec<Task>,
}
