use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::domain::column::ColumnId;
use crate::error::{KanbanError, Result};

/// Unique identifier for a task (e.g., task-6f1c...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    const PREFIX: &'static str = "task-";

    /// Generates a fresh, globally unique task ID
    pub fn generate() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    fn from_uuid(uuid: Uuid) -> Self {
        Self(format!("{}{}", Self::PREFIX, uuid.hyphenated()))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TaskId {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self> {
        let rest = s
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| KanbanError::InvalidTaskId(s.to_string()))?;

        // Store the canonical (lowercase, hyphenated) form
        Uuid::parse_str(rest)
            .map(Self::from_uuid)
            .map_err(|_| KanbanError::InvalidTaskId(s.to_string()))
    }
}

impl TryFrom<String> for TaskId {
    type Error = KanbanError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_str(&s)
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Workflow stage of a task. Always equal to the status of the column
/// that holds the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::ToDo, Self::InProgress, Self::Done];
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToDo => write!(f, "To Do"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Done => write!(f, "Done"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "to do" | "todo" | "to-do" => Ok(Self::ToDo),
            "in progress" | "in-progress" | "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(KanbanError::Validation(format!(
                "Invalid status '{}'. Valid statuses: To Do, In Progress, Done",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// A kanban task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub assigned_by: String,
    #[serde(default)]
    pub assigned_to: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with the given ID, title and status
    pub(crate) fn new(id: TaskId, title: String, status: TaskStatus) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description: String::new(),
            start_date: None,
            deadline: None,
            status,
            priority: TaskPriority::default(),
            assigned_by: String::new(),
            assigned_to: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the editable fields. The ID, assignor and creation time
    /// are kept; status is managed by the board.
    pub(crate) fn apply_update(&mut self, update: &TaskUpdate) {
        self.title = update.title.trim().to_string();
        self.description = update.description.clone();
        self.start_date = update.start_date;
        self.deadline = update.deadline;
        self.priority = update.priority;
        self.assigned_to = update.assigned_to.clone();
        self.touch();
    }

    pub(crate) fn set_status(&mut self, status: TaskStatus) {
        if self.status != status {
            self.status = status;
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Checks whether the deadline has passed at `now` for a task that is
    /// not done yet
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Done && self.deadline.is_some_and(|deadline| deadline < now)
    }
}

/// Rejects titles that are empty after trimming whitespace
pub(crate) fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(KanbanError::Validation(
            "task title must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Rejects a start date that falls after the deadline
pub(crate) fn validate_date_range(
    start: Option<DateTime<Utc>>,
    deadline: Option<DateTime<Utc>>,
) -> Result<()> {
    if let (Some(start), Some(end)) = (start, deadline) {
        if start > end {
            return Err(KanbanError::InvalidDateRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
    }
    Ok(())
}

/// Fields submitted by the task creation form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub deadline: Option<DateTime<Utc>>,
    /// Requested status; resolved to the first column bound to it
    pub status: Option<TaskStatus>,
    pub priority: TaskPriority,
    pub assigned_by: String,
    pub assigned_to: String,
    /// Explicit target column; defaults to the first column in order
    pub column: Option<ColumnId>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn dates(mut self, start: Option<DateTime<Utc>>, deadline: Option<DateTime<Utc>>) -> Self {
        self.start_date = start;
        self.deadline = deadline;
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn assigned_by(mut self, assignor: impl Into<String>) -> Self {
        self.assigned_by = assignor.into();
        self
    }

    pub fn assigned_to(mut self, assignee: impl Into<String>) -> Self {
        self.assigned_to = assignee.into();
        self
    }

    pub fn in_column(mut self, column: ColumnId) -> Self {
        self.column = Some(column);
        self
    }
}

/// Full set of editable fields submitted by the edit form.
///
/// Build one with [`TaskUpdate::from`] to start from the task's current
/// values, then override what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskUpdate {
    pub title: String,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_to: String,
}

impl From<&Task> for TaskUpdate {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            start_date: task.start_date,
            deadline: task.deadline,
            status: task.status,
            priority: task.priority,
            assigned_to: task.assigned_to.clone(),
        }
    }
}

impl TaskUpdate {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn dates(mut self, start: Option<DateTime<Utc>>, deadline: Option<DateTime<Utc>>) -> Self {
        self.start_date = start;
        self.deadline = deadline;
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn assigned_to(mut self, assignee: impl Into<String>) -> Self {
        self.assigned_to = assignee.into();
        self
    }
}
