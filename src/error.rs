use thiserror::Error;

pub type Result<T> = std::result::Result<T, KanbanError>;

/// Broad category of a [`KanbanError`], used by form and drag handlers to
/// pick a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Integrity,
    Serialization,
}

#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid date range: start {start} is after deadline {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Invalid task ID format: {0}")]
    InvalidTaskId(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Task {task} is not in column {column}")]
    TaskNotInColumn { task: String, column: String },

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Board integrity violated: {0}")]
    Integrity(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl KanbanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::InvalidDateRange { .. } | Self::InvalidTaskId(_) => {
                ErrorKind::Validation
            }
            Self::TaskNotFound(_)
            | Self::ColumnNotFound(_)
            | Self::TaskNotInColumn { .. }
            | Self::ProjectNotFound(_) => ErrorKind::NotFound,
            Self::Integrity(_) => ErrorKind::Integrity,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }
}
