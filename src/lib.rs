//! # Tasklane Core
//!
//! Client-side state model for per-project kanban boards.
//!
//! A [`BoardState`] holds a project's tasks, its columns and their display
//! order. Every operation borrows the current state and returns a new one,
//! so callers swap states atomically and a failed operation changes nothing.
//! Column membership decides a task's status: moving a task rewrites its
//! status, and editing its status moves it.

pub mod domain;
pub mod error;

// Re-export commonly used types
pub use domain::{
    board::{BoardConfig, BoardState},
    column::{Column, ColumnId, ColumnSpec},
    drag::{DragOutcome, DragSession, DropTarget},
    project::{Project, ProjectId, Workspace},
    projection::ColumnView,
    task::{NewTask, Task, TaskId, TaskPriority, TaskStatus, TaskUpdate},
};
pub use error::{ErrorKind, KanbanError, Result};
