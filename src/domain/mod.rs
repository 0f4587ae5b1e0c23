pub mod board;
pub mod column;
pub mod drag;
pub mod lifecycle;
pub mod movement;
pub mod project;
pub mod projection;
pub mod sorting;
pub mod task;

pub use board::{BoardConfig, BoardState};
pub use column::{Column, ColumnId, ColumnSpec};
pub use drag::{DragOutcome, DragSession, DropTarget};
pub use project::{Project, ProjectId, Workspace};
pub use projection::ColumnView;
pub use sorting::{sort_tasks, SortField, SortOrder};
pub use task::{NewTask, Task, TaskId, TaskPriority, TaskStatus, TaskUpdate};
