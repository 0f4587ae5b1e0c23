//! Task creation and editing.
//!
//! Column membership is authoritative: a task's status is always the status
//! of the column holding it. Creating a task with a status places it in the
//! first column bound to that status, and editing the status moves it there.

use crate::domain::board::BoardState;
use crate::domain::column::ColumnId;
use crate::domain::task::{validate_date_range, validate_title, NewTask, Task, TaskId, TaskUpdate};
use crate::error::{KanbanError, Result};
use tracing::{debug, info};

impl BoardState {
    /// Adds a new task to the top of its target column.
    ///
    /// The target is `fields.column` if given, otherwise the first column
    /// bound to `fields.status`, otherwise the first column on the board.
    pub fn create_task(&self, fields: NewTask) -> Result<(BoardState, TaskId)> {
        validate_title(&fields.title)?;
        validate_date_range(fields.start_date, fields.deadline)?;

        let column_id = self.target_column(&fields)?.clone();
        let status = self.get_column(&column_id)?.status;

        let id = TaskId::generate();
        let mut task = Task::new(id.clone(), fields.title.trim().to_string(), status);
        task.description = fields.description;
        task.start_date = fields.start_date;
        task.deadline = fields.deadline;
        task.priority = fields.priority;
        task.assigned_by = fields.assigned_by;
        task.assigned_to = fields.assigned_to;

        let mut next = self.clone();
        next.tasks.insert(id.clone(), task);
        next.column_mut(&column_id)?.push_front(id.clone());

        info!(task_id = %id, column = %column_id, "created task");
        Ok((next, id))
    }

    fn target_column(&self, fields: &NewTask) -> Result<&ColumnId> {
        if let Some(column_id) = &fields.column {
            let column = self.get_column(column_id)?;
            if let Some(status) = fields.status {
                if status != column.status {
                    return Err(KanbanError::Validation(format!(
                        "status {} conflicts with column {} ({})",
                        status, column.id, column.status
                    )));
                }
            }
            return Ok(&column.id);
        }

        if let Some(status) = fields.status {
            return self.column_for_status(status).ok_or_else(|| {
                KanbanError::Validation(format!("no column accepts status {}", status))
            });
        }

        self.column_order
            .first()
            .ok_or_else(|| KanbanError::Validation("board has no columns".to_string()))
    }

    /// Replaces the editable fields of a task, keeping its ID.
    ///
    /// A changed status moves the task to the top of the first column bound
    /// to the new status.
    pub fn update_task(&self, id: &TaskId, update: TaskUpdate) -> Result<BoardState> {
        let current = self.get_task(id)?;
        validate_title(&update.title)?;
        validate_date_range(update.start_date, update.deadline)?;

        let source = self
            .column_of(id)
            .ok_or_else(|| KanbanError::Integrity(format!("task {} is not in any column", id)))?
            .clone();

        let destination = if update.status == current.status {
            None
        } else {
            let dest = self.column_for_status(update.status).ok_or_else(|| {
                KanbanError::Validation(format!("no column accepts status {}", update.status))
            })?;
            Some(dest.clone())
        };

        let mut next = self.clone();
        next.task_mut(id)?.apply_update(&update);

        if let Some(dest) = destination {
            debug!(task_id = %id, from = %source, to = %dest, "status edit relocates task");
            next.relocate(id, &source, &dest)?;
        }

        info!(task_id = %id, "updated task");
        Ok(next)
    }

    /// Looks up a task by ID
    pub fn find_task(&self, id: &TaskId) -> Result<&Task> {
        self.get_task(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::column::ColumnSpec;
    use crate::domain::task::{TaskPriority, TaskStatus};
    use chrono::{Duration, Utc};

    fn board() -> BoardState {
        BoardState::default()
    }

    #[test]
    fn test_create_task_defaults_to_first_column() {
        let state = board();
        let (next, id) = state.create_task(NewTask::new("Write spec")).unwrap();

        assert_eq!(state.task_count(), 0);
        assert_eq!(next.task_count(), 1);

        let column = next.get_column(&ColumnId::new("column-1")).unwrap();
        assert_eq!(column.task_ids, vec![id.clone()]);

        let task = next.get_task(&id).unwrap();
        assert_eq!(task.title, "Write spec");
        assert_eq!(task.status, TaskStatus::ToDo);
        assert_eq!(task.description, "");
        assert_eq!(task.priority, TaskPriority::Medium);
        next.check_invariants().unwrap();
    }

    #[test]
    fn test_create_task_prepends() {
        let (state, first) = board().create_task(NewTask::new("First")).unwrap();
        let (state, second) = state.create_task(NewTask::new("Second")).unwrap();

        let column = state.get_column(&ColumnId::new("column-1")).unwrap();
        assert_eq!(column.task_ids, vec![second, first]);
    }

    #[test]
    fn test_create_task_rejects_blank_title() {
        let state = board();
        let before = state.clone();
        let err = state.create_task(NewTask::new("   ")).unwrap_err();

        assert!(matches!(err, KanbanError::Validation(_)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_create_task_trims_title() {
        let (state, id) = board().create_task(NewTask::new("  Padded  ")).unwrap();
        assert_eq!(state.get_task(&id).unwrap().title, "Padded");
    }

    #[test]
    fn test_create_task_with_status_targets_bound_column() {
        let (state, id) = board()
            .create_task(NewTask::new("Ship it").status(TaskStatus::Done))
            .unwrap();

        assert_eq!(state.column_of(&id), Some(&ColumnId::new("column-3")));
        assert_eq!(state.get_task(&id).unwrap().status, TaskStatus::Done);
    }

    #[test]
    fn test_create_task_in_explicit_column() {
        let (state, id) = board()
            .create_task(NewTask::new("Started").in_column(ColumnId::new("column-2")))
            .unwrap();

        assert_eq!(state.column_of(&id), Some(&ColumnId::new("column-2")));
        assert_eq!(state.get_task(&id).unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn test_create_task_errors() {
        let state = board();

        let err = state
            .create_task(NewTask::new("x").in_column(ColumnId::new("missing")))
            .unwrap_err();
        assert!(matches!(err, KanbanError::ColumnNotFound(_)));

        let err = state
            .create_task(
                NewTask::new("x")
                    .in_column(ColumnId::new("column-1"))
                    .status(TaskStatus::Done),
            )
            .unwrap_err();
        assert!(matches!(err, KanbanError::Validation(_)));

        let start = Utc::now();
        let err = state
            .create_task(NewTask::new("x").dates(Some(start), Some(start - Duration::days(1))))
            .unwrap_err();
        assert!(matches!(err, KanbanError::InvalidDateRange { .. }));

        let two_columns = BoardState::create_empty(&[
            ColumnSpec::new("c1", "To Do"),
            ColumnSpec::new("c2", "Done"),
        ])
        .unwrap();
        let err = two_columns
            .create_task(NewTask::new("x").status(TaskStatus::InProgress))
            .unwrap_err();
        assert!(matches!(err, KanbanError::Validation(_)));
    }

    #[test]
    fn test_create_task_keeps_all_fields() {
        let start = Utc::now();
        let deadline = start + Duration::days(3);
        let (state, id) = board()
            .create_task(
                NewTask::new("Review PR")
                    .description("Look at the parser changes")
                    .dates(Some(start), Some(deadline))
                    .priority(TaskPriority::High)
                    .assigned_by("alice")
                    .assigned_to("bob"),
            )
            .unwrap();

        let task = state.find_task(&id).unwrap();
        assert_eq!(task.description, "Look at the parser changes");
        assert_eq!(task.start_date, Some(start));
        assert_eq!(task.deadline, Some(deadline));
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.assigned_by, "alice");
        assert_eq!(task.assigned_to, "bob");
    }

    #[test]
    fn test_update_task_replaces_fields() {
        let (state, id) = board().create_task(NewTask::new("Draft")).unwrap();
        let update = TaskUpdate::from(state.get_task(&id).unwrap())
            .title("Final")
            .description("Polished")
            .assigned_to("carol");

        let next = state.update_task(&id, update).unwrap();
        let task = next.get_task(&id).unwrap();

        assert_eq!(task.id, id);
        assert_eq!(task.title, "Final");
        assert_eq!(task.description, "Polished");
        assert_eq!(task.assigned_to, "carol");
        assert_eq!(state.get_task(&id).unwrap().title, "Draft");
        assert_eq!(next.column_of(&id), Some(&ColumnId::new("column-1")));
    }

    #[test]
    fn test_update_task_status_change_relocates() {
        let (state, other) = board()
            .create_task(NewTask::new("Other").status(TaskStatus::Done))
            .unwrap();
        let (state, id) = state.create_task(NewTask::new("Moving")).unwrap();
        let update = TaskUpdate::from(state.get_task(&id).unwrap()).status(TaskStatus::Done);

        let next = state.update_task(&id, update).unwrap();

        let done = next.get_column(&ColumnId::new("column-3")).unwrap();
        assert_eq!(done.task_ids, vec![id.clone(), other]);
        assert!(next.get_column(&ColumnId::new("column-1")).unwrap().is_empty());
        assert_eq!(next.get_task(&id).unwrap().status, TaskStatus::Done);
        next.check_invariants().unwrap();
    }

    #[test]
    fn test_update_task_errors() {
        let (state, id) = board().create_task(NewTask::new("Task")).unwrap();
        let update = TaskUpdate::from(state.get_task(&id).unwrap());

        let err = state
            .update_task(&TaskId::generate(), update.clone())
            .unwrap_err();
        assert!(matches!(err, KanbanError::TaskNotFound(_)));

        let err = state
            .update_task(&id, update.clone().title(""))
            .unwrap_err();
        assert!(matches!(err, KanbanError::Validation(_)));

        let two_columns = BoardState::create_empty(&[
            ColumnSpec::new("c1", "To Do"),
            ColumnSpec::new("c2", "Done"),
        ])
        .unwrap();
        let (two_columns, id) = two_columns.create_task(NewTask::new("Task")).unwrap();
        let update = TaskUpdate::from(two_columns.get_task(&id).unwrap())
            .status(TaskStatus::InProgress);
        let err = two_columns.update_task(&id, update).unwrap_err();
        assert!(matches!(err, KanbanError::Validation(_)));
    }
}
