use crate::domain::board::BoardState;
use crate::domain::column::ColumnId;
use crate::domain::task::TaskId;
use crate::error::{KanbanError, Result};
use tracing::info;

impl BoardState {
    /// Moves a task from `source` to the top of `destination`.
    ///
    /// Moving within the same column returns an identical state. The task
    /// takes the destination column's status.
    pub fn move_task(
        &self,
        task_id: &TaskId,
        source: &ColumnId,
        destination: &ColumnId,
    ) -> Result<BoardState> {
        if source == destination {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        next.relocate(task_id, source, destination)?;

        info!(task_id = %task_id, from = %source, to = %destination, "moved task");
        Ok(next)
    }

    /// In-place move used by `move_task` and status edits. Callers run it on
    /// a private copy, so an error here never reaches a visible state.
    pub(crate) fn relocate(
        &mut self,
        task_id: &TaskId,
        source: &ColumnId,
        destination: &ColumnId,
    ) -> Result<()> {
        let status = self.get_column(destination)?.status;

        let source_column = self.column_mut(source)?;
        if !source_column.remove(task_id) {
            return Err(KanbanError::TaskNotInColumn {
                task: task_id.to_string(),
                column: source.to_string(),
            });
        }

        self.column_mut(destination)?.push_front(task_id.clone());
        self.task_mut(task_id)?.set_status(status);
        Ok(())
    }
}
