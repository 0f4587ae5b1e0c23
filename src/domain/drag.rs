//! Two-phase drag-and-drop protocol.
//!
//! `begin_drag` captures the dragged task and the column it was picked up
//! from. `end_drag` resolves the drop target and, only when it names another
//! column on the board, performs the move.

use crate::domain::board::BoardState;
use crate::domain::column::ColumnId;
use crate::domain::task::TaskId;
use crate::error::{KanbanError, Result};
use tracing::debug;

/// Token for a drag in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    task_id: TaskId,
    source: ColumnId,
}

impl DragSession {
    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    pub fn source(&self) -> &ColumnId {
        &self.source
    }
}

/// Where the dragged card was released
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Column(ColumnId),
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Moved,
    /// Dropped back onto the column it came from
    Unchanged,
    /// Dropped outside any column on the board
    Cancelled,
}

impl BoardState {
    pub fn begin_drag(&self, task_id: &TaskId, source: &ColumnId) -> Result<DragSession> {
        let column = self.get_column(source)?;
        if !column.contains(task_id) {
            return Err(KanbanError::TaskNotInColumn {
                task: task_id.to_string(),
                column: source.to_string(),
            });
        }

        debug!(task_id = %task_id, source = %source, "drag started");
        Ok(DragSession {
            task_id: task_id.clone(),
            source: source.clone(),
        })
    }

    pub fn end_drag(
        &self,
        session: DragSession,
        target: DropTarget,
    ) -> Result<(BoardState, DragOutcome)> {
        let destination = match target {
            DropTarget::Column(id) if self.columns.contains_key(&id) => id,
            DropTarget::Column(id) => {
                debug!(task_id = %session.task_id, target = %id, "dropped on unknown column");
                return Ok((self.clone(), DragOutcome::Cancelled));
            }
            DropTarget::Outside => {
                debug!(task_id = %session.task_id, "dropped outside the board");
                return Ok((self.clone(), DragOutcome::Cancelled));
            }
        };

        if destination == session.source {
            return Ok((self.clone(), DragOutcome::Unchanged));
        }

        let next = self.move_task(&session.task_id, &session.source, &destination)?;
        Ok((next, DragOutcome::Moved))
    }
}
