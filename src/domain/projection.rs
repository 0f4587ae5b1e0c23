use crate::domain::board::BoardState;
use crate::domain::column::Column;
use crate::domain::sorting::{sort_tasks, SortField, SortOrder};
use crate::domain::task::Task;
use crate::error::{KanbanError, Result};

/// Display-ready column: the column and its tasks in stored order
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView<'a> {
    pub column: &'a Column,
    pub tasks: Vec<&'a Task>,
}

impl<'a> ColumnView<'a> {
    /// Returns the column's tasks re-ordered for display. The board's own
    /// ordering is not affected.
    pub fn sorted(&self, field: SortField, order: SortOrder) -> Vec<&'a Task> {
        let mut tasks = self.tasks.clone();
        sort_tasks(&mut tasks, field, order);
        tasks
    }
}

impl BoardState {
    /// Resolves every column, in board order, into its full task records.
    ///
    /// A task ID with no matching task is an integrity error rather than
    /// something to skip.
    pub fn project_columns(&self) -> Result<Vec<ColumnView<'_>>> {
        self.column_order
            .iter()
            .map(|column_id| {
                let column = self.columns.get(column_id).ok_or_else(|| {
                    KanbanError::Integrity(format!("column order lists unknown column {}", column_id))
                })?;

                let tasks = column
                    .task_ids
                    .iter()
                    .map(|task_id| {
                        self.tasks.get(task_id).ok_or_else(|| {
                            KanbanError::Integrity(format!(
                                "column {} references missing task {}",
                                column_id, task_id
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(ColumnView { column, tasks })
            })
            .collect()
    }
}
