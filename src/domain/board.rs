use crate::domain::column::{Column, ColumnId, ColumnSpec};
use crate::domain::task::{Task, TaskId, TaskStatus};
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

impl BoardConfig {
    /// Parses a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Default Board".to_string(),
            columns: vec![
                ColumnSpec::new("column-1", "To Do"),
                ColumnSpec::new("column-2", "In Progress"),
                ColumnSpec::new("column-3", "Done"),
            ],
        }
    }
}

/// Kanban board state for one project.
///
/// Every operation borrows the current state and returns a new one, so a
/// failed operation leaves the caller's state untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    pub(crate) tasks: HashMap<TaskId, Task>,
    pub(crate) columns: HashMap<ColumnId, Column>,
    pub(crate) column_order: Vec<ColumnId>,
}

impl BoardState {
    /// Builds a board with no tasks and one empty column per spec, in the
    /// order given.
    pub fn create_empty(column_specs: &[ColumnSpec]) -> Result<Self> {
        if column_specs.is_empty() {
            return Err(KanbanError::Validation(
                "a board needs at least one column".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(column_specs.len());
        for spec in column_specs {
            if spec.id.as_str().trim().is_empty() {
                return Err(KanbanError::Validation(
                    "column id must not be empty".to_string(),
                ));
            }
            if !seen.insert(&spec.id) {
                return Err(KanbanError::Validation(format!(
                    "duplicate column id: {}",
                    spec.id
                )));
            }
        }

        let state = Self::with_columns(column_specs);
        debug!(columns = state.column_order.len(), "created empty board");
        Ok(state)
    }

    /// Lays out empty columns in spec order. Specs must already be validated.
    fn with_columns(column_specs: &[ColumnSpec]) -> Self {
        Self {
            tasks: HashMap::new(),
            columns: column_specs
                .iter()
                .map(|spec| (spec.id.clone(), Column::from_spec(spec)))
                .collect(),
            column_order: column_specs.iter().map(|spec| spec.id.clone()).collect(),
        }
    }

    pub fn from_config(config: &BoardConfig) -> Result<Self> {
        Self::create_empty(&config.columns)
    }

    pub fn get_task(&self, id: &TaskId) -> Result<&Task> {
        self.tasks
            .get(id)
            .ok_or_else(|| KanbanError::TaskNotFound(id.to_string()))
    }

    pub fn get_column(&self, id: &ColumnId) -> Result<&Column> {
        self.columns
            .get(id)
            .ok_or_else(|| KanbanError::ColumnNotFound(id.to_string()))
    }

    pub(crate) fn column_mut(&mut self, id: &ColumnId) -> Result<&mut Column> {
        self.columns
            .get_mut(id)
            .ok_or_else(|| KanbanError::ColumnNotFound(id.to_string()))
    }

    pub(crate) fn task_mut(&mut self, id: &TaskId) -> Result<&mut Task> {
        self.tasks
            .get_mut(id)
            .ok_or_else(|| KanbanError::TaskNotFound(id.to_string()))
    }

    pub fn column_order(&self) -> &[ColumnId] {
        &self.column_order
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Columns in display order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.column_order
            .iter()
            .filter_map(|id| self.columns.get(id))
    }

    /// Finds the column currently holding a task
    pub fn column_of(&self, task_id: &TaskId) -> Option<&ColumnId> {
        self.columns()
            .find(|column| column.contains(task_id))
            .map(|column| &column.id)
    }

    /// First column in display order bound to `status`
    pub fn column_for_status(&self, status: TaskStatus) -> Option<&ColumnId> {
        self.columns()
            .find(|column| column.status == status)
            .map(|column| &column.id)
    }

    /// Verifies the structural invariants of the board:
    ///
    /// - every map entry is keyed by its own ID
    /// - `column_order` lists every column exactly once
    /// - every task sits in exactly one column, and every listed ID has a task
    /// - each task's status matches the status of its column
    pub fn check_invariants(&self) -> Result<()> {
        if let Some((key, column)) = self.columns.iter().find(|(key, column)| *key != &column.id) {
            return Err(KanbanError::Integrity(format!(
                "column stored under {} has id {}",
                key, column.id
            )));
        }
        if let Some((key, task)) = self.tasks.iter().find(|(key, task)| *key != &task.id) {
            return Err(KanbanError::Integrity(format!(
                "task stored under {} has id {}",
                key, task.id
            )));
        }

        let ordered: HashSet<&ColumnId> = self.column_order.iter().collect();
        if ordered.len() != self.column_order.len() {
            return Err(KanbanError::Integrity(
                "column order contains duplicates".to_string(),
            ));
        }
        if ordered.len() != self.columns.len()
            || !self.columns.keys().all(|id| ordered.contains(id))
        {
            return Err(KanbanError::Integrity(
                "column order does not match the column set".to_string(),
            ));
        }

        let mut seen: HashSet<&TaskId> = HashSet::with_capacity(self.tasks.len());
        for column in self.columns.values() {
            for task_id in &column.task_ids {
                if !seen.insert(task_id) {
                    return Err(KanbanError::Integrity(format!(
                        "task {} appears more than once",
                        task_id
                    )));
                }
                let task = self.tasks.get(task_id).ok_or_else(|| {
                    KanbanError::Integrity(format!(
                        "column {} references missing task {}",
                        column.id, task_id
                    ))
                })?;
                if task.status != column.status {
                    return Err(KanbanError::Integrity(format!(
                        "task {} has status {} but sits in column {} ({})",
                        task_id, task.status, column.id, column.status
                    )));
                }
            }
        }

        if seen.len() != self.tasks.len() {
            return Err(KanbanError::Integrity(format!(
                "{} task(s) are not placed in any column",
                self.tasks.len() - seen.len()
            )));
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a board snapshot, rejecting snapshots that break invariants
    pub fn from_json(json: &str) -> Result<Self> {
        let state: Self = serde_json::from_str(json)?;
        if let Err(err) = state.check_invariants() {
            warn!(error = %err, "rejected board snapshot");
            return Err(err);
        }
        Ok(state)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::with_columns(&BoardConfig::default().columns)
    }
}
