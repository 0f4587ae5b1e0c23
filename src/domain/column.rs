use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::domain::task::{TaskId, TaskStatus};

/// Identifier of a board column (e.g., column-1)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Description of a column used to build an empty board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ColumnSpecFields")]
pub struct ColumnSpec {
    pub id: ColumnId,
    pub title: String,
    pub status: TaskStatus,
}

/// Config shape of a column; `status` may be left out
#[derive(Deserialize)]
struct ColumnSpecFields {
    id: ColumnId,
    title: String,
    #[serde(default)]
    status: Option<TaskStatus>,
}

impl From<ColumnSpecFields> for ColumnSpec {
    fn from(fields: ColumnSpecFields) -> Self {
        let status = fields
            .status
            .unwrap_or_else(|| TaskStatus::from_str(&fields.title).unwrap_or_default());
        Self {
            id: fields.id,
            title: fields.title,
            status,
        }
    }
}

impl ColumnSpec {
    /// Creates a spec whose status is inferred from the title. Titles that
    /// name no known status bind to `To Do`.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        let status = TaskStatus::from_str(&title).unwrap_or_default();
        Self {
            id: ColumnId::new(id),
            title,
            status,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// A workflow stage on the board holding an ordered list of task IDs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub status: TaskStatus,
    pub task_ids: Vec<TaskId>,
}

impl Column {
    pub(crate) fn from_spec(spec: &ColumnSpec) -> Self {
        Self {
            id: spec.id.clone(),
            title: spec.title.clone(),
            status: spec.status,
            task_ids: Vec::new(),
        }
    }

    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.task_ids.contains(task_id)
    }

    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    /// New arrivals land at the top of the column
    pub(crate) fn push_front(&mut self, task_id: TaskId) {
        self.task_ids.insert(0, task_id);
    }

    /// Removes a task ID, keeping the relative order of the rest.
    /// Returns false if the ID was not present.
    pub(crate) fn remove(&mut self, task_id: &TaskId) -> bool {
        let before = self.task_ids.len();
        self.task_ids.retain(|id| id != task_id);
        self.task_ids.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_infers_status_from_title() {
        assert_eq!(ColumnSpec::new("c1", "To Do").status, TaskStatus::ToDo);
        assert_eq!(
            ColumnSpec::new("c2", "in progress").status,
            TaskStatus::InProgress
        );
        assert_eq!(ColumnSpec::new("c3", "Done").status, TaskStatus::Done);
        assert_eq!(ColumnSpec::new("c4", "Backlog").status, TaskStatus::ToDo);
        assert_eq!(
            ColumnSpec::new("c5", "Shipped")
                .with_status(TaskStatus::Done)
                .status,
            TaskStatus::Done
        );
    }

    #[test]
    fn test_spec_deserialization_infers_missing_status() {
        let spec: ColumnSpec = serde_json::from_str(r#"{ "id": "c1", "title": "Done" }"#).unwrap();
        assert_eq!(spec, ColumnSpec::new("c1", "Done"));
        assert_eq!(spec.status, TaskStatus::Done);

        let spec: ColumnSpec =
            serde_json::from_str(r#"{ "id": "c2", "title": "Shipped", "status": "Done" }"#)
                .unwrap();
        assert_eq!(spec.status, TaskStatus::Done);

        let spec: ColumnSpec = serde_json::from_str(r#"{ "id": "c3", "title": "Backlog" }"#).unwrap();
        assert_eq!(spec.status, TaskStatus::ToDo);
    }

    #[test]
    fn test_push_front_and_remove_preserve_order() {
        let mut column = Column::from_spec(&ColumnSpec::new("c1", "To Do"));
        let a = TaskId::generate();
        let b = TaskId::generate();
        let c = TaskId::generate();

        column.push_front(a.clone());
        column.push_front(b.clone());
        column.push_front(c.clone());
        assert_eq!(column.task_ids, vec![c.clone(), b.clone(), a.clone()]);

        assert!(column.remove(&b));
        assert_eq!(column.task_ids, vec![c, a]);
        assert!(!column.remove(&b));
        assert_eq!(column.len(), 2);
    }

    #[test]
    fn test_column_serialization_uses_task_ids_key() {
        let mut column = Column::from_spec(&ColumnSpec::new("column-1", "To Do"));
        column.push_front(TaskId::generate());

        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["id"], "column-1");
        assert_eq!(json["taskIds"].as_array().map(Vec::len), Some(1));
    }
}
