use crate::domain::board::{BoardConfig, BoardState};
use crate::error::{KanbanError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// The user's projects, each with its own board.
///
/// Boards are replaced wholesale on every successful operation; a failed
/// operation leaves the stored board as it was.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    config: BoardConfig,
    projects: Vec<Project>,
    boards: HashMap<ProjectId, BoardState>,
}

impl Workspace {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            projects: Vec::new(),
            boards: HashMap::new(),
        }
    }

    /// Creates a project with a fresh board built from the workspace config
    pub fn create_project(&mut self, name: &str) -> Result<ProjectId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(KanbanError::Validation(
                "project name must not be empty".to_string(),
            ));
        }

        let board = BoardState::from_config(&self.config)?;
        let project = Project {
            id: ProjectId::generate(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        let id = project.id;

        self.boards.insert(id, board);
        self.projects.push(project);

        info!(project_id = %id, project = %name, "created project");
        Ok(id)
    }

    /// Projects in creation order
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: &ProjectId) -> Result<&Project> {
        self.projects
            .iter()
            .find(|project| &project.id == id)
            .ok_or_else(|| KanbanError::ProjectNotFound(id.to_string()))
    }

    pub fn board(&self, id: &ProjectId) -> Result<&BoardState> {
        self.boards
            .get(id)
            .ok_or_else(|| KanbanError::ProjectNotFound(id.to_string()))
    }

    /// Runs `op` against the project's board and stores the result if it
    /// succeeds, handing back whatever else the operation produced.
    pub fn apply<T, F>(&mut self, id: &ProjectId, op: F) -> Result<T>
    where
        F: FnOnce(&BoardState) -> Result<(BoardState, T)>,
    {
        let board = self
            .boards
            .get_mut(id)
            .ok_or_else(|| KanbanError::ProjectNotFound(id.to_string()))?;

        match op(&*board) {
            Ok((next, value)) => {
                *board = next;
                Ok(value)
            }
            Err(err) => {
                warn!(project_id = %id, error = %err, "board operation rejected");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::column::ColumnId;
    use crate::domain::task::NewTask;
    use crate::error::ErrorKind;

    #[test]
    fn test_create_project_gets_fresh_board() {
        let mut workspace = Workspace::default();
        let id = workspace.create_project("  Website  ").unwrap();

        assert_eq!(workspace.projects().len(), 1);
        assert_eq!(workspace.project(&id).unwrap().name, "Website");

        let board = workspace.board(&id).unwrap();
        assert_eq!(board.task_count(), 0);
        assert_eq!(board.column_order().len(), 3);
    }

    #[test]
    fn test_create_project_rejects_blank_name() {
        let mut workspace = Workspace::default();
        let err = workspace.create_project("   ").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(workspace.projects().is_empty());
    }

    #[test]
    fn test_boards_are_independent() {
        let mut workspace = Workspace::default();
        let first = workspace.create_project("First").unwrap();
        let second = workspace.create_project("Second").unwrap();

        workspace
            .apply(&first, |board| board.create_task(NewTask::new("Only here")))
            .unwrap();

        assert_eq!(workspace.board(&first).unwrap().task_count(), 1);
        assert_eq!(workspace.board(&second).unwrap().task_count(), 0);
    }

    #[test]
    fn test_apply_keeps_board_on_failure() {
        let mut workspace = Workspace::default();
        let id = workspace.create_project("Project").unwrap();
        let task_id = workspace
            .apply(&id, |board| board.create_task(NewTask::new("Task")))
            .unwrap();
        let before = workspace.board(&id).unwrap().clone();

        let err = workspace
            .apply(&id, |board| {
                board
                    .move_task(&task_id, &ColumnId::new("column-2"), &ColumnId::new("column-3"))
                    .map(|next| (next, ()))
            })
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(workspace.board(&id).unwrap(), &before);
    }

    #[test]
    fn test_unknown_project() {
        let mut workspace = Workspace::default();
        let missing = ProjectId::generate();

        assert!(workspace.project(&missing).is_err());
        assert!(workspace.board(&missing).is_err());
        assert!(matches!(
            workspace.apply(&missing, |board| Ok((board.clone(), ()))),
            Err(KanbanError::ProjectNotFound(_))
        ));
    }
}
