use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::dtos::{NewTodoDto, TodoDto, UpdateTodoDto};
use crate::validation;

use super::error::ClientError;
use super::store::TodoStore;

/// Default file name for the persisted collection.
pub const DEFAULT_STORAGE_FILE: &str = "todo.tasks.v1.json";

/// File-backed store persisting the whole collection as one JSON array.
///
/// Every operation reads and rewrites the full file; there is no incremental
/// diffing. A missing file is treated as an empty collection. Drafts and
/// patches are validated here as a second line of defense, mirroring the
/// server-side validation of the remote variant.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<Vec<TodoDto>, ClientError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ClientError::Storage(e)),
        };
        serde_json::from_slice(&raw).map_err(|e| ClientError::Deserialize(e.to_string()))
    }

    async fn save(&self, todos: &[TodoDto]) -> Result<(), ClientError> {
        let raw =
            serde_json::to_vec_pretty(todos).map_err(|e| ClientError::Deserialize(e.to_string()))?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl TodoStore for LocalStore {
    async fn list(&self) -> Result<Vec<TodoDto>, ClientError> {
        self.load().await
    }

    async fn create(&self, draft: NewTodoDto) -> Result<TodoDto, ClientError> {
        validation::validate_new_todo(&draft)
            .map_err(|e| ClientError::Validation(validation::join_errors(&e)))?;

        let now = Utc::now();
        let new = TodoDto {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            status: draft.status,
            due_date: draft.due_date,
            created_at: now,
            updated_at: now,
        };

        let mut todos = self.load().await?;
        todos.insert(0, new.clone());
        self.save(&todos).await?;
        Ok(new)
    }

    async fn update(&self, id: Uuid, patch: UpdateTodoDto) -> Result<TodoDto, ClientError> {
        validation::validate_update_todo(&patch)
            .map_err(|e| ClientError::Validation(validation::join_errors(&e)))?;

        let mut todos = self.load().await?;
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ClientError::NotFound(id))?;

        if let Some(title) = patch.title {
            todo.title = title;
        }
        if let Some(description) = patch.description {
            todo.description = description;
        }
        if let Some(status) = patch.status {
            todo.status = status;
        }
        if let Some(due_date) = patch.due_date {
            todo.due_date = due_date;
        }
        todo.updated_at = Utc::now();
        let updated = todo.clone();

        self.save(&todos).await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let mut todos = self.load().await?;
        let before = todos.len();
        todos.retain(|t| t.id != id);
        if todos.len() == before {
            return Err(ClientError::NotFound(id));
        }
        self.save(&todos).await
    }
}
