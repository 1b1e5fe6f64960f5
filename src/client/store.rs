use async_trait::async_trait;
use uuid::Uuid;

use crate::dtos::{NewTodoDto, TodoDto, UpdateTodoDto};

use super::error::ClientError;

/// Backing-store contract for the todo collection.
///
/// Both implementations behave identically from the caller's point of view;
/// swapping one for the other must not change coordinator behavior.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Fetch the full collection, newest first.
    async fn list(&self) -> Result<Vec<TodoDto>, ClientError>;

    /// Persist a new todo from a draft, assigning id and timestamps.
    async fn create(&self, draft: NewTodoDto) -> Result<TodoDto, ClientError>;

    /// Apply a partial patch, refreshing `updated_at`.
    async fn update(&self, id: Uuid, patch: UpdateTodoDto) -> Result<TodoDto, ClientError>;

    /// Remove a todo permanently.
    async fn delete(&self, id: Uuid) -> Result<(), ClientError>;
}
