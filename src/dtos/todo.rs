use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Todo, TodoStatus};

/// Input DTO for creating a new todo via `POST /todos`.
///
/// Only `title` is required; `description` defaults to empty, `status` to `todo`
/// and `dueDate` to null. The server assigns the id and both timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewTodoDto {
    /// Short text describing the todo. Must be 10-200 characters.
    pub title: String,

    /// Free-form details. Max 10000 characters.
    #[serde(default)]
    pub description: String,

    /// Initial status. Defaults to `todo` when omitted.
    #[serde(default)]
    pub status: TodoStatus,

    /// Optional due date (calendar date, no time of day). Must not be in the past.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// Partial update payload for `PUT /todos/{id}`.
///
/// Absent fields are left untouched. `dueDate` distinguishes "absent" from
/// "null": an explicit `"dueDate": null` clears the date, a missing key keeps it.
/// `updatedAt` is always refreshed, even for an empty patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoDto {
    /// New title. Must be 10-200 characters if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New description. Max 10000 characters if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New status (`todo` or `done`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TodoStatus>,

    /// New due date. `null` clears the date; must not be in the past.
    #[serde(
        default,
        deserialize_with = "deserialize_patch_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<NaiveDate>>,
}

/// Deserializes a patch field so that an explicit `null` becomes `Some(None)`
/// while an absent key stays `None` (via `#[serde(default)]`).
fn deserialize_patch_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Wire representation of a todo, returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoDto {
    /// Server-assigned UUID (a temporary client UUID while an optimistic
    /// create is still in flight).
    pub id: uuid::Uuid,
    pub title: String,
    pub description: String,
    pub status: TodoStatus,
    /// Due date, or null when the todo has no deadline.
    pub due_date: Option<NaiveDate>,
    pub created_at: chrono::DateTime<Utc>,
    /// Refreshed on every mutation. Always >= `createdAt`.
    pub updated_at: chrono::DateTime<Utc>,
}

impl From<Todo> for TodoDto {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            status: t.status,
            due_date: t.due_date,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_todo_defaults() {
        let dto: NewTodoDto =
            serde_json::from_str(r#"{"title": "Buy groceries and milk"}"#).unwrap();
        assert_eq!(dto.title, "Buy groceries and milk");
        assert_eq!(dto.description, "");
        assert_eq!(dto.status, TodoStatus::Todo);
        assert_eq!(dto.due_date, None);
    }

    #[test]
    fn test_wire_keys_are_camel_case() {
        let dto = TodoDto {
            id: uuid::Uuid::new_v4(),
            title: "Write the quarterly report".to_string(),
            description: String::new(),
            status: TodoStatus::Done,
            due_date: Some(NaiveDate::from_ymd_opt(2030, 1, 15).unwrap()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("dueDate").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["status"], "done");
        assert_eq!(json["dueDate"], "2030-01-15");
    }

    #[test]
    fn test_collection_round_trip_preserves_order() {
        let make = |title: &str| TodoDto {
            id: uuid::Uuid::new_v4(),
            title: title.to_string(),
            description: "details".to_string(),
            status: TodoStatus::Todo,
            due_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let todos = vec![make("First in the ordering"), make("Second in the ordering")];
        let json = serde_json::to_string(&todos).unwrap();
        let back: Vec<TodoDto> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, todos);
    }

    #[test]
    fn test_patch_distinguishes_null_from_absent() {
        let absent: UpdateTodoDto = serde_json::from_str(r#"{"status": "done"}"#).unwrap();
        assert_eq!(absent.due_date, None);

        let null: UpdateTodoDto = serde_json::from_str(r#"{"dueDate": null}"#).unwrap();
        assert_eq!(null.due_date, Some(None));

        let set: UpdateTodoDto = serde_json::from_str(r#"{"dueDate": "2030-06-01"}"#).unwrap();
        assert_eq!(
            set.due_date,
            Some(Some(NaiveDate::from_ymd_opt(2030, 6, 1).unwrap()))
        );
    }
}
