use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Identifiable, Queryable, Selectable, Serialize, Debug)]
#[diesel(table_name = crate::schema::todo)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Todo {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: String,
    pub status: TodoStatus,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable row for a new todo. The database assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = crate::schema::todo)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub status: TodoStatus,
    pub due_date: Option<NaiveDate>,
}

/// Partial update applied with diesel's changeset semantics:
/// `None` leaves a column untouched, `Some(None)` on `due_date` sets it to NULL.
/// `updated_at` is refreshed separately with SQL `now()` in the same statement.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::todo)]
pub struct TodoChangeset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TodoStatus>,
    pub due_date: Option<Option<NaiveDate>>,
}

#[derive(
    Debug,
    PartialEq,
    Eq,
    Serialize,
    diesel_derive_enum::DbEnum,
    Deserialize,
    Clone,
    Copy,
    Default,
    utoipa::ToSchema,
)]
#[db_enum(existing_type_path = "crate::schema::sql_types::TodoStatus")]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    #[default]
    Todo,
    Done,
}
