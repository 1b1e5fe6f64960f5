use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::{
    Conn,
    dtos::{NewTodoDto, TodoDto, UpdateTodoDto},
    models::{NewTodo, Todo, TodoChangeset},
};

use super::DbError;

/// List the full collection, newest first.
pub async fn list_todos<'a>(conn: &mut Conn<'a>) -> Result<Vec<TodoDto>, DbError> {
    use crate::schema::todo::dsl::*;

    let rows = todo
        .select(Todo::as_select())
        .order(created_at.desc())
        .load::<Todo>(conn)
        .await?;

    Ok(rows.into_iter().map(TodoDto::from).collect())
}

/// Find a single todo by id. Returns None if it doesn't exist.
pub async fn find_todo_by_id<'a>(
    conn: &mut Conn<'a>,
    todo_id: Uuid,
) -> Result<Option<TodoDto>, DbError> {
    use crate::schema::todo::dsl::*;

    let row = todo
        .select(Todo::as_select())
        .filter(id.eq(todo_id))
        .first::<Todo>(conn)
        .await
        .optional()?;

    Ok(row.map(TodoDto::from))
}

/// Insert a new todo. The database assigns the id and both timestamps.
pub async fn insert_new_todo<'a>(conn: &mut Conn<'a>, dto: NewTodoDto) -> Result<TodoDto, DbError> {
    use crate::schema::todo::dsl::todo;

    let new_todo = NewTodo {
        title: dto.title,
        description: dto.description,
        status: dto.status,
        due_date: dto.due_date,
    };

    let row = diesel::insert_into(todo)
        .values(new_todo)
        .returning(Todo::as_returning())
        .get_result(conn)
        .await?;

    Ok(TodoDto::from(row))
}

/// Apply a partial update and refresh `updated_at` in the same statement.
/// Returns None if no todo with that id exists.
pub async fn update_todo<'a>(
    conn: &mut Conn<'a>,
    todo_id: Uuid,
    dto: UpdateTodoDto,
) -> Result<Option<TodoDto>, DbError> {
    use crate::schema::todo::dsl::*;
    use diesel::dsl::now;

    let changes = TodoChangeset {
        title: dto.title,
        description: dto.description,
        status: dto.status,
        due_date: dto.due_date,
    };

    let row = diesel::update(todo.filter(id.eq(todo_id)))
        .set((changes, updated_at.eq(now)))
        .returning(Todo::as_returning())
        .get_result(conn)
        .await
        .optional()?;

    Ok(row.map(TodoDto::from))
}

/// Delete a todo. Returns true if a row was removed.
pub async fn delete_todo<'a>(conn: &mut Conn<'a>, todo_id: Uuid) -> Result<bool, DbError> {
    use crate::schema::todo::dsl::*;

    let deleted = diesel::delete(todo.filter(id.eq(todo_id)))
        .execute(conn)
        .await?;

    Ok(deleted == 1)
}
