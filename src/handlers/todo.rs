use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::{db, dtos, error::ApiError, validation};

use super::AppState;
use super::response::validation_error_response;

#[utoipa::path(
    get,
    path = "/todos",
    summary = "List todos",
    description = "Returns the full todo collection ordered by creation time, newest first.",
    responses(
        (status = 200, description = "Array of todos", body = Vec<dtos::TodoDto>),
    ),
    tag = "todos"
)]
/// List all todos, newest first
pub async fn list_todos(state: web::Data<AppState>) -> actix_web::Result<HttpResponse> {
    let mut conn = state.conn().await?;

    let todos = db::list_todos(&mut conn).await.map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(todos))
}

#[utoipa::path(
    get,
    path = "/todos/{todo_id}",
    summary = "Get a todo",
    params(("todo_id" = Uuid, Path, description = "The UUID of the todo")),
    responses(
        (status = 200, description = "The todo", body = dtos::TodoDto),
        (status = 404, description = "No todo found with this ID"),
    ),
    tag = "todos"
)]
/// Get a todo by ID
pub async fn get_todo(
    state: web::Data<AppState>,
    todo_id: web::Path<Uuid>,
) -> actix_web::Result<HttpResponse> {
    let mut conn = state.conn().await?;

    let found = db::find_todo_by_id(&mut conn, *todo_id)
        .await
        .map_err(ApiError::from)?;

    Ok(match found {
        Some(t) => HttpResponse::Ok().json(t),
        None => HttpResponse::NotFound().json(serde_json::json!({
            "error": "Todo not found"
        })),
    })
}

#[utoipa::path(
    post,
    path = "/todos",
    summary = "Create a todo",
    description = "Create a todo from a draft. The server assigns the id and both timestamps; \
status defaults to `todo`. Returns 201 with the persisted todo and a Location header.",
    request_body = dtos::NewTodoDto,
    responses(
        (status = 201, description = "Todo created", body = dtos::TodoDto),
        (status = 400, description = "Validation failed. Body contains `error` and `details` (array of strings)."),
    ),
    tag = "todos"
)]
/// Create a new todo
pub async fn add_todo(
    state: web::Data<AppState>,
    form: web::Json<dtos::NewTodoDto>,
) -> actix_web::Result<HttpResponse> {
    if let Err(errors) = validation::validate_new_todo(&form) {
        return Ok(validation_error_response(&errors));
    }

    let mut conn = state.conn().await?;

    let created = db::insert_new_todo(&mut conn, form.0)
        .await
        .map_err(ApiError::from)?;

    log::info!("Created todo {}", created.id);

    Ok(HttpResponse::Created()
        .insert_header(("Location", format!("/todos/{}", created.id)))
        .json(created))
}

#[utoipa::path(
    put,
    path = "/todos/{todo_id}",
    summary = "Update a todo",
    description = "Apply a partial patch: absent fields are left untouched, `\"dueDate\": null` \
clears the due date. `updatedAt` is refreshed on every update, even an empty patch.",
    params(("todo_id" = Uuid, Path, description = "The UUID of the todo to update")),
    request_body = dtos::UpdateTodoDto,
    responses(
        (status = 200, description = "Updated todo", body = dtos::TodoDto),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "No todo found with this ID"),
    ),
    tag = "todos"
)]
/// Update a todo
pub async fn update_todo(
    state: web::Data<AppState>,
    todo_id: web::Path<Uuid>,
    form: web::Json<dtos::UpdateTodoDto>,
) -> actix_web::Result<HttpResponse> {
    if let Err(errors) = validation::validate_update_todo(&form) {
        return Ok(validation_error_response(&errors));
    }

    let mut conn = state.conn().await?;

    let updated = db::update_todo(&mut conn, *todo_id, form.0)
        .await
        .map_err(ApiError::from)?;

    Ok(match updated {
        Some(t) => HttpResponse::Ok().json(t),
        None => HttpResponse::NotFound().json(serde_json::json!({
            "error": "Todo not found"
        })),
    })
}

#[utoipa::path(
    delete,
    path = "/todos/{todo_id}",
    summary = "Delete a todo",
    description = "Remove a todo permanently. There is no soft delete.",
    params(("todo_id" = Uuid, Path, description = "The UUID of the todo to delete")),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 404, description = "No todo found with this ID"),
    ),
    tag = "todos"
)]
/// Delete a todo
pub async fn delete_todo(
    state: web::Data<AppState>,
    todo_id: web::Path<Uuid>,
) -> actix_web::Result<HttpResponse> {
    let mut conn = state.conn().await?;

    let deleted = db::delete_todo(&mut conn, *todo_id)
        .await
        .map_err(ApiError::from)?;

    Ok(if deleted {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().json(serde_json::json!({
            "error": "Todo not found"
        }))
    })
}
