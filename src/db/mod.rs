mod todo_crud;

pub(crate) type DbError = crate::error::TodoApiError;

pub use todo_crud::{delete_todo, find_todo_by_id, insert_new_todo, list_todos, update_todo};
