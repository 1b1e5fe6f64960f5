mod todo;

pub use todo::{NewTodoDto, TodoDto, UpdateTodoDto};
