use chrono::{NaiveDate, Utc};

use crate::dtos::{NewTodoDto, UpdateTodoDto};

use super::constants::{MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, MIN_TITLE_LEN};
use super::{ValidationError, ValidationResult};

/// Validates a new todo DTO before creation.
pub fn validate_new_todo(dto: &NewTodoDto) -> ValidationResult {
    let mut errors = Vec::new();

    validate_title(&dto.title, &mut errors);
    validate_description(&dto.description, &mut errors);
    if let Some(due_date) = dto.due_date {
        validate_due_date(due_date, &mut errors);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validates an update DTO. Absent fields are skipped.
pub fn validate_update_todo(dto: &UpdateTodoDto) -> ValidationResult {
    let mut errors = Vec::new();

    if let Some(ref title) = dto.title {
        validate_title(title, &mut errors);
    }
    if let Some(ref description) = dto.description {
        validate_description(description, &mut errors);
    }
    if let Some(Some(due_date)) = dto.due_date {
        validate_due_date(due_date, &mut errors);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn validate_title(title: &str, errors: &mut Vec<ValidationError>) {
    let len = title.trim().chars().count();
    if len == 0 {
        errors.push(ValidationError {
            field: "title".to_string(),
            message: "Title is required".to_string(),
        });
    } else if len < MIN_TITLE_LEN {
        errors.push(ValidationError {
            field: "title".to_string(),
            message: format!("Title must be at least {} characters", MIN_TITLE_LEN),
        });
    } else if len > MAX_TITLE_LEN {
        errors.push(ValidationError {
            field: "title".to_string(),
            message: format!("Title must not exceed {} characters", MAX_TITLE_LEN),
        });
    }
}

fn validate_description(description: &str, errors: &mut Vec<ValidationError>) {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        errors.push(ValidationError {
            field: "description".to_string(),
            message: format!(
                "Description must not exceed {} characters",
                MAX_DESCRIPTION_LEN
            ),
        });
    }
}

fn validate_due_date(due_date: NaiveDate, errors: &mut Vec<ValidationError>) {
    if due_date < Utc::now().date_naive() {
        errors.push(ValidationError {
            field: "dueDate".to_string(),
            message: "Due date cannot be in the past".to_string(),
        });
    }
}
