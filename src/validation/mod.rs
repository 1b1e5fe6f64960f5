//! Input validation for todo creation and updates.
//!
//! Validation runs twice by design: once in the client library before an
//! optimistic mutation is applied, and once in the HTTP handlers as a second
//! line of defense.

pub mod constants;
mod todo;

pub use todo::{validate_new_todo, validate_update_todo};

/// Validation error with details about what failed.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of validation - either Ok or a list of errors.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Join a list of validation errors into a single display string.
pub fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
