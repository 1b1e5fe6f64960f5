use serde_json::json;

/// Helper to create a valid todo draft JSON
pub fn todo_json(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": "some details about the task"
    })
}

/// Helper to create a todo draft with an explicit due date (ISO 8601 date)
pub fn todo_json_with_due_date(title: &str, due_date: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": "some details about the task",
        "dueDate": due_date
    })
}

/// A due date comfortably in the future, formatted for the wire.
pub fn future_due_date() -> String {
    (chrono::Utc::now().date_naive() + chrono::Days::new(30)).to_string()
}

/// A due date in the past, which validation must reject.
pub fn past_due_date() -> String {
    (chrono::Utc::now().date_naive() - chrono::Days::new(30)).to_string()
}
