use actix_web::HttpResponse;

use crate::validation::ValidationError;

/// 400 response with the standard `{error, details[]}` body, one detail line
/// per failed field.
pub fn validation_error_response(errors: &[ValidationError]) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "error": "Validation failed",
        "details": errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
    }))
}
