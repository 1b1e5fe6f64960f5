use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use todo_api::dtos::TodoDto;
use todo_api::handlers::AppState;

use super::setup::{TestApp, create_test_state, setup_test_db};

/// Setup a complete test app: database + state. Returns (TestApp guard, AppState).
/// The TestApp must be kept alive (_g pattern) to keep the container running.
pub async fn setup_test_app() -> (TestApp, AppState) {
    let test_app = setup_test_db().await;
    let state = create_test_state(test_app.pool.clone());
    (test_app, state)
}

/// POST /todos with the given draft, assert 201, return the created TodoDto.
pub async fn create_todo_ok<S, B>(app: &S, draft: &serde_json::Value) -> TodoDto
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = actix_web::test::TestRequest::post()
        .uri("/todos")
        .set_json(draft)
        .to_request();
    let resp = actix_web::test::call_service(app, req).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::CREATED,
        "POST /todos should return 201 Created"
    );
    actix_web::test::read_body_json(resp).await
}

/// GET /todos/{id}, assert 200, return deserialized TodoDto.
pub async fn get_todo_ok<S, B>(app: &S, todo_id: uuid::Uuid) -> TodoDto
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = actix_web::test::TestRequest::get()
        .uri(&format!("/todos/{}", todo_id))
        .to_request();
    let resp = actix_web::test::call_service(app, req).await;
    assert!(
        resp.status().is_success(),
        "GET /todos/{} returned {}",
        todo_id,
        resp.status()
    );
    actix_web::test::read_body_json(resp).await
}

/// GET /todos, assert 200, return the full collection.
pub async fn list_todos_ok<S, B>(app: &S) -> Vec<TodoDto>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = actix_web::test::TestRequest::get().uri("/todos").to_request();
    let resp = actix_web::test::call_service(app, req).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::OK,
        "GET /todos should return 200 OK"
    );
    actix_web::test::read_body_json(resp).await
}

/// PUT /todos/{id} with the given patch, assert 200, return the updated TodoDto.
pub async fn update_todo_ok<S, B>(
    app: &S,
    todo_id: uuid::Uuid,
    patch: &serde_json::Value,
) -> TodoDto
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = actix_web::test::TestRequest::put()
        .uri(&format!("/todos/{}", todo_id))
        .set_json(patch)
        .to_request();
    let resp = actix_web::test::call_service(app, req).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::OK,
        "PUT /todos/{} should return 200 OK",
        todo_id
    );
    actix_web::test::read_body_json(resp).await
}

/// Assert a request returns 400 with a validation error body mentioning `field`.
pub async fn assert_validation_error<S, B>(app: &S, req: Request, field: &str)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = actix_web::test::call_service(app, req).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::BAD_REQUEST,
        "expected a validation failure for field '{}'",
        field
    );
    let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
    let details = body["details"].as_array().expect("details array");
    assert!(
        details.iter().any(|d| d.as_str().unwrap().contains(field)),
        "no detail mentions '{}': {:?}",
        field,
        details
    );
}
