use async_trait::async_trait;
use uuid::Uuid;

use crate::dtos::{NewTodoDto, TodoDto, UpdateTodoDto};

use super::error::{ApiErrorBody, ClientError};
use super::store::TodoStore;

/// HTTP-backed store speaking JSON to the `/todos` resource collection.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    base_url: String,
    http: reqwest::Client,
}

impl RemoteStore {
    /// Create a new store pointing at the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    /// Create a store with a custom `reqwest::Client` (e.g. for custom TLS, timeouts).
    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Accept a 2xx response, turning anything else into the matching
    /// client error. `id` is the todo a 404 refers to, where one applies.
    async fn check(resp: reqwest::Response, id: Option<Uuid>) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(ClientError::NotFound(id));
            }
        }

        let body: Option<ApiErrorBody> = resp.json().await.ok();
        let message = body
            .as_ref()
            .and_then(|b| b.error.clone())
            .unwrap_or_else(|| "Unknown error".to_string());

        if status == reqwest::StatusCode::BAD_REQUEST {
            let details = body
                .and_then(|b| b.details)
                .map(|d| d.join("; "))
                .unwrap_or(message);
            return Err(ClientError::Validation(details));
        }

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_body<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        resp.json()
            .await
            .map_err(|e| ClientError::Deserialize(e.to_string()))
    }
}

#[async_trait]
impl TodoStore for RemoteStore {
    async fn list(&self) -> Result<Vec<TodoDto>, ClientError> {
        let resp = self.http.get(self.url("/todos")).send().await?;
        Self::read_body(Self::check(resp, None).await?).await
    }

    async fn create(&self, draft: NewTodoDto) -> Result<TodoDto, ClientError> {
        let resp = self
            .http
            .post(self.url("/todos"))
            .json(&draft)
            .send()
            .await?;
        Self::read_body(Self::check(resp, None).await?).await
    }

    async fn update(&self, id: Uuid, patch: UpdateTodoDto) -> Result<TodoDto, ClientError> {
        let resp = self
            .http
            .put(self.url(&format!("/todos/{}", id)))
            .json(&patch)
            .send()
            .await?;
        Self::read_body(Self::check(resp, Some(id)).await?).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/todos/{}", id)))
            .send()
            .await?;
        Self::check(resp, Some(id)).await?;
        Ok(())
    }
}
