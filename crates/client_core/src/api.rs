//! HTTP client for the task/auth API collaborator.
//!
//! All response-shape tolerance lives here: list envelopes, legacy field
//! names, and error bodies that are either plain text or `{ "message" }`
//! objects are normalized before anything reaches the store.

use anyhow::Result;
use reqwest::{Client, Method, RequestBuilder, Response};
use shared::{
    domain::{Task, TaskId},
    error::{ApiException, ErrorCode},
    protocol::{
        CreateTaskRequest, LoginRequest, LoginResponse, ProfilePatch, RegisterRequest,
        TaskListResponse, TaskPatch, TaskPayload, UserProfile,
    },
};
use tracing::debug;

pub struct TaskManagerClient {
    http: Client,
    server_url: String,
    token: Option<String>,
}

impl TaskManagerClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url = server_url.into();
        Self {
            http: Client::new(),
            server_url: server_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn has_session(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{path}", self.server_url));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<LoginResponse> {
        let response = self
            .request(Method::POST, "/api/auth/login")
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        let body: LoginResponse = check(response).await?.json().await?;
        self.token = Some(body.token.clone());
        debug!(user = %body.user.username, "login accepted");
        Ok(body)
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<()> {
        let response = self
            .request(Method::POST, "/api/auth/register")
            .json(&RegisterRequest {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<UserProfile> {
        let response = self
            .request(Method::PUT, "/api/auth/profile")
            .json(patch)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Drops the local session. The server holds no revocable state for the
    /// bearer token, so no call is made.
    pub fn logout(&mut self) {
        self.token = None;
    }

    pub async fn get_all_tasks(&self) -> Result<Vec<Task>> {
        let response = self.request(Method::GET, "/api/tasks").send().await?;
        let body: TaskListResponse = check(response).await?.json().await?;
        let tasks = body.into_tasks();
        debug!(count = tasks.len(), "fetched task list");
        Ok(tasks)
    }

    pub async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task> {
        let response = self
            .request(Method::POST, "/api/tasks")
            .json(request)
            .send()
            .await?;
        let payload: TaskPayload = check(response).await?.json().await?;
        Ok(payload.into_task())
    }

    pub async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Task> {
        let response = self
            .request(Method::PUT, &format!("/api/tasks/{}", id.0))
            .json(patch)
            .send()
            .await?;
        let payload: TaskPayload = check(response).await?.json().await?;
        Ok(payload.into_task())
    }

    pub async fn delete_task(&self, id: TaskId) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/api/tasks/{}", id.0))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

/// Map non-2xx responses onto `ApiException`, surfacing the server's own
/// message when the body carries one.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body)
        .unwrap_or_else(|| format!("request failed with status {status}"));
    Err(ApiException::new(ErrorCode::from_http_status(status.as_u16()), message).into())
}

/// Error bodies arrive as plain text, as a JSON string, or as an object
/// with a `message` field; pull a human-readable message out of any of them.
fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match value {
            serde_json::Value::String(text) => return Some(text),
            serde_json::Value::Object(map) => {
                if let Some(serde_json::Value::String(text)) = map.get("message") {
                    return Some(text.clone());
                }
                return None;
            }
            _ => return None,
        }
    }
    Some(trimmed.to_string())
}
