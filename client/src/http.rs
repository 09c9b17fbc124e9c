use async_trait::async_trait;
use doable_shared::{
    ApiMessage, CreateTodoRequest, Todo, TodoStatus, UpdateStatusRequest, UpdateTodoRequest,
};
use reqwest::{Client, Response};
use uuid::Uuid;

use crate::api::{ApiError, TodoApi};

/// reqwest-backed transport. The cookie store carries the opaque session
/// credential set by the auth layer on login.
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    http: Client,
    base_url: String,
}

impl HttpTodoApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Pass a success response through; turn anything else into `ApiError::Api`
/// with the server's message when the body had one.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<ApiMessage>()
        .await
        .map(|m| m.message)
        .unwrap_or_default();
    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.http.get(self.url("/todo/show")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn create(&self, input: CreateTodoRequest) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/todo/add"))
            .json(&input)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn update(&self, id: Uuid, input: UpdateTodoRequest) -> Result<Todo, ApiError> {
        let response = self
            .http
            .put(self.url(&format!("/todo/update/{id}")))
            .json(&input)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn update_status(&self, id: Uuid, status: TodoStatus) -> Result<Todo, ApiError> {
        let body = UpdateStatusRequest {
            status: Some(status.to_string()),
        };
        let response = self
            .http
            .put(self.url(&format!("/todo/status/{id}")))
            .json(&body)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/todo/delete/{id}")))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}
