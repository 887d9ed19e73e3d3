//! REST client for the task backend
//!
//! [`ApiClient`] wraps a `reqwest::Client` with the configured base URL and
//! injects `Authorization: Bearer <token>` from a [`TokenStore`] on every
//! request. A `401 Unauthorized` clears the stored token so the next command
//! asks the user to log in again.

pub mod auth;
pub mod tasks;
pub mod types;

pub use types::{
    AuthResponse, MessageResponse, PagedData, PriorityFilter, SortDirection, StatusFilter, Task,
    TaskDraft, TaskPriority, TaskQuery, TaskStatus, User,
};

use crate::chat::suggestion::{SuggestionResponse, SuggestionService};
use crate::config::ApiConfig;
use crate::credentials::TokenStore;
use crate::error::{Result, TaskmateError};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Body sent to the suggestion endpoint
#[derive(Debug, Serialize)]
struct SuggestionRequest<'a> {
    question: &'a str,
}

/// HTTP client for the task backend
pub struct ApiClient {
    http: Client,
    base_url: String,
    suggestion_path: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("taskmate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TaskmateError::Config(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!("Initialized API client: base_url={}", config.base_url);

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            suggestion_path: config.suggestion_path.clone(),
            tokens,
        })
    }

    /// Base URL all paths are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token store backing this client
    pub fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let builder = self.http.request(method, self.url(path));
        Ok(match self.tokens.load()? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Send a request and decode its JSON body
    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let body = response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to decode response body: {}", e);
            TaskmateError::Http(e)
        })?;
        Ok(body)
    }

    /// Send a request, mapping non-success statuses to errors
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("Request to backend failed: {}", e);
            TaskmateError::Http(e)
        })?;
        self.check_status(response).await
    }

    async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Unauthorized response from {}; clearing stored token", path);
            if let Err(e) = self.tokens.clear() {
                tracing::warn!("Failed to clear stored token: {}", e);
            }
            return Err(TaskmateError::Authentication(
                "session expired or invalid, please log in again".to_string(),
            )
            .into());
        }

        tracing::error!("Backend returned {} for {}: {}", status, path, body);
        let message = if body.is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            body
        };
        Err(TaskmateError::Api {
            status: status.as_u16(),
            message,
        }
        .into())
    }
}

#[async_trait]
impl SuggestionService for ApiClient {
    async fn suggest(&self, question: &str) -> Result<SuggestionResponse> {
        let builder = self
            .request(Method::POST, &self.suggestion_path)?
            .json(&SuggestionRequest { question });
        self.send_json(builder).await
    }
}
