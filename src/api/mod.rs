pub mod analytics;
pub mod auth;
pub mod error;
pub mod knowledge;
pub mod settings;
pub mod tickets;
pub mod types;
pub mod users;

pub use analytics::AnalyticsApi;
pub use auth::AuthApi;
pub use error::ApiError;
pub use knowledge::KnowledgeApi;
pub use settings::SettingsApi;
pub use tickets::TicketsApi;
pub use users::UsersApi;

use crate::config::ApiConfig;
use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

#[derive(Clone, Debug)]
pub struct HelpdeskClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) access_token: Option<String>,
}

impl HelpdeskClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: None,
        })
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.access_token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Starts an authenticated request. Fails before touching the network
    /// when no token is held.
    pub(crate) fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(ApiError::NotAuthenticated)?;
        Ok(self
            .client
            .request(method, self.url(path))
            .bearer_auth(token))
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let text = self.send_checked(request).await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send_checked(request).await.map(|_| ())
    }

    async fn send_checked(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();

        if !status.is_success() {
            // The status alone is enough when the error body is unreadable.
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, path = %url, "request failed");
            return Err(ApiError::from_response(status, &body));
        }

        let text = response.text().await?;
        tracing::debug!(%status, path = %url, bytes = text.len(), "request succeeded");
        Ok(text)
    }
}
