// crates/remote/src/http.rs
//! HTTP implementation of the love service

use crate::error::{RemoteError, RemoteResult};
use crate::service::{
    CheckManyResponse, FetchAllResponse, RemoteLoveService, TokenProvider, ToggleResponse,
};
use lovedlist_core::ItemId;
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the marketplace API, without trailing slash
    pub base_url: String,
    /// Request timeout; a timed-out call surfaces as a remote failure
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl ClientConfig {
    /// Default timeouts and user agent for the given API base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(15),
            user_agent: format!("lovedlist/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Overrides the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Love service over the marketplace REST API.
///
/// A bearer token is fetched from the [`TokenProvider`] before each call.
/// Non-2xx responses become [`RemoteError::Rejected`]; the server's own
/// `success` flag is passed through for the sync engine to interpret.
pub struct HttpLoveService<T: TokenProvider> {
    client: ReqwestClient,
    config: ClientConfig,
    tokens: T,
}

impl<T: TokenProvider> HttpLoveService<T> {
    /// Builds the service over a fresh reqwest client
    pub fn new(config: ClientConfig, tokens: T) -> RemoteResult<Self> {
        if config.base_url.is_empty() {
            return Err(RemoteError::InvalidUrl("empty base URL".to_string()));
        }
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(RemoteError::Http)?;

        Ok(Self {
            client,
            config,
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    async fn read_response<D: DeserializeOwned>(response: reqwest::Response) -> RemoteResult<D> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RemoteError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        response.json::<D>().await.map_err(RemoteError::Http)
    }
}

impl<T: TokenProvider> RemoteLoveService for HttpLoveService<T> {
    async fn toggle(&self, item_id: &ItemId) -> RemoteResult<ToggleResponse> {
        let token = self.tokens.access_token()?;
        log::debug!("Toggling love for listing {item_id}");
        let response = self
            .client
            .post(self.url(&format!("/api/loves/{item_id}/toggle")))
            .bearer_auth(token)
            .send()
            .await
            .map_err(RemoteError::Http)?;
        Self::read_response(response).await
    }

    async fn fetch_all(&self) -> RemoteResult<FetchAllResponse> {
        let token = self.tokens.access_token()?;
        log::debug!("Fetching full loved-listing list");
        let response = self
            .client
            .get(self.url("/api/loves"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(RemoteError::Http)?;
        Self::read_response(response).await
    }

    async fn check_many(&self, item_ids: &[ItemId]) -> RemoteResult<CheckManyResponse> {
        let token = self.tokens.access_token()?;
        log::debug!("Checking loved-state for {} listings", item_ids.len());
        let response = self
            .client
            .post(self.url("/api/loves/check"))
            .bearer_auth(token)
            .json(&serde_json::json!({ "itemIds": item_ids }))
            .send()
            .await
            .map_err(RemoteError::Http)?;
        Self::read_response(response).await
    }
}
