//! HTTP client for communicating with the `AgriMarket` admin API

use crate::service::{LoginRequest, MarketplaceApi};
use agrimarket_core::config::ApiConfig;
use agrimarket_core::types::{
    FeedbackEntry, FeedbackStatus, KpiOverview, Listing, ListingStatus, LoginResponse,
    SessionStatus, UserAccount,
};
use agrimarket_core::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::debug;

/// Error body the API uses when it explains a rejection
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// API client for making HTTP requests to the marketplace admin API
///
/// Clones share one token slot, so attaching a token after login is
/// visible to every handle on the same client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new API client against a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: trim_base(base_url.into()),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a client from the API section of the configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the underlying HTTP client cannot
    /// be constructed.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: trim_base(config.base_url.clone()),
            token: Arc::new(RwLock::new(config.token.clone())),
        })
    }

    /// Attach an API token for authenticated requests
    #[must_use]
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.set_token(token);
        self
    }

    /// Replace the API token after a fresh login
    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.into());
        }
    }

    /// Drop the API token, returning to anonymous requests
    pub fn clear_token(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        debug!(%method, %url, "issuing API request");

        let mut request = self.client.request(method, url);
        if let Ok(slot) = self.token.read()
            && let Some(ref token) = *slot
        {
            request = request.header("Authorization", format!("Token {token}"));
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Network(format!("request timed out: {e}"))
            } else {
                Error::Network(e.to_string())
            }
        })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        decode(response).await
    }
}

fn trim_base(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::Network(format!("failed to read response body: {e}")))?;
    serde_json::from_slice(&bytes).map_err(Error::from)
}

/// Map a non-success response onto the error taxonomy, surfacing the
/// API's own `{"error": ...}` message when it sent one
async fn error_from_response(response: Response) -> Error {
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .map_or_else(
            |_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            },
            |body| body.error,
        );

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authentication(message),
        StatusCode::NOT_FOUND => Error::NotFound { resource: message },
        _ => Error::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl MarketplaceApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let response = self
            .send(self.request(Method::POST, "/auth/login/").json(request))
            .await
            .map_err(|err| match err {
                // The login endpoint rejects bad credentials with a 400;
                // that is an authentication failure, not a caller bug.
                Error::Api { message, .. } => Error::Authentication(message),
                other => other,
            })?;
        decode(response).await
    }

    async fn check_session(&self) -> Result<SessionStatus> {
        self.get_json("/auth/check/").await
    }

    async fn list_users(&self) -> Result<Vec<UserAccount>> {
        self.get_json("/users/").await
    }

    async fn set_user_active(&self, id: i64, active: bool) -> Result<()> {
        let action = if active { "unsuspend" } else { "suspend" };
        self.send(self.request(Method::POST, &format!("/users/{id}/{action}/")))
            .await?;
        Ok(())
    }

    async fn list_listings(&self) -> Result<Vec<Listing>> {
        self.get_json("/listings/").await
    }

    async fn set_listing_status(&self, id: i64, status: ListingStatus) -> Result<Listing> {
        let response = self
            .send(
                self.request(Method::PATCH, &format!("/listings/{id}/"))
                    .json(&serde_json::json!({ "status": status })),
            )
            .await?;
        decode(response).await
    }

    async fn delete_listing(&self, id: i64) -> Result<()> {
        self.send(self.request(Method::DELETE, &format!("/listings/{id}/")))
            .await?;
        Ok(())
    }

    async fn list_feedback(&self) -> Result<Vec<FeedbackEntry>> {
        self.get_json("/feedback/").await
    }

    async fn set_feedback_status(&self, id: i64, status: FeedbackStatus) -> Result<FeedbackEntry> {
        let response = self
            .send(
                self.request(Method::PATCH, &format!("/feedback/{id}/"))
                    .json(&serde_json::json!({ "status": status })),
            )
            .await?;
        decode(response).await
    }

    async fn kpi_overview(&self) -> Result<KpiOverview> {
        self.get_json("/kpis/overview/").await
    }
}
