//! The remote collection service contract
//!
//! The console never talks to `reqwest` directly; every page store works
//! against this trait so tests can substitute the in-memory mock.

use agrimarket_core::types::{
    FeedbackEntry, FeedbackStatus, KpiOverview, Listing, ListingStatus, LoginResponse,
    SessionStatus, UserAccount,
};
use agrimarket_core::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use validator::Validate;

/// Credentials submitted to the login endpoint
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    /// Login name
    #[validate(length(min = 1, message = "must not be empty"))]
    pub username: String,

    /// Password
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

impl LoginRequest {
    /// Build a login request from raw form values
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Validate the request client-side before it goes on the wire
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validated(self) -> Result<Self> {
        if let Err(errors) = self.validate() {
            if let Some((field, field_errors)) = errors.field_errors().iter().next() {
                let message = field_errors
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map_or_else(|| "invalid value".to_string(), ToString::to_string);
                return Err(Error::Validation {
                    field: (*field).to_string(),
                    message,
                });
            }
            return Err(Error::Validation {
                field: "login".to_string(),
                message: "invalid credentials form".to_string(),
            });
        }
        Ok(self)
    }
}

/// Interface to the marketplace admin API
///
/// Implementations are stateless request/response boundaries: they own no
/// collection state, and they never retry on their own. All failures come
/// back as the core error taxonomy.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Authenticate and obtain an API token
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;

    /// Check whether the current token still holds a live session
    async fn check_session(&self) -> Result<SessionStatus>;

    /// Fetch all user accounts
    async fn list_users(&self) -> Result<Vec<UserAccount>>;

    /// Suspend (`active = false`) or unsuspend (`active = true`) a user
    async fn set_user_active(&self, id: i64, active: bool) -> Result<()>;

    /// Fetch all listings
    async fn list_listings(&self) -> Result<Vec<Listing>>;

    /// Change a listing's moderation status; returns the server's copy
    async fn set_listing_status(&self, id: i64, status: ListingStatus) -> Result<Listing>;

    /// Permanently delete a listing
    async fn delete_listing(&self, id: i64) -> Result<()>;

    /// Fetch all feedback entries
    async fn list_feedback(&self) -> Result<Vec<FeedbackEntry>>;

    /// Change a feedback entry's triage status; returns the server's copy
    async fn set_feedback_status(&self, id: i64, status: FeedbackStatus) -> Result<FeedbackEntry>;

    /// Fetch the KPI overview payload
    async fn kpi_overview(&self) -> Result<KpiOverview>;
}
