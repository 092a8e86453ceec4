//! Mock marketplace API for testing

use crate::service::{LoginRequest, MarketplaceApi};
use agrimarket_core::types::{
    FeedbackEntry, FeedbackStatus, KpiOverview, Listing, ListingStatus, LoginResponse, SessionUser,
    SessionStatus, UserAccount,
};
use agrimarket_core::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::time::{Duration, sleep};

/// Mock marketplace API for testing
///
/// Holds collections in memory and answers every trait method against
/// them, so page stores and the reconciler can be exercised without a
/// network.
#[derive(Debug)]
pub struct MockMarketplaceApi {
    /// Accepted credentials, if login should succeed
    credentials: Option<(String, String)>,

    /// Simulated round-trip delay
    response_delay_ms: u64,

    /// Should fail every request
    should_fail: bool,

    /// Failure message
    failure_message: String,

    /// In-memory collections
    users: Arc<Mutex<Vec<UserAccount>>>,
    listings: Arc<Mutex<Vec<Listing>>>,
    feedback: Arc<Mutex<Vec<FeedbackEntry>>>,
    kpis: Arc<Mutex<KpiOverview>>,

    /// Per-method call tracking
    calls: Arc<Mutex<HashMap<&'static str, usize>>>,
}

impl MockMarketplaceApi {
    /// Create an empty mock
    pub fn new() -> Self {
        Self {
            credentials: None,
            response_delay_ms: 0,
            should_fail: false,
            failure_message: "Mock failure".to_string(),
            users: Arc::new(Mutex::new(Vec::new())),
            listings: Arc::new(Mutex::new(Vec::new())),
            feedback: Arc::new(Mutex::new(Vec::new())),
            kpis: Arc::new(Mutex::new(KpiOverview::default())),
            calls: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed the user collection
    #[must_use]
    pub fn with_users(self, users: Vec<UserAccount>) -> Self {
        *self.users.lock().unwrap() = users;
        self
    }

    /// Seed the listing collection
    #[must_use]
    pub fn with_listings(self, listings: Vec<Listing>) -> Self {
        *self.listings.lock().unwrap() = listings;
        self
    }

    /// Seed the feedback collection
    #[must_use]
    pub fn with_feedback(self, feedback: Vec<FeedbackEntry>) -> Self {
        *self.feedback.lock().unwrap() = feedback;
        self
    }

    /// Seed the KPI overview payload
    #[must_use]
    pub fn with_kpis(self, kpis: KpiOverview) -> Self {
        *self.kpis.lock().unwrap() = kpis;
        self
    }

    /// Accept this username/password pair at login
    #[must_use]
    pub fn with_login(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Set a response delay for testing
    #[must_use]
    pub const fn with_delay(mut self, delay_ms: u64) -> Self {
        self.response_delay_ms = delay_ms;
        self
    }

    /// Configure to fail every request
    #[must_use]
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.should_fail = true;
        self.failure_message = message.into();
        self
    }

    /// Number of times a trait method was invoked
    pub fn call_count(&self, method: &str) -> usize {
        self.calls.lock().unwrap().get(method).copied().unwrap_or(0)
    }

    async fn begin(&self, method: &'static str) -> Result<()> {
        *self.calls.lock().unwrap().entry(method).or_insert(0) += 1;

        if self.response_delay_ms > 0 {
            sleep(Duration::from_millis(self.response_delay_ms)).await;
        }

        if self.should_fail {
            return Err(Error::Network(self.failure_message.clone()));
        }
        Ok(())
    }

    fn session_user(&self) -> SessionUser {
        self.credentials.as_ref().map_or_else(
            || SessionUser {
                id: 1,
                username: "admin".to_string(),
                email: "admin@example.com".to_string(),
                is_staff: true,
            },
            |(username, _)| SessionUser {
                id: 1,
                username: username.clone(),
                email: format!("{username}@example.com"),
                is_staff: true,
            },
        )
    }
}

impl Default for MockMarketplaceApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketplaceApi for MockMarketplaceApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.begin("login").await?;

        match &self.credentials {
            Some((username, password))
                if *username == request.username && *password == request.password =>
            {
                Ok(LoginResponse {
                    token: "mock-token".to_string(),
                    user: self.session_user(),
                })
            }
            _ => Err(Error::Authentication("Invalid credentials".to_string())),
        }
    }

    async fn check_session(&self) -> Result<SessionStatus> {
        self.begin("check_session").await?;

        Ok(SessionStatus {
            is_authenticated: self.credentials.is_some(),
            user: self.credentials.as_ref().map(|_| self.session_user()),
        })
    }

    async fn list_users(&self) -> Result<Vec<UserAccount>> {
        self.begin("list_users").await?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn set_user_active(&self, id: i64, active: bool) -> Result<()> {
        self.begin("set_user_active").await?;

        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| Error::NotFound {
                resource: format!("user {id}"),
            })?;

        if !active && user.is_superuser {
            return Err(Error::Api {
                status: 403,
                message: "Cannot suspend superuser account".to_string(),
            });
        }

        user.is_active = active;
        Ok(())
    }

    async fn list_listings(&self) -> Result<Vec<Listing>> {
        self.begin("list_listings").await?;
        Ok(self.listings.lock().unwrap().clone())
    }

    async fn set_listing_status(&self, id: i64, status: ListingStatus) -> Result<Listing> {
        self.begin("set_listing_status").await?;

        let mut listings = self.listings.lock().unwrap();
        let listing = listings
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| Error::NotFound {
                resource: format!("listing {id}"),
            })?;

        listing.status = status;
        Ok(listing.clone())
    }

    async fn delete_listing(&self, id: i64) -> Result<()> {
        self.begin("delete_listing").await?;

        let mut listings = self.listings.lock().unwrap();
        let before = listings.len();
        listings.retain(|l| l.id != id);

        if listings.len() == before {
            return Err(Error::NotFound {
                resource: format!("listing {id}"),
            });
        }
        Ok(())
    }

    async fn list_feedback(&self) -> Result<Vec<FeedbackEntry>> {
        self.begin("list_feedback").await?;
        Ok(self.feedback.lock().unwrap().clone())
    }

    async fn set_feedback_status(&self, id: i64, status: FeedbackStatus) -> Result<FeedbackEntry> {
        self.begin("set_feedback_status").await?;

        let mut feedback = self.feedback.lock().unwrap();
        let entry = feedback
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| Error::NotFound {
                resource: format!("feedback {id}"),
            })?;

        entry.status = status;
        Ok(entry.clone())
    }

    async fn kpi_overview(&self) -> Result<KpiOverview> {
        self.begin("kpi_overview").await?;
        Ok(self.kpis.lock().unwrap().clone())
    }
}
