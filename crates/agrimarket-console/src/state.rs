//! Application state

use crate::session::Session;
use agrimarket_client::{ApiClient, MarketplaceApi};
use agrimarket_core::{Config, Result};
use std::sync::Arc;

/// Everything the console pages share: configuration, the API handle
/// and the current session
///
/// The API is injected as a trait object so tests run against the mock;
/// there are no globals.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// API handle the page stores fetch and mutate through
    pub api: Arc<dyn MarketplaceApi>,
    /// The current session, once established
    pub session: Option<Session>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Build state with a real HTTP client from the configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the HTTP client cannot be
    /// constructed.
    pub fn connect(config: Config) -> Result<(Self, ApiClient)> {
        let client = ApiClient::from_config(&config.api)?;
        let state = Self {
            config,
            api: Arc::new(client.clone()),
            session: None,
        };
        Ok((state, client))
    }

    /// Build state around an injected API implementation
    pub fn with_api(config: Config, api: Arc<dyn MarketplaceApi>) -> Self {
        Self {
            config,
            api,
            session: None,
        }
    }

    /// Whether an operator session is established
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Log in and hold the resulting session
    ///
    /// # Errors
    ///
    /// Passes through validation, authentication and network errors from
    /// the login exchange.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let session = Session::establish(self.api.as_ref(), username, password).await?;
        self.session = Some(session);
        Ok(())
    }

    /// Drop the current session
    pub fn logout(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrimarket_client::MockMarketplaceApi;
    use crate::routes::{Route, entry_route};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn login_establishes_a_session() {
        let api = Arc::new(MockMarketplaceApi::new().with_login("Admin", "Admin1234"));
        let mut state = AppState::with_api(Config::default(), api);

        assert!(!state.is_authenticated());
        state.login("Admin", "Admin1234").await.unwrap();
        assert!(state.is_authenticated());
        assert_eq!(
            state.session.as_ref().unwrap().user().username,
            "Admin"
        );
    }

    #[tokio::test]
    async fn failed_login_leaves_state_unauthenticated() {
        let api = Arc::new(MockMarketplaceApi::new().with_login("Admin", "Admin1234"));
        let mut state = AppState::with_api(Config::default(), api);

        assert!(state.login("Admin", "wrong").await.is_err());
        assert!(!state.is_authenticated());
        assert_eq!(entry_route(state.is_authenticated()), Route::Login);
    }

    #[tokio::test]
    async fn logout_drops_the_session() {
        let api = Arc::new(MockMarketplaceApi::new().with_login("Admin", "Admin1234"));
        let mut state = AppState::with_api(Config::default(), api);

        state.login("Admin", "Admin1234").await.unwrap();
        state.logout();
        assert!(!state.is_authenticated());
    }
}
