//! Authenticated session handling

use agrimarket_client::{LoginRequest, MarketplaceApi};
use agrimarket_core::types::SessionUser;
use agrimarket_core::{Error, Result};
use tracing::info;

/// An established operator session
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    user: SessionUser,
}

impl Session {
    /// Log in with the given credentials
    ///
    /// Credentials are validated locally first, so empty fields never go
    /// on the wire.
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty fields, an authentication
    /// error for refused credentials, or a network error.
    pub async fn establish(
        api: &dyn MarketplaceApi,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        let request = LoginRequest::new(username, password).validated()?;
        let response = api.login(&request).await?;

        info!(username = %response.user.username, "session established");
        Ok(Self {
            token: response.token,
            user: response.user,
        })
    }

    /// Ask the server whether the current token still holds a session
    ///
    /// # Errors
    ///
    /// An unauthenticated answer comes back as an authentication error;
    /// transport failures are passed through.
    pub async fn verify(api: &dyn MarketplaceApi) -> Result<SessionUser> {
        let status = api.check_session().await?;

        if status.is_authenticated {
            status.user.ok_or_else(|| {
                Error::Other("session check returned no user for a live session".to_string())
            })
        } else {
            Err(Error::Authentication("session expired".to_string()))
        }
    }

    /// The API token this session holds
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The operator this session belongs to
    #[must_use]
    pub const fn user(&self) -> &SessionUser {
        &self.user
    }
}
