//! Route table for the console

/// A console page address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The login form
    Login,
    /// The overview dashboard
    Dashboard,
    /// KPI analytics
    Kpis,
    /// User management
    Users,
    /// Listing moderation
    Listings,
    /// Feedback triage
    Feedback,
    /// Anything that matches no known path
    NotFound,
}

impl Route {
    /// The canonical path for this route
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Dashboard => "/dashboard",
            Self::Kpis => "/dashboard/kpis",
            Self::Users => "/dashboard/users",
            Self::Listings => "/dashboard/listings",
            Self::Feedback => "/dashboard/feedback",
            Self::NotFound => "/404",
        }
    }

    /// Whether the route sits behind the session gate
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }
}

/// Resolve a request path to a route
///
/// A single trailing slash is tolerated; anything unrecognized resolves
/// to [`Route::NotFound`].
#[must_use]
pub fn resolve(path: &str) -> Route {
    let normalized = match path {
        "/" => "/",
        other => other.strip_suffix('/').unwrap_or(other),
    };

    match normalized {
        "/" => Route::Login,
        "/dashboard" => Route::Dashboard,
        "/dashboard/kpis" => Route::Kpis,
        "/dashboard/users" => Route::Users,
        "/dashboard/listings" => Route::Listings,
        "/dashboard/feedback" => Route::Feedback,
        _ => Route::NotFound,
    }
}

/// Where a visitor lands: the dashboard when already authenticated,
/// otherwise the login form
#[must_use]
pub const fn entry_route(authenticated: bool) -> Route {
    if authenticated {
        Route::Dashboard
    } else {
        Route::Login
    }
}
