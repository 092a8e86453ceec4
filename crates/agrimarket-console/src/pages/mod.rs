//! Per-page view state
//!
//! One store per console page. A store exclusively owns its snapshot of
//! the remote data plus the page's local filter state, and exposes the
//! view models a presentation layer renders. Stores are plain values
//! driven from one task; nothing here is shared across pages.

pub mod dashboard;
pub mod feedback;
pub mod kpis;
pub mod listings;
pub mod users;

pub use dashboard::DashboardPage;
pub use feedback::FeedbackPage;
pub use kpis::KpiPage;
pub use listings::ListingsPage;
pub use users::UsersPage;

use agrimarket_core::Result;

/// A filter dropdown value: either the "all" sentinel or one choice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection<T> {
    /// Match everything
    #[default]
    All,
    /// Match only this value
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// Whether the value passes this selection
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

/// A snapshot of remote data with refresh bookkeeping
///
/// Refreshes are epoch-stamped: `begin_refresh` supersedes every earlier
/// refresh, and a completion carrying a stale epoch is discarded instead
/// of applied. Navigating away and back, or mashing the refresh control,
/// can therefore never resurrect old data over newer data.
#[derive(Debug, Default)]
pub struct RemoteData<T> {
    data: T,
    epoch: u64,
    loading: bool,
    last_error: Option<String>,
}

impl<T: Default> RemoteData<T> {
    /// Create an empty snapshot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh; the returned epoch must accompany its completion
    pub fn begin_refresh(&mut self) -> u64 {
        self.epoch += 1;
        self.loading = true;
        self.last_error = None;
        self.epoch
    }

    /// Finish a refresh. Returns false (and changes nothing) when the
    /// epoch was superseded by a newer `begin_refresh`.
    pub fn complete_refresh(&mut self, epoch: u64, result: Result<T>) -> bool {
        if epoch != self.epoch {
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => self.data = data,
            Err(err) => self.last_error = Some(err.to_string()),
        }
        true
    }

    /// The current snapshot
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.data
    }

    /// Mutable access for the reconciler
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Whether a refresh is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The most recent request failure, if any
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Record a failure from a mutation request
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }
}
