//! User management page state

use crate::pages::RemoteData;
use crate::reconcile::{MutationIntent, Outcome, PendingSet, apply_mutation};
use agrimarket_client::MarketplaceApi;
use agrimarket_core::filter::{Predicate, filter_collection};
use agrimarket_core::types::UserAccount;
use tracing::{info, warn};

/// View state for the user management page
#[derive(Debug, Default)]
pub struct UsersPage {
    collection: RemoteData<Vec<UserAccount>>,
    /// Search box value, matched against username and email
    pub search: String,
    pending: PendingSet,
}

impl UsersPage {
    /// Create an empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-fetch the user collection
    pub async fn refresh(&mut self, api: &dyn MarketplaceApi) {
        let epoch = self.collection.begin_refresh();
        let result = api.list_users().await;
        self.collection.complete_refresh(epoch, result);
    }

    /// The full snapshot
    #[must_use]
    pub fn users(&self) -> &[UserAccount] {
        self.collection.get()
    }

    /// The rows the current search admits, in snapshot order
    #[must_use]
    pub fn visible(&self) -> Vec<&UserAccount> {
        filter_collection(self.collection.get(), &[Predicate::search(&self.search)])
    }

    /// Whether a row has an unacknowledged mutation
    #[must_use]
    pub fn is_pending(&self, id: i64) -> bool {
        self.pending.is_pending(id)
    }

    /// The most recent request failure, if any
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.collection.last_error()
    }

    /// Suspend an active user, or reinstate a suspended one
    ///
    /// Superuser accounts are refused locally, mirroring the server rule,
    /// so no request is made for them.
    pub async fn toggle_active(&mut self, api: &dyn MarketplaceApi, id: i64) -> Outcome {
        let Some(user) = self.collection.get().iter().find(|u| u.id == id) else {
            return Outcome::Rejected(format!("user {id} not found"));
        };

        if user.is_superuser && user.is_active {
            return Outcome::Rejected("Cannot suspend superuser account".to_string());
        }

        if !self.pending.begin(id) {
            return Outcome::Rejected("mutation already pending".to_string());
        }

        let intent = MutationIntent::SetUserActive {
            id,
            active: !user.is_active,
        };
        let result = api.set_user_active(id, !user.is_active).await;
        self.pending.finish(id);

        match result {
            Ok(()) => {
                info!(%intent, "user account updated");
                apply_mutation(self.collection.get_mut(), &intent)
            }
            Err(err) => {
                let message = err.to_string();
                warn!(%intent, error = %message, "user mutation rejected");
                self.collection.set_error(message.clone());
                Outcome::Rejected(message)
            }
        }
    }

    /// Counts for the page summary cards: (total, active, suspended)
    #[must_use]
    pub fn totals(&self) -> (usize, usize, usize) {
        let total = self.collection.get().len();
        let active = self
            .collection
            .get()
            .iter()
            .filter(|u| u.is_active)
            .count();
        (total, active, total - active)
    }
}
