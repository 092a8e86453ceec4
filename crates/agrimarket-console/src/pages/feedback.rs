//! Feedback triage page state

use crate::pages::{RemoteData, Selection};
use crate::reconcile::{MutationIntent, Outcome, PendingSet, reconcile_feedback};
use agrimarket_client::MarketplaceApi;
use agrimarket_core::filter::{FeedbackTotals, Predicate, feedback_totals, filter_collection};
use agrimarket_core::types::{FeedbackCategory, FeedbackEntry, FeedbackStatus};
use tracing::{info, warn};

/// View state for the feedback triage page
#[derive(Debug, Default)]
pub struct FeedbackPage {
    collection: RemoteData<Vec<FeedbackEntry>>,
    /// Search box value, matched against subject, message and user
    pub search: String,
    /// Category dropdown value
    pub category_filter: Selection<FeedbackCategory>,
    /// Status dropdown value
    pub status_filter: Selection<FeedbackStatus>,
    pending: PendingSet,
}

impl FeedbackPage {
    /// Create an empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-fetch the feedback collection
    pub async fn refresh(&mut self, api: &dyn MarketplaceApi) {
        let epoch = self.collection.begin_refresh();
        let result = api.list_feedback().await;
        self.collection.complete_refresh(epoch, result);
    }

    /// The full snapshot
    #[must_use]
    pub fn entries(&self) -> &[FeedbackEntry] {
        self.collection.get()
    }

    /// The rows all three filters admit, in snapshot order
    #[must_use]
    pub fn visible(&self) -> Vec<&FeedbackEntry> {
        let predicates = [
            Predicate::search(&self.search),
            Predicate::test(|e: &FeedbackEntry| self.category_filter.admits(&e.category)),
            Predicate::test(|e: &FeedbackEntry| self.status_filter.admits(&e.status)),
        ];
        filter_collection(self.collection.get(), &predicates)
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

    /// Move an entry to a new triage status and reconcile against the
    /// server's returned copy
    pub async fn set_status(
        &mut self,
        api: &dyn MarketplaceApi,
        id: i64,
        status: FeedbackStatus,
    ) -> Outcome {
        if !self.collection.get().iter().any(|e| e.id == id) {
            return Outcome::Rejected(format!("feedback {id} not found"));
        }
        if !self.pending.begin(id) {
            return Outcome::Rejected("mutation already pending".to_string());
        }

        let intent = MutationIntent::SetFeedbackStatus { id, status };
        let result = api.set_feedback_status(id, status).await;
        self.pending.finish(id);

        match result {
            // The PATCH returns the updated record, so the server copy
            // supersedes a plain local status patch.
            Ok(server_copy) => {
                reconcile_feedback(self.collection.get_mut(), server_copy);
                info!(%intent, "feedback status updated");
                Outcome::Applied
            }
            Err(err) => {
                let message = err.to_string();
                warn!(%intent, error = %message, "feedback mutation rejected");
                self.collection.set_error(message.clone());
                Outcome::Rejected(message)
            }
        }
    }

    /// Headline figures for the summary cards
    #[must_use]
    pub fn totals(&self) -> FeedbackTotals {
        feedback_totals(self.collection.get())
    }
}
