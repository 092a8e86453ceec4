//! Listing moderation page state

use crate::pages::{RemoteData, Selection};
use crate::reconcile::{MutationIntent, Outcome, PendingSet, apply_mutation, reconcile_listing};
use agrimarket_client::MarketplaceApi;
use agrimarket_core::filter::{
    AggregateRow, ListingTotals, Predicate, category_performance, filter_collection,
    listing_totals, top_listings,
};
use agrimarket_core::types::{Listing, ListingStatus};
use tracing::{info, warn};

/// View state for the listing moderation page
#[derive(Debug, Default)]
pub struct ListingsPage {
    collection: RemoteData<Vec<Listing>>,
    /// Search box value, matched against title and seller
    pub search: String,
    /// Status dropdown value
    pub status_filter: Selection<ListingStatus>,
    /// Category dropdown value
    pub category_filter: Selection<String>,
    pending: PendingSet,
}

impl ListingsPage {
    /// Create an empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-fetch the listing collection
    pub async fn refresh(&mut self, api: &dyn MarketplaceApi) {
        let epoch = self.collection.begin_refresh();
        let result = api.list_listings().await;
        self.collection.complete_refresh(epoch, result);
    }

    /// The full snapshot
    #[must_use]
    pub fn listings(&self) -> &[Listing] {
        self.collection.get()
    }

    /// The rows all three filters admit, in snapshot order
    #[must_use]
    pub fn visible(&self) -> Vec<&Listing> {
        let predicates = [
            Predicate::search(&self.search),
            Predicate::test(|l: &Listing| self.status_filter.admits(&l.status)),
            Predicate::test(|l: &Listing| self.category_filter.admits(&l.category)),
        ];
        filter_collection(self.collection.get(), &predicates)
    }

    /// Category names present in the snapshot, first-seen order
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for listing in self.collection.get() {
            if !seen.contains(&listing.category.as_str()) {
                seen.push(listing.category.as_str());
            }
        }
        seen
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

    /// Approve a listing (move it to active)
    pub async fn approve(&mut self, api: &dyn MarketplaceApi, id: i64) -> Outcome {
        self.set_status(api, id, ListingStatus::Active).await
    }

    /// Reject a listing
    pub async fn reject(&mut self, api: &dyn MarketplaceApi, id: i64) -> Outcome {
        self.set_status(api, id, ListingStatus::Rejected).await
    }

    /// Change a listing's moderation status and reconcile against the
    /// server's returned copy
    pub async fn set_status(
        &mut self,
        api: &dyn MarketplaceApi,
        id: i64,
        status: ListingStatus,
    ) -> Outcome {
        if !self.collection.get().iter().any(|l| l.id == id) {
            return Outcome::Rejected(format!("listing {id} not found"));
        }
        if !self.pending.begin(id) {
            return Outcome::Rejected("mutation already pending".to_string());
        }

        let intent = MutationIntent::SetListingStatus { id, status };
        let result = api.set_listing_status(id, status).await;
        self.pending.finish(id);

        match result {
            // The PATCH returns the updated record, so the server copy
            // supersedes a plain local status patch.
            Ok(server_copy) => {
                reconcile_listing(self.collection.get_mut(), server_copy);
                info!(%intent, "listing status updated");
                Outcome::Applied
            }
            Err(err) => {
                let message = err.to_string();
                warn!(%intent, error = %message, "listing mutation rejected");
                self.collection.set_error(message.clone());
                Outcome::Rejected(message)
            }
        }
    }

    /// Permanently delete a listing
    pub async fn delete(&mut self, api: &dyn MarketplaceApi, id: i64) -> Outcome {
        if !self.collection.get().iter().any(|l| l.id == id) {
            return Outcome::Rejected(format!("listing {id} not found"));
        }
        if !self.pending.begin(id) {
            return Outcome::Rejected("mutation already pending".to_string());
        }

        let intent = MutationIntent::DeleteListing { id };
        let result = api.delete_listing(id).await;
        self.pending.finish(id);

        match result {
            Ok(()) => {
                info!(%intent, "listing deleted");
                apply_mutation(self.collection.get_mut(), &intent)
            }
            Err(err) => {
                let message = err.to_string();
                warn!(%intent, error = %message, "listing deletion rejected");
                self.collection.set_error(message.clone());
                Outcome::Rejected(message)
            }
        }
    }

    /// Per-category rollup for the performance table
    #[must_use]
    pub fn category_performance(&self) -> Vec<AggregateRow> {
        category_performance(self.collection.get())
    }

    /// Top sellers card: the five highest-revenue listings
    #[must_use]
    pub fn top_listings(&self) -> Vec<&Listing> {
        top_listings(self.collection.get(), 5)
    }

    /// Headline figures for the summary cards
    #[must_use]
    pub fn totals(&self) -> ListingTotals {
        listing_totals(self.collection.get())
    }
}
