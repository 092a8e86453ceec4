//! Optimistic mutation reconciliation
//!
//! Every row action follows the same lifecycle: mark the row pending,
//! send the request, then reconcile the local collection against the
//! server's answer. The server copy is authoritative; a rejected action
//! leaves the collection exactly as it was.

use agrimarket_core::types::{FeedbackEntry, FeedbackStatus, Listing, ListingStatus, UserAccount};
use std::collections::HashSet;
use std::fmt;

/// A row-level action the operator asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationIntent {
    /// Move a listing to a new moderation status
    SetListingStatus {
        /// Target listing
        id: i64,
        /// New status
        status: ListingStatus,
    },
    /// Permanently delete a listing
    DeleteListing {
        /// Target listing
        id: i64,
    },
    /// Suspend (`active = false`) or reinstate (`active = true`) a user
    SetUserActive {
        /// Target user
        id: i64,
        /// New active flag
        active: bool,
    },
    /// Move a feedback entry to a new triage status
    SetFeedbackStatus {
        /// Target entry
        id: i64,
        /// New status
        status: FeedbackStatus,
    },
}

impl MutationIntent {
    /// The row the intent targets
    #[must_use]
    pub const fn target_id(&self) -> i64 {
        match self {
            Self::SetListingStatus { id, .. }
            | Self::DeleteListing { id }
            | Self::SetUserActive { id, .. }
            | Self::SetFeedbackStatus { id, .. } => *id,
        }
    }
}

impl fmt::Display for MutationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetListingStatus { id, status } => {
                write!(f, "set listing {id} status to {status}")
            }
            Self::DeleteListing { id } => write!(f, "delete listing {id}"),
            Self::SetUserActive { id, active: false } => write!(f, "suspend user {id}"),
            Self::SetUserActive { id, active: true } => write!(f, "unsuspend user {id}"),
            Self::SetFeedbackStatus { id, status } => {
                write!(f, "set feedback {id} status to {status}")
            }
        }
    }
}

/// How a mutation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server accepted the mutation and the collection was updated
    Applied,
    /// The server (or a local guard) refused it; the collection is unchanged
    Rejected(String),
}

impl Outcome {
    /// Whether the mutation was applied
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Rows with an in-flight mutation
///
/// A row admits one mutation at a time. Asking again while the first is
/// still unacknowledged is rejected locally, before any request is made.
#[derive(Debug, Default)]
pub struct PendingSet {
    ids: HashSet<i64>,
}

impl PendingSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a row pending; returns false if it already was
    pub fn begin(&mut self, id: i64) -> bool {
        self.ids.insert(id)
    }

    /// Clear a row's pending marker once its mutation is acknowledged
    pub fn finish(&mut self, id: i64) {
        self.ids.remove(&id);
    }

    /// Whether a row has an in-flight mutation
    #[must_use]
    pub fn is_pending(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// Number of rows currently pending
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no rows are pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A page snapshot an acknowledged [`MutationIntent`] can be applied to
pub trait Reconcile {
    /// Apply the intent locally; the snapshot is untouched on rejection
    fn apply(&mut self, intent: &MutationIntent) -> Outcome;
}

/// Apply an acknowledged mutation to the snapshot it targets
///
/// The result of `applyMutation(snapshot, intent)`: on a status-change
/// intent the matching row's field is replaced, on a delete intent the
/// row is removed, and every other row is left untouched. An intent
/// whose target is missing, or that belongs to a different collection,
/// is rejected without modifying the snapshot.
pub fn apply_mutation<S: Reconcile>(snapshot: &mut S, intent: &MutationIntent) -> Outcome {
    snapshot.apply(intent)
}

impl Reconcile for Vec<UserAccount> {
    fn apply(&mut self, intent: &MutationIntent) -> Outcome {
        match *intent {
            MutationIntent::SetUserActive { id, active } => {
                if reconcile_user_active(self, id, active) {
                    Outcome::Applied
                } else {
                    Outcome::Rejected(format!("user {id} not found"))
                }
            }
            _ => Outcome::Rejected(format!("{intent} does not target users")),
        }
    }
}

impl Reconcile for Vec<Listing> {
    fn apply(&mut self, intent: &MutationIntent) -> Outcome {
        match *intent {
            MutationIntent::SetListingStatus { id, status } => {
                let patched = self
                    .iter_mut()
                    .find(|l| l.id == id)
                    .map(|listing| listing.status = status)
                    .is_some();
                if patched {
                    Outcome::Applied
                } else {
                    Outcome::Rejected(format!("listing {id} not found"))
                }
            }
            MutationIntent::DeleteListing { id } => {
                if remove_listing(self, id) {
                    Outcome::Applied
                } else {
                    Outcome::Rejected(format!("listing {id} not found"))
                }
            }
            _ => Outcome::Rejected(format!("{intent} does not target listings")),
        }
    }
}

impl Reconcile for Vec<FeedbackEntry> {
    fn apply(&mut self, intent: &MutationIntent) -> Outcome {
        match *intent {
            MutationIntent::SetFeedbackStatus { id, status } => {
                let patched = self
                    .iter_mut()
                    .find(|f| f.id == id)
                    .map(|entry| entry.status = status)
                    .is_some();
                if patched {
                    Outcome::Applied
                } else {
                    Outcome::Rejected(format!("feedback {id} not found"))
                }
            }
            _ => Outcome::Rejected(format!("{intent} does not target feedback")),
        }
    }
}

/// Replace a listing with the server's acknowledged copy
///
/// Position in the collection is preserved. Returns false when the row
/// no longer exists locally (it was removed by a refresh in between).
pub fn reconcile_listing(listings: &mut [Listing], server_copy: Listing) -> bool {
    listings
        .iter_mut()
        .find(|l| l.id == server_copy.id)
        .map(|slot| *slot = server_copy)
        .is_some()
}

/// Remove a listing after the server acknowledged its deletion
pub fn remove_listing(listings: &mut Vec<Listing>, id: i64) -> bool {
    let before = listings.len();
    listings.retain(|l| l.id != id);
    listings.len() != before
}

/// Patch a user's active flag after the server acknowledged the change
///
/// The suspend endpoints return no user payload, so the local copy is
/// patched in place rather than replaced.
pub fn reconcile_user_active(users: &mut [UserAccount], id: i64, active: bool) -> bool {
    users
        .iter_mut()
        .find(|u| u.id == id)
        .map(|user| user.is_active = active)
        .is_some()
}

/// Replace a feedback entry with the server's acknowledged copy
pub fn reconcile_feedback(feedback: &mut [FeedbackEntry], server_copy: FeedbackEntry) -> bool {
    feedback
        .iter_mut()
        .find(|f| f.id == server_copy.id)
        .map(|slot| *slot = server_copy)
        .is_some()
}
