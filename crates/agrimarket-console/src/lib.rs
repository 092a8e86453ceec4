//! View state, reconciliation and routing for the `AgriMarket` admin
//! console
//!
//! The crate holds everything between the HTTP client and a presentation
//! layer: per-page stores over remote snapshots, the optimistic mutation
//! reconciler, the session gate and the route table.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod pages;
pub mod reconcile;
pub mod routes;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use pages::{DashboardPage, FeedbackPage, KpiPage, ListingsPage, UsersPage};
pub use reconcile::{MutationIntent, Outcome, PendingSet, apply_mutation};
pub use routes::{Route, entry_route, resolve};
pub use session::Session;
pub use state::AppState;
