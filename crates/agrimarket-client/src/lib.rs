//! HTTP client and service contract for the `AgriMarket` admin API

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod client;
pub mod mock;
pub mod service;

// Re-export commonly used types
pub use client::ApiClient;
pub use mock::MockMarketplaceApi;
pub use service::{LoginRequest, MarketplaceApi};
