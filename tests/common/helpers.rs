//! Test helper functions and utilities

use super::fixtures::{FeedbackFixtures, KpiFixtures, ListingFixtures, UserFixtures};
use agrimarket_client::MockMarketplaceApi;
use std::sync::Once;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT_LOGGER: Once = Once::new();

/// Initialize test logging (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// A mock API seeded with the full fixture data set
pub fn seeded_mock() -> MockMarketplaceApi {
    MockMarketplaceApi::new()
        .with_login("Admin", "Admin1234")
        .with_users(UserFixtures::roster())
        .with_listings(ListingFixtures::catalog())
        .with_feedback(FeedbackFixtures::queue())
        .with_kpis(KpiFixtures::overview())
}

/// Mount a JSON response for a GET endpoint
pub async fn mount_get_json(
    server: &MockServer,
    endpoint: &str,
    status: u16,
    body: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a JSON error body of the shape the API uses
pub async fn mount_error(server: &MockServer, http_method: &str, endpoint: &str, status: u16, message: &str) {
    Mock::given(method(http_method))
        .and(path(endpoint))
        .respond_with(
            ResponseTemplate::new(status).set_body_json(serde_json::json!({ "error": message })),
        )
        .mount(server)
        .await;
}
