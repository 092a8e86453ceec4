//! Integration tests for the HTTP client against a stub server

mod common;

use agrimarket_client::{ApiClient, LoginRequest, MarketplaceApi};
use agrimarket_core::Error;
use agrimarket_core::types::{FeedbackStatus, ListingStatus};
use common::helpers::{init_test_logging, mount_error, mount_get_json};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn login_returns_token_and_user() {
    init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .and(body_json(json!({"username": "Admin", "password": "Admin1234"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc123",
            "user": {"id": 1, "username": "Admin", "email": "admin@example.com", "is_staff": true}
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let response = client
        .login(&LoginRequest::new("Admin", "Admin1234"))
        .await
        .unwrap();

    assert_eq!(response.token, "abc123");
    assert_eq!(response.user.username, "Admin");
    assert!(response.user.is_staff);
}

#[tokio::test]
async fn rejected_login_is_an_authentication_error() {
    let server = MockServer::start().await;
    mount_error(&server, "POST", "/auth/login/", 400, "Invalid credentials").await;

    let client = ApiClient::new(server.uri());
    let err = client
        .login(&LoginRequest::new("Admin", "wrong"))
        .await
        .unwrap_err();

    match err {
        Error::Authentication(message) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected authentication error, got {other:?}"),
    }
}

#[tokio::test]
async fn disabled_account_login_is_an_authentication_error() {
    let server = MockServer::start().await;
    mount_error(&server, "POST", "/auth/login/", 403, "Account is disabled").await;

    let client = ApiClient::new(server.uri());
    let err = client
        .login(&LoginRequest::new("Admin", "Admin1234"))
        .await
        .unwrap_err();

    assert!(err.is_authentication());
    assert!(err.to_string().contains("Account is disabled"));
}

#[tokio::test]
async fn token_header_is_sent_once_logged_in() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/"))
        .and(header("Authorization", "Token abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    client.set_token("abc123");

    let users = client.list_users().await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn session_check_deserializes_both_shapes() {
    let server = MockServer::start().await;
    mount_get_json(
        &server,
        "/auth/check/",
        200,
        json!({"is_authenticated": false}),
    )
    .await;

    let client = ApiClient::new(server.uri());
    let status = client.check_session().await.unwrap();
    assert!(!status.is_authenticated);
    assert!(status.user.is_none());
}

#[tokio::test]
async fn listings_parse_wire_records() {
    let server = MockServer::start().await;
    mount_get_json(
        &server,
        "/listings/",
        200,
        json!([{
            "id": 1,
            "title": "Organic Tomatoes - 5kg",
            "seller": "GreenAcres Farm",
            "category": "Crops",
            "price": 125,
            "status": "active",
            "views": 1520,
            "sales": 156,
            "created_at": "2025-06-01"
        }]),
    )
    .await;

    let client = ApiClient::new(server.uri());
    let listings = client.list_listings().await.unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].status, ListingStatus::Active);
    assert_eq!(listings[0].revenue(), 125 * 156);
}

#[tokio::test]
async fn listing_patch_sends_status_and_returns_server_copy() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/listings/4/"))
        .and(body_json(json!({"status": "active"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4,
            "title": "Fresh Honey - 10L",
            "seller": "Hillside Apiary",
            "category": "Crops",
            "price": 85,
            "status": "active",
            "views": 210,
            "sales": 0,
            "created_at": "2025-06-01"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let listing = client
        .set_listing_status(4, ListingStatus::Active)
        .await
        .unwrap();

    assert_eq!(listing.id, 4);
    assert_eq!(listing.status, ListingStatus::Active);
}

#[tokio::test]
async fn feedback_patch_uses_kebab_case_status() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/feedback/3/"))
        .and(body_json(json!({"status": "in-progress"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "user": "miller",
            "rating": 3,
            "category": "suggestion",
            "subject": "Bulk pricing tiers",
            "message": "Let sellers offer discounts.",
            "date": "2025-07-15",
            "status": "in-progress"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let entry = client
        .set_feedback_status(3, FeedbackStatus::InProgress)
        .await
        .unwrap();

    assert_eq!(entry.status, FeedbackStatus::InProgress);
}

#[tokio::test]
async fn superuser_suspend_surfaces_the_server_message() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        "POST",
        "/users/1/suspend/",
        403,
        "Cannot suspend superuser account",
    )
    .await;

    let client = ApiClient::new(server.uri());
    let err = client.set_user_active(1, false).await.unwrap_err();

    // 403 maps into the authentication arm of the taxonomy
    match err {
        Error::Authentication(message) => {
            assert_eq!(message, "Cannot suspend superuser account");
        }
        other => panic!("expected authentication error, got {other:?}"),
    }
}

#[tokio::test]
async fn unsuspend_posts_to_the_unsuspend_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/9/unsuspend/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "active"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    client.set_user_active(9, true).await.unwrap();
}

#[tokio::test]
async fn missing_resource_maps_to_not_found() {
    let server = MockServer::start().await;
    mount_error(&server, "DELETE", "/listings/42/", 404, "Listing not found").await;

    let client = ApiClient::new(server.uri());
    let err = client.delete_listing(42).await.unwrap_err();

    match err {
        Error::NotFound { resource } => assert_eq!(resource, "Listing not found"),
        other => panic!("expected not-found error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_keeps_status_and_message() {
    let server = MockServer::start().await;
    mount_error(&server, "GET", "/kpis/overview/", 500, "database unavailable").await;

    let client = ApiClient::new(server.uri());
    let err = client.kpi_overview().await.unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_the_status_reason() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = client.list_users().await.unwrap_err();

    match err {
        Error::Api { status, .. } => assert_eq!(status, 502),
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_refused_is_a_network_error() {
    // Nothing listens on this port
    let client = ApiClient::new("http://127.0.0.1:1");
    let err = client.list_users().await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}
