//! Smoke tests against a running server
//!
//! Start the server (for example with `CATALOG_DATABASE__URL=memory://`) and
//! run with: cargo test --test api_tests -- --ignored

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> Client {
    Client::builder().redirect(Policy::none()).build().expect("Failed to build client")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_catalog_home() {
    let response = client()
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(StatusCode::OK, response.status());
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Local Library Home"));
}

#[tokio::test]
#[ignore]
async fn test_create_genre_and_follow_redirect() {
    let client = client();
    let name = format!("Smoke{}", std::process::id());

    let response = client
        .post(format!("{}/catalog/genre/create", BASE_URL))
        .form(&[("name", name.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(StatusCode::FOUND, response.status());
    let location = response.headers()["location"].to_str().expect("Bad location").to_string();
    assert!(location.starts_with("/catalog/genre/"));

    let body = client
        .get(format!("{}{}", BASE_URL, location))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains(&name));
}

#[tokio::test]
#[ignore]
async fn test_missing_book_is_404() {
    let response = client()
        .get(format!("{}/catalog/book/00000000-0000-4000-8000-000000000000", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(StatusCode::NOT_FOUND, response.status());
}
