//! Tests against a running server
//!
//! Start the server, then run with: cargo test -- --ignored

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

#[tokio::test]
#[ignore]
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
async fn test_ready_reaches_database() {
    let response = client()
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_home_counts() {
    let response = client()
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["template"], "index");
    assert!(body["data"]["book_count"].is_i64());
}

#[tokio::test]
#[ignore]
async fn test_create_genre_redirects() {
    let response = client()
        .post(format!("{}/catalog/genre/create", BASE_URL))
        .form(&[("name", "Live Test Genre")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()["location"].to_str().unwrap();
    assert!(location.starts_with("/catalog/genre/"));
}

#[tokio::test]
#[ignore]
async fn test_unknown_book_is_not_found() {
    let response = client()
        .get(format!("{}/catalog/book/00000000-0000-0000-0000-000000000000", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
