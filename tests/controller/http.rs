//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

use std::sync::Arc;

use serde_json::json;

use crud_sim::catalog::{CatalogStore, RefreshmentPoint};
use crud_sim::Controller;

use crate::support;

/// Bind to port 0 and return the actual address.
async fn start_server(controller: Arc<Controller<RefreshmentPoint, CatalogStore>>) -> String {
    let app = crud_sim::controller::router(controller);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_lists_commands() {
    let base = start_server(support::controller()).await;

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["commands"][0], "refreshment_points.create");
    assert_eq!(body["commands"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn delete_over_http() {
    let base = start_server(support::controller()).await;
    let client = reqwest::Client::new();
    let url = format!("{base}/refreshment_points.delete");

    let resp = client
        .post(&url)
        .json(&json!({ "id": "RP001" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["was_deleted"], true);

    let body: serde_json::Value = client
        .post(&url)
        .json(&json!({ "id": "RP001" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["was_deleted"], false);
}

#[tokio::test]
async fn validation_error_status() {
    let base = start_server(support::controller()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/refreshment_points.create"))
        .json(&json!({ "location": "Pier", "capacity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        body["messages"],
        json!(["name is required", "capacity must be between 1 and 500"])
    );
}

#[tokio::test]
async fn unknown_command_is_404() {
    let base = start_server(support::controller()).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/nope"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
