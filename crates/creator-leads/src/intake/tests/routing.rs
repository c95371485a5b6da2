use super::common::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::intake::router::lead_router;

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn submit_route_returns_created_with_tier_and_receipt() {
    let store = Arc::new(MemoryStore::default());
    let app = lead_router(build_service(store.clone(), Arc::new(RecordingNotifier::default())));

    let response = app
        .oneshot(post_json("/api/v1/leads/submit/brand", &brand_payload()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["leadId"], "brand_collaborations-1");
    assert_eq!(body["tier"]["label"], "Starter Collaboration");
    assert_eq!(body["receipt"]["contentType"], "text/html; charset=utf-8");
    assert_eq!(store.writes().len(), 1);
}

#[tokio::test]
async fn submit_route_returns_field_errors() {
    let store = Arc::new(MemoryStore::default());
    let app = lead_router(build_service(store.clone(), Arc::new(RecordingNotifier::default())));
    let mut payload = freelancer_payload();
    payload["skills"] = json!([]);
    payload["email"] = json!("not-an-email");

    let response = app
        .oneshot(post_json("/api/v1/leads/submit/freelancer", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .filter_map(|error| error["field"].as_str())
        .collect();
    assert_eq!(fields, ["email", "skills"]);
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn submit_route_hides_store_errors() {
    let app = lead_router(build_service(
        Arc::new(UnavailableStore),
        Arc::new(RecordingNotifier::default()),
    ));

    let response = app
        .oneshot(post_json("/api/v1/leads/submit/subscriber", &subscriber_payload()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "An unexpected error occurred. Please try again.");
}

#[tokio::test]
async fn unknown_kinds_and_non_object_bodies_are_rejected() {
    let app = lead_router(build_service(
        Arc::new(MemoryStore::default()),
        Arc::new(RecordingNotifier::default()),
    ));

    let response = app
        .clone()
        .oneshot(post_json("/api/v1/leads/submit/agency", &brand_payload()))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(post_json("/api/v1/leads/submit/brand", &json!([1, 2, 3])))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn schema_route_lists_steps_and_fields() {
    let app = lead_router(build_service(
        Arc::new(MemoryStore::default()),
        Arc::new(RecordingNotifier::default()),
    ));

    let response = app
        .clone()
        .oneshot(get("/api/v1/leads/forms/brand"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let steps: Vec<&str> = body["steps"]
        .as_array()
        .expect("steps array")
        .iter()
        .filter_map(|step| step["name"].as_str())
        .collect();
    assert_eq!(steps, ["Brand Details", "Overview", "Assets", "Budget", "Submit"]);
    assert_eq!(body["steps"][3]["fields"][0]["kind"], "budget");
    assert_eq!(body["steps"][3]["fields"][0]["minimum"], 300.0);

    let response = app
        .oneshot(get("/api/v1/leads/forms/agency"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tier_route_classifies_raw_input() {
    let app = lead_router(build_service(
        Arc::new(MemoryStore::default()),
        Arc::new(RecordingNotifier::default()),
    ));

    let response = app
        .clone()
        .oneshot(get("/api/v1/budget-tier?budget=1000"))
        .await
        .expect("router responds");
    let body = read_json_body(response).await;
    assert_eq!(body["label"], "Elite Collaboration");
    assert_eq!(body["progress"], 75.0);
    assert_eq!(body["bandIndex"], 3);

    let response = app
        .oneshot(get("/api/v1/budget-tier?budget=lots"))
        .await
        .expect("router responds");
    let body = read_json_body(response).await;
    assert_eq!(body["label"], "Starter Collaboration");
    assert_eq!(body["progress"], 0.0);
}
