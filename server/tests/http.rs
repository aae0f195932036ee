use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use eventful_server::config::Environment;
use eventful_server::db::repository::create_event;
use eventful_server::db::{EventStore, MemoryStore};
use eventful_server::models::{Event, EventRecord, NewEvent};
use eventful_server::routes::create_routes;
use eventful_server::state::AppState;
use eventful_server::utils::AppError;

/// A store whose every call fails as if the database were unreachable.
struct UnreachableStore;

impl EventStore for UnreachableStore {
    fn find_event_by_slug<'a>(
        &'a self,
        _slug: &'a str,
    ) -> BoxFuture<'a, Result<Option<Event>, AppError>> {
        future::ready(Err(AppError::Database(sqlx::Error::PoolTimedOut))).boxed()
    }

    fn find_event_by_id(&self, _id: Uuid) -> BoxFuture<'_, Result<Option<Event>, AppError>> {
        future::ready(Err(AppError::Database(sqlx::Error::PoolTimedOut))).boxed()
    }

    fn insert_event(&self, _record: EventRecord) -> BoxFuture<'_, Result<Event, AppError>> {
        future::ready(Err(AppError::Database(sqlx::Error::PoolTimedOut))).boxed()
    }

    fn update_event(
        &self,
        _id: Uuid,
        _record: EventRecord,
    ) -> BoxFuture<'_, Result<Event, AppError>> {
        future::ready(Err(AppError::Database(sqlx::Error::PoolTimedOut))).boxed()
    }
}

fn react_summit() -> NewEvent {
    NewEvent {
        title: "React Summit 2025".to_string(),
        description: "Building scalable web applications".to_string(),
        overview: "Two days of talks and workshops".to_string(),
        image: "/images/event1.png".to_string(),
        venue: "Moscone Center".to_string(),
        location: "San Francisco, CA".to_string(),
        date: "2025-02-15".to_string(),
        time: "9:00 AM".to_string(),
        mode: "hybrid".to_string(),
        audience: "Frontend developers".to_string(),
        agenda: vec!["Keynote".to_string(), "Workshops".to_string()],
        organizer: "React Community".to_string(),
        tags: vec!["react".to_string(), "frontend".to_string()],
    }
}

fn app_with(store: Arc<dyn EventStore>, environment: Environment) -> Router {
    create_routes(AppState::new(store, environment), None)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).expect("parse response as JSON");

    (status, body)
}

#[tokio::test]
async fn existing_event_is_returned() {
    let store = Arc::new(MemoryStore::new());
    create_event(store.as_ref(), react_summit()).await.unwrap();

    let (status, body) = get(
        app_with(store.clone(), Environment::Production),
        "/events/react-summit-2025",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Event fetched successfully");

    let event = &body["event"];
    assert_eq!(event["slug"], "react-summit-2025");
    assert_eq!(event["title"], "React Summit 2025");
    assert_eq!(event["time"], "09:00");
    assert_eq!(event["mode"], "hybrid");
    assert_eq!(event["agenda"].as_array().unwrap().len(), 2);
    assert!(event["createdAt"].is_string());
    assert!(event["updatedAt"].is_string());
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let store = Arc::new(MemoryStore::new());

    let (status, body) = get(
        app_with(store, Environment::Production),
        "/events/does-not-exist",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Event with slug 'does-not-exist' not found");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn malformed_slug_is_rejected_without_store_access() {
    let store = Arc::new(MemoryStore::new());

    let (status, body) = get(
        app_with(store.clone(), Environment::Production),
        "/events/INVALID%20SLUG!!",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid slug format"));
    assert_eq!(store.event_reads(), 0);
}

#[tokio::test]
async fn missing_slug_is_rejected() {
    let store = Arc::new(MemoryStore::new());

    let (status, body) = get(app_with(store.clone(), Environment::Production), "/events/").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Slug parameter is required");
    assert_eq!(store.event_reads(), 0);
}

#[tokio::test]
async fn undecodable_slug_is_rejected_as_json() {
    let store = Arc::new(MemoryStore::new());

    let (status, body) = get(app_with(store.clone(), Environment::Production), "/events/%FF").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid slug format"));
    assert_eq!(store.event_reads(), 0);
}

#[tokio::test]
async fn events_root_without_trailing_slash_requires_slug() {
    let store = Arc::new(MemoryStore::new());

    let (status, body) = get(app_with(store.clone(), Environment::Production), "/events").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Slug parameter is required");
    assert_eq!(store.event_reads(), 0);
}

#[tokio::test]
async fn store_failure_is_internal_error() {
    let (status, body) = get(
        app_with(Arc::new(UnreachableStore), Environment::Development),
        "/events/react-summit-2025",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to fetch event");
    assert!(body["error"].as_str().unwrap().contains("Database error"));
}

#[tokio::test]
async fn store_failure_detail_is_hidden_in_production() {
    let (status, body) = get(
        app_with(Arc::new(UnreachableStore), Environment::Production),
        "/events/react-summit-2025",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to fetch event");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn health_check_reports_ok() {
    let store = Arc::new(MemoryStore::new());

    let (status, body) = get(app_with(store, Environment::Production), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
