#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use webhook_inspector::{AppState, EventDraft, EventLog, router};

pub fn dummy_draft(method: &str) -> EventDraft {
    EventDraft::new(method, "/hook")
        .with_header("Content-Type", "application/json")
        .with_body(r#"{"key":"value"}"#)
        .with_remote_ip("127.0.0.1:40000")
}

pub fn insert_n(log: &EventLog, n: usize) {
    for i in 0..n {
        log.insert(EventDraft::new("POST", format!("/hook/{i}")));
    }
}

pub fn ids(log: &EventLog) -> Vec<u64> {
    log.list().iter().map(|e| e.id).collect()
}

/// A router over a fresh log, with the log handle kept for assertions.
pub fn test_app(capacity: usize) -> (Router, Arc<EventLog>) {
    let log = Arc::new(EventLog::new(capacity));
    let app = router(AppState::new(Arc::clone(&log)));
    (app, log)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
