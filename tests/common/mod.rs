use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use accounts_api::{app_router, config::AppConfig, repositories::RepositoryFactory, AppState};

/// Helper harness for exercising the application router against a fresh
/// in-memory store per test.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let cfg = AppConfig::new("memory", "127.0.0.1", 18_000, "test");
        let repository = RepositoryFactory::create_from_name(&cfg.repository_backend)
            .expect("memory backend must build");
        let state = Arc::new(AppState::new(repository, cfg));

        Self {
            router: app_router(state),
        }
    }

    /// Issues a single request against the router, optionally with a JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .expect("request build"),
            None => builder.body(Body::empty()).expect("request build"),
        };

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router must produce a response")
    }
}

/// Collects a response body as JSON.
pub async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");
    serde_json::from_slice(&bytes).expect("body is JSON")
}
