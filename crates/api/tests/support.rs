//! Shared fixtures for the HTTP tests

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tinderbox_api::{router, AppContext};
use tinderbox_core::PersonRepository;
use tinderbox_domain::{Config, NewPerson};
use tinderbox_infra::notification::LogMailChannel;
use tower::ServiceExt;

pub struct TestApp {
    _temp_dir: TempDir,
    pub ctx: Arc<AppContext>,
}

impl TestApp {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temporary directory should be created");
        let mut config = Config::default();
        config.database.path = temp_dir.path().join("api.db").to_string_lossy().into_owned();
        config.scheduler.enabled = false;

        let channel = Arc::new(LogMailChannel::new(config.mail.from.clone()));
        let ctx = AppContext::with_channel(config, channel).expect("context should build");
        Self { _temp_dir: temp_dir, ctx: Arc::new(ctx) }
    }

    pub fn router(&self) -> Router {
        router(Arc::clone(&self.ctx))
    }

    pub async fn user(&self, email: &str) -> i64 {
        self.ctx.users.create("Test User", email).await.expect("user should be created").id
    }

    pub async fn person(&self, name: &str) -> i64 {
        self.ctx
            .people
            .create(NewPerson::new(
                name,
                27,
                vec!["https://picsum.photos/400/500?random=1".into()],
                "Denver, CO",
            ))
            .await
            .expect("person should be created")
            .id
    }

    pub async fn like_count(&self, id: i64) -> i64 {
        self.ctx.people.find_by_id(id).await.unwrap().expect("person exists").like_count
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }
}
