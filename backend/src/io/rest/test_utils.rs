//! Request helpers for the handler tests.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::storage::csv::test_utils::TestEnvironment;
use crate::{create_router, AppState};

pub struct TestApp {
    pub env: TestEnvironment,
    router: Router,
}

impl TestApp {
    /// Build the app over a fresh data directory; `seed` writes files first
    pub async fn with_seed<F>(seed: F) -> TestApp
    where
        F: FnOnce(&TestEnvironment),
    {
        let env = TestEnvironment::new().await.unwrap();
        seed(&env);
        let state = AppState::from_connection(env.connection.clone()).await.unwrap();
        let router = create_router(state, "http://localhost:8080").unwrap();
        TestApp { env, router }
    }

    pub async fn new() -> TestApp {
        Self::with_seed(|_| {}).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(Method::POST, uri, body).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}
