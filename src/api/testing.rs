//! In-process router harness for handler tests

use std::sync::Arc;

use argon2::Params;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::api::router::create_router;
use crate::api::state::AppState;
use crate::config::AppConfig;
use crate::infrastructure::storage::InMemoryStore;
use crate::infrastructure::user::Argon2Hasher;

pub(crate) const PASSWORD: &str = "secure_password123";

pub(crate) struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let hasher = Argon2Hasher::with_params(Params::new(8, 1, 1, None).unwrap());
        let state = crate::assemble_app_state(
            Arc::new(InMemoryStore::new()),
            Arc::new(hasher),
            &config,
            "test-secret".to_string(),
            Some(7),
        );

        Self {
            router: create_router(state.clone(), None),
            state,
        }
    }

    pub async fn register(&self, username: &str) {
        let (status, body) = send(
            &self.router,
            post_json(
                "/auth/register",
                serde_json::json!({"username": username, "password": PASSWORD}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
    }

    /// Register a manager and return their bearer token
    pub async fn manager(&self, username: &str) -> String {
        self.register(username).await;

        let (status, body) = send(&self.router, login_form(username, PASSWORD)).await;
        assert_eq!(status, StatusCode::OK, "{body}");

        body["token"].as_str().unwrap().to_string()
    }

    /// Ids of the players owned by the token's manager
    pub async fn player_ids(&self, token: &str) -> Vec<i64> {
        let (_, body) = send(&self.router, get("/players/user", Some(token))).await;

        body.as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect()
    }

    pub async fn team(&self, token: &str) -> Value {
        let (status, body) = send(&self.router, get("/team/user", Some(token))).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body
    }
}

pub(crate) async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

pub(crate) fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    builder.body(Body::empty()).unwrap()
}

pub(crate) fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub(crate) fn login_form(username: &str, password: &str) -> Request<Body> {
    let form = format!(
        "username={}&password={}",
        username.replace('@', "%40"),
        password
    );

    Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap()
}
