//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use axum::http::HeaderValue;
use axum::http::header::AUTHORIZATION;
use axum_test::{TestRequest, TestServer};
use serde_json::{Value, json};
use social::config::AppConfig;
use social::core::store::SocialStore;
use social::server::ServerBuilder;
use social::storage::InMemorySocialStore;
use std::sync::Arc;
use uuid::Uuid;

pub const PASSWORD: &str = "correct horse";

/// Defaults, with the cheapest bcrypt cost so tests stay fast
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.bcrypt_cost = 4;
    config
}

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemorySocialStore>,
}

/// A signed-up user holding a token
pub struct Member {
    pub id: Uuid,
    pub username: String,
    pub token: String,
}

impl Member {
    pub fn authorization(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("Token {}", self.token)).unwrap()
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(test_config())
}

pub fn spawn_app_with(config: AppConfig) -> TestApp {
    let store = Arc::new(InMemorySocialStore::new());
    let app = ServerBuilder::new()
        .with_config(config)
        .with_shared_store(store.clone() as Arc<dyn SocialStore>)
        .build()
        .expect("Failed to build app");
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp { server, store }
}

impl TestApp {
    /// Register `username` through the API and return the created user
    pub async fn register(&self, username: &str) -> Value {
        let response = self
            .server
            .post("/users")
            .json(&json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": PASSWORD,
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json()
    }

    /// Register `username` and log in
    pub async fn member(&self, username: &str) -> Member {
        let user = self.register(username).await;
        let response = self
            .server
            .post("/api-token-auth")
            .json(&json!({ "username": username, "password": PASSWORD }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();

        Member {
            id: user["id"].as_str().unwrap().parse().unwrap(),
            username: username.to_string(),
            token: body["token"].as_str().unwrap().to_string(),
        }
    }

    pub fn get_as(&self, member: &Member, path: &str) -> TestRequest {
        self.server
            .get(path)
            .add_header(AUTHORIZATION, member.authorization())
    }

    pub fn post_as(&self, member: &Member, path: &str) -> TestRequest {
        self.server
            .post(path)
            .add_header(AUTHORIZATION, member.authorization())
    }

    /// Publish `count` posts titled `post 0`, `post 1`, ...
    pub async fn publish_many(&self, member: &Member, count: usize) -> Vec<Value> {
        let mut created = Vec::with_capacity(count);
        for i in 0..count {
            let response = self
                .post_as(member, "/posts")
                .json(&json!({ "title": format!("post {}", i), "content": "body" }))
                .await;
            response.assert_status(axum::http::StatusCode::CREATED);
            created.push(response.json());
        }
        created
    }
}
