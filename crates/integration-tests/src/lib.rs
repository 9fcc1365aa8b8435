//! Integration tests for the Inventario API.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p inventario-integration-tests
//! ```
//!
//! The router is driven in-process through `tower::ServiceExt::oneshot`;
//! no listener, database or network is involved. Every [`TestContext`] owns
//! fresh stores, so tests never observe each other's data.
//!
//! # Test Categories
//!
//! - `users_api` - register and login
//! - `products_api` - guarded product CRUD
//! - `routing` - welcome, health, fallback and request IDs

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use inventario_api::config::ApiConfig;
use inventario_api::db::ProductStore;
use inventario_api::middleware::ACCESS_TOKEN_HEADER;
use inventario_api::state::AppState;

/// Signing secret used by every test context.
pub const TEST_SECRET: &str = "Zq8#vL2!pR7@mK4$wT9^xB1&nC6*hD3%";

/// A collected response: status, headers and body bytes.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    async fn from_response(response: Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec();
        Self {
            status,
            headers,
            body,
        }
    }

    /// Body parsed as JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    /// Body as UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

/// In-process application plus direct access to its state.
pub struct TestContext {
    pub state: AppState,
    router: Router,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Fresh application with empty stores.
    #[must_use]
    pub fn new() -> Self {
        Self::with_products(ProductStore::new())
    }

    /// Fresh application around a prepared catalogue.
    #[must_use]
    pub fn with_products(products: ProductStore) -> Self {
        let config = ApiConfig::with_secret(SecretString::from(TEST_SECRET));
        let state = AppState::with_products(config, products);
        let router = inventario_api::app(state.clone());
        Self { state, router }
    }

    /// Send a request with an optional JSON body and access token.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(ACCESS_TOKEN_HEADER, token);
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        TestResponse::from_response(response).await
    }

    /// `GET` without a token.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, None).await
    }

    /// Register a user through the API.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> TestResponse {
        self.send(
            Method::POST,
            "/register",
            None,
            Some(json!({ "name": name, "email": email, "password": password })),
        )
        .await
    }

    /// Log in through the API.
    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.send(
            Method::POST,
            "/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Register and log in a default user, returning the access token.
    pub async fn token(&self) -> String {
        let registered = self.register("Ana", "ana@example.com", "hunter22").await;
        assert_eq!(registered.status, StatusCode::CREATED);

        let logged_in = self.login("ana@example.com", "hunter22").await;
        assert_eq!(logged_in.status, StatusCode::OK);
        logged_in.json()["token"].as_str().unwrap().to_owned()
    }
}

/// The example product used across tests.
#[must_use]
pub fn shampoo() -> Value {
    json!({ "producto": "Shampoo", "marca": 1, "linea": 2, "precio": 10, "stock": 5 })
}
