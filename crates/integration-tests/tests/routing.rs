//! Public routes, fallback and request IDs.

use axum::http::{Method, StatusCode};

use inventario_integration_tests::TestContext;

#[tokio::test]
async fn welcome_text() {
    let ctx = TestContext::new();

    let response = ctx.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "Bienvenido");
}

#[tokio::test]
async fn health_check() {
    let ctx = TestContext::new();

    let response = ctx.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let ctx = TestContext::new();

    let response = ctx.get("/no-such-page").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.json()["error"].is_string());
}

#[tokio::test]
async fn unsupported_method_is_json_not_found() {
    let ctx = TestContext::new();

    let response = ctx.send(Method::PATCH, "/productos", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.json()["error"].is_string());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let ctx = TestContext::new();

    let response = ctx.get("/").await;

    assert!(response.headers.contains_key("x-request-id"));
}
