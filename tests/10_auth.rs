use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use inventory_api::app::{app, AppState};
use inventory_api::middleware::auth::verify_bearer;
use inventory_api::services::upstream::HttpUpstream;

/// In-process router with the upstream pointed at a dead address; the auth
/// guard rejects before anything downstream is touched.
fn test_app() -> axum::Router {
    app(AppState {
        upstream: Arc::new(HttpUpstream::new("http://127.0.0.1:1")),
    })
}

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn protected_routes_reject_missing_authorization() -> Result<()> {
    let routes = [
        ("GET", "/api/applications"),
        ("POST", "/api/applications"),
        ("GET", "/api/categories"),
        ("POST", "/api/companies"),
        ("PUT", "/api/companies/00000000-0000-0000-0000-000000000000"),
        ("DELETE", "/api/makes/00000000-0000-0000-0000-000000000000"),
        ("GET", "/api/dimensions"),
        ("GET", "/api/vouchers"),
        ("GET", "/api/brands"),
        ("POST", "/api/models"),
        ("GET", "/api/purchase-orders/next-number"),
        ("POST", "/api/vouchers/clear-post-dated"),
    ];

    for (method, uri) in routes {
        let response = test_app()
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(body_json(response).await?, json!({ "error": "Unauthorized" }));
    }
    Ok(())
}

#[tokio::test]
async fn malformed_bearer_token_is_rejected() -> Result<()> {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/applications")
                .header("Authorization", "Bearer not.a.jwt")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await?, json!({ "error": "Unauthorized" }));
    Ok(())
}

#[tokio::test]
async fn public_routes_do_not_require_authorization() -> Result<()> {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    // Liveness works with or without a reachable database
    let response = test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert!(
        response.status() == StatusCode::OK || response.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        response.status()
    );
    Ok(())
}

#[tokio::test]
async fn login_rejects_wrong_credentials() -> Result<()> {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({ "username": "admin", "password": "wrong" }))?,
                ))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await?, json!({ "error": "Unauthorized" }));
    Ok(())
}

#[tokio::test]
async fn login_requires_a_username() -> Result<()> {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json!({ "password": "admin" }))?))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn login_issues_a_usable_token() -> Result<()> {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({ "username": "admin", "password": "admin" }))?,
                ))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    let token = body["token"].as_str().expect("token in login response");

    let mut headers = HeaderMap::new();
    headers.insert(
        "authorization",
        HeaderValue::from_str(&format!("Bearer {}", token))?,
    );
    let principal = verify_bearer(&headers).expect("issued token should verify");
    assert_eq!(principal.username, "admin");
    Ok(())
}
