use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use inventory_api::app::{app, AppState};
use inventory_api::auth::{generate_jwt, Claims};
use inventory_api::services::upstream::HttpUpstream;

/// Stub backend standing in for the upstream service. Routes echo enough
/// of the request to assert verbatim passthrough.
async fn spawn_stub_upstream() -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let stub = Router::new()
        .route(
            "/api/brands",
            get(|| async { Json(json!({ "brands": [{ "id": 1, "name": "Bosch" }] })) }),
        )
        .route(
            "/api/brands/missing",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Brand not found" })),
                )
            }),
        )
        .route(
            "/api/models",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let authorization = headers
                    .get("authorization")
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string);
                (
                    StatusCode::CREATED,
                    Json(json!({ "model": body, "authorization": authorization })),
                )
            }),
        )
        .route(
            "/api/purchase-orders/next-number",
            get(|| async { Json(json!({ "nextNumber": "PO-0042" })) }),
        );

    tokio::spawn(async move {
        axum::serve(listener, stub).await.expect("stub upstream");
    });

    Ok(format!("http://{}", addr))
}

async fn proxied_app() -> Result<axum::Router> {
    let base_url = spawn_stub_upstream().await?;
    Ok(app(AppState {
        upstream: Arc::new(HttpUpstream::new(base_url)),
    }))
}

fn bearer() -> String {
    format!("Bearer {}", generate_jwt(Claims::new("admin")).expect("token"))
}

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn upstream_success_is_relayed_verbatim() -> Result<()> {
    let app = proxied_app().await?;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/brands")
                .header("Authorization", bearer())
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await?,
        json!({ "brands": [{ "id": 1, "name": "Bosch" }] })
    );
    Ok(())
}

#[tokio::test]
async fn upstream_error_status_and_body_are_relayed() -> Result<()> {
    let app = proxied_app().await?;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/brands/missing")
                .header("Authorization", bearer())
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await?, json!({ "error": "Brand not found" }));
    Ok(())
}

#[tokio::test]
async fn authorization_and_body_pass_through_untouched() -> Result<()> {
    let app = proxied_app().await?;
    let token = bearer();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/models")
                .header("Authorization", &token)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json!({ "name": "Corolla" }))?))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await?;
    assert_eq!(body["model"], json!({ "name": "Corolla" }));
    assert_eq!(body["authorization"], json!(token));
    Ok(())
}

#[tokio::test]
async fn purchase_order_numbering_is_proxied() -> Result<()> {
    let app = proxied_app().await?;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/purchase-orders/next-number")
                .header("Authorization", bearer())
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await?, json!({ "nextNumber": "PO-0042" }));
    Ok(())
}
