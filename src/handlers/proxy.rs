use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::Json;
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiError;

/// Forward a request to the backend service and relay its status and JSON
/// body verbatim. The caller's Authorization header travels through
/// untouched; the auth middleware has already vetted it.
async fn relay(
    state: &AppState,
    method: Method,
    path: String,
    headers: &HeaderMap,
    body: Option<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let (status, body) = state
        .upstream
        .forward(method, &path, authorization, body.as_ref())
        .await
        .map_err(|e| ApiError::internal("forward", "request", e))?;

    Ok((status, Json(body)))
}

fn with_query(path: &str, query: Option<String>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{}?{}", path, query),
        _ => path.to_string(),
    }
}

/// ANY /api/brands - the upstream service owns brands
pub async fn brands_collection(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let path = with_query("/api/brands", query);
    relay(&state, method, path, &headers, body.map(|Json(v)| v)).await
}

/// ANY /api/brands/:id
pub async fn brands_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let path = with_query(&format!("/api/brands/{}", id), query);
    relay(&state, method, path, &headers, body.map(|Json(v)| v)).await
}

/// ANY /api/models - the upstream service owns models
pub async fn models_collection(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let path = with_query("/api/models", query);
    relay(&state, method, path, &headers, body.map(|Json(v)| v)).await
}

/// ANY /api/models/:id
pub async fn models_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let path = with_query(&format!("/api/models/{}", id), query);
    relay(&state, method, path, &headers, body.map(|Json(v)| v)).await
}

/// GET /api/purchase-orders/next-number - numbering lives upstream
pub async fn purchase_order_next_number(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    relay(
        &state,
        Method::GET,
        "/api/purchase-orders/next-number".to_string(),
        &headers,
        None,
    )
    .await
}

/// POST /api/vouchers/clear-post-dated - clearing lives upstream
pub async fn voucher_clear_post_dated(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    relay(
        &state,
        Method::POST,
        "/api/vouchers/clear-post-dated".to_string(),
        &headers,
        body.map(|Json(v)| v),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_is_appended() {
        assert_eq!(
            with_query("/api/brands", Some("page=2&limit=5".to_string())),
            "/api/brands?page=2&limit=5"
        );
        assert_eq!(with_query("/api/brands", None), "/api/brands");
        assert_eq!(with_query("/api/brands", Some(String::new())), "/api/brands");
    }
}
