use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::dimension::{Dimension, DimensionPayload, DIMENSIONS};
use crate::database::pagination::ListQuery;
use crate::error::ApiError;
use crate::handlers::support;
use crate::middleware::auth::AuthUser;

/// GET /api/dimensions
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Value>, ApiError> {
    support::list_any::<Dimension>(&DIMENSIONS, &query).await
}

/// GET /api/dimensions/:id
pub async fn get(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    support::fetch_any::<Dimension>(&DIMENSIONS, id).await
}

/// POST /api/dimensions
///
/// Dimension names are canonicalized to uppercase before the duplicate
/// check and storage.
pub async fn create(
    payload: Result<Json<DimensionPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload = support::reject_bad_json(payload)?;
    let name = support::canonical(&support::require(&payload.name, "Dimension", "name")?);

    let repo = support::repository::<Dimension>(&DIMENSIONS, "create").await?;
    support::ensure_unique_name(&repo, &DIMENSIONS, "create", &name, None).await?;

    let pool = support::pool(&DIMENSIONS, "create").await?;
    let record = Dimension::insert(&pool, &name, payload.status.as_deref().unwrap_or("A"))
        .await
        .map_err(|e| ApiError::internal("create", "dimension", e))?;

    let body = support::record_envelope(&DIMENSIONS, "create", &record)?;
    Ok((StatusCode::CREATED, body))
}

/// PUT /api/dimensions/:id
pub async fn update(
    Path(id): Path<Uuid>,
    payload: Result<Json<DimensionPayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let payload = support::reject_bad_json(payload)?;
    let name = support::optional_trimmed(&payload.name, "Dimension", "name")?
        .map(|name| support::canonical(&name));

    let repo = support::repository::<Dimension>(&DIMENSIONS, "update").await?;
    repo.find_by_id(id)
        .await
        .map_err(|e| ApiError::internal("update", "dimension", e))?
        .ok_or_else(|| ApiError::not_found("Dimension"))?;

    if let Some(name) = name.as_deref() {
        support::ensure_unique_name(&repo, &DIMENSIONS, "update", name, Some(id)).await?;
    }

    let pool = support::pool(&DIMENSIONS, "update").await?;
    let record = Dimension::update(&pool, id, name.as_deref(), payload.status.as_deref())
        .await
        .map_err(|e| ApiError::internal("update", "dimension", e))?;

    support::record_envelope(&DIMENSIONS, "update", &record)
}

/// DELETE /api/dimensions/:id
pub async fn remove(
    Extension(principal): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    support::delete_any::<Dimension>(&DIMENSIONS, id, &principal).await
}
