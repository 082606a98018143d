use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::make::{Make, MakePayload, MAKES};
use crate::database::pagination::ListQuery;
use crate::error::ApiError;
use crate::handlers::support;
use crate::middleware::auth::AuthUser;

/// GET /api/makes
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Value>, ApiError> {
    support::list_any::<Make>(&MAKES, &query).await
}

/// GET /api/makes/:id
pub async fn get(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    support::fetch_any::<Make>(&MAKES, id).await
}

/// POST /api/makes
///
/// Make names are canonicalized to uppercase before the duplicate check
/// and storage.
pub async fn create(
    payload: Result<Json<MakePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload = support::reject_bad_json(payload)?;
    let name = support::canonical(&support::require(&payload.name, "Make", "name")?);

    let repo = support::repository::<Make>(&MAKES, "create").await?;
    support::ensure_unique_name(&repo, &MAKES, "create", &name, None).await?;

    let pool = support::pool(&MAKES, "create").await?;
    let record = Make::insert(&pool, &name, payload.status.as_deref().unwrap_or("A"))
        .await
        .map_err(|e| ApiError::internal("create", "make", e))?;

    let body = support::record_envelope(&MAKES, "create", &record)?;
    Ok((StatusCode::CREATED, body))
}

/// PUT /api/makes/:id
pub async fn update(
    Path(id): Path<Uuid>,
    payload: Result<Json<MakePayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let payload = support::reject_bad_json(payload)?;
    let name = support::optional_trimmed(&payload.name, "Make", "name")?
        .map(|name| support::canonical(&name));

    let repo = support::repository::<Make>(&MAKES, "update").await?;
    repo.find_by_id(id)
        .await
        .map_err(|e| ApiError::internal("update", "make", e))?
        .ok_or_else(|| ApiError::not_found("Make"))?;

    if let Some(name) = name.as_deref() {
        support::ensure_unique_name(&repo, &MAKES, "update", name, Some(id)).await?;
    }

    let pool = support::pool(&MAKES, "update").await?;
    let record = Make::update(&pool, id, name.as_deref(), payload.status.as_deref())
        .await
        .map_err(|e| ApiError::internal("update", "make", e))?;

    support::record_envelope(&MAKES, "update", &record)
}

/// DELETE /api/makes/:id
pub async fn remove(
    Extension(principal): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    support::delete_any::<Make>(&MAKES, id, &principal).await
}
