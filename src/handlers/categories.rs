use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::category::{Category, CategoryPayload, CATEGORIES};
use crate::database::pagination::ListQuery;
use crate::database::repository::Repository;
use crate::error::ApiError;
use crate::handlers::support;
use crate::middleware::auth::AuthUser;

/// GET /api/categories
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Value>, ApiError> {
    support::list_any::<Category>(&CATEGORIES, &query).await
}

/// GET /api/categories/:id
pub async fn get(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    support::fetch_any::<Category>(&CATEGORIES, id).await
}

/// A supplied parent must exist and must not be the category itself
async fn validate_parent(
    repo: &Repository<Category>,
    verb: &str,
    parent_id: Uuid,
    own_id: Option<Uuid>,
) -> Result<(), ApiError> {
    if own_id == Some(parent_id) {
        return Err(ApiError::bad_request("Category cannot be its own parent"));
    }

    let parent = repo
        .find_by_id(parent_id)
        .await
        .map_err(|e| ApiError::internal(verb, "category", e))?;
    if parent.is_none() {
        return Err(ApiError::bad_request("Parent category not found"));
    }
    Ok(())
}

/// POST /api/categories
pub async fn create(
    payload: Result<Json<CategoryPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload = support::reject_bad_json(payload)?;
    let name = support::require(&payload.name, "Category", "name")?;

    let repo = support::repository::<Category>(&CATEGORIES, "create").await?;
    support::ensure_unique_name(&repo, &CATEGORIES, "create", &name, None).await?;
    if let Some(parent_id) = payload.parent_id {
        validate_parent(&repo, "create", parent_id, None).await?;
    }

    let pool = support::pool(&CATEGORIES, "create").await?;
    let record = Category::insert(
        &pool,
        &name,
        payload.parent_id,
        payload.status.as_deref().unwrap_or("A"),
    )
    .await
    .map_err(|e| ApiError::internal("create", "category", e))?;

    let body = support::record_envelope(&CATEGORIES, "create", &record)?;
    Ok((StatusCode::CREATED, body))
}

/// PUT /api/categories/:id
pub async fn update(
    Path(id): Path<Uuid>,
    payload: Result<Json<CategoryPayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let mut payload = support::reject_bad_json(payload)?;
    payload.name = support::optional_trimmed(&payload.name, "Category", "name")?;

    let repo = support::repository::<Category>(&CATEGORIES, "update").await?;
    repo.find_by_id(id)
        .await
        .map_err(|e| ApiError::internal("update", "category", e))?
        .ok_or_else(|| ApiError::not_found("Category"))?;

    if let Some(name) = payload.name.as_deref() {
        support::ensure_unique_name(&repo, &CATEGORIES, "update", name, Some(id)).await?;
    }
    if let Some(parent_id) = payload.parent_id {
        validate_parent(&repo, "update", parent_id, Some(id)).await?;
    }

    let pool = support::pool(&CATEGORIES, "update").await?;
    let record = Category::update(&pool, id, &payload)
        .await
        .map_err(|e| ApiError::internal("update", "category", e))?;

    support::record_envelope(&CATEGORIES, "update", &record)
}

/// DELETE /api/categories/:id
pub async fn remove(
    Extension(principal): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    support::delete_any::<Category>(&CATEGORIES, id, &principal).await
}
