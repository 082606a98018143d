use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::application::{Application, ApplicationPayload, APPLICATIONS};
use crate::database::models::part;
use crate::database::pagination::ListQuery;
use crate::error::ApiError;
use crate::handlers::support;
use crate::middleware::auth::AuthUser;

/// GET /api/applications
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Value>, ApiError> {
    support::list_any::<Application>(&APPLICATIONS, &query).await
}

/// GET /api/applications/:id
pub async fn get(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    support::fetch_any::<Application>(&APPLICATIONS, id).await
}

/// POST /api/applications
pub async fn create(
    payload: Result<Json<ApplicationPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload = support::reject_bad_json(payload)?;
    let name = support::require(&payload.name, "Application", "name")?;

    let repo = support::repository::<Application>(&APPLICATIONS, "create").await?;
    support::ensure_unique_name(&repo, &APPLICATIONS, "create", &name, None).await?;

    let pool = support::pool(&APPLICATIONS, "create").await?;
    let record = Application::insert(
        &pool,
        &name,
        payload.description.as_deref(),
        payload.status.as_deref().unwrap_or("A"),
    )
    .await
    .map_err(|e| ApiError::internal("create", "application", e))?;

    let body = support::record_envelope(&APPLICATIONS, "create", &record)?;
    Ok((StatusCode::CREATED, body))
}

/// PUT /api/applications/:id
pub async fn update(
    Path(id): Path<Uuid>,
    payload: Result<Json<ApplicationPayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let mut payload = support::reject_bad_json(payload)?;
    payload.name = support::optional_trimmed(&payload.name, "Application", "name")?;

    let repo = support::repository::<Application>(&APPLICATIONS, "update").await?;
    repo.find_by_id(id)
        .await
        .map_err(|e| ApiError::internal("update", "application", e))?
        .ok_or_else(|| ApiError::not_found("Application"))?;

    if let Some(name) = payload.name.as_deref() {
        support::ensure_unique_name(&repo, &APPLICATIONS, "update", name, Some(id)).await?;
    }

    let pool = support::pool(&APPLICATIONS, "update").await?;
    let record = Application::update(&pool, id, &payload)
        .await
        .map_err(|e| ApiError::internal("update", "application", e))?;

    support::record_envelope(&APPLICATIONS, "update", &record)
}

/// DELETE /api/applications/:id
///
/// Parts reference applications by name; deletion is blocked while any part
/// still points at this one.
pub async fn remove(
    Extension(principal): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let repo = support::repository::<Application>(&APPLICATIONS, "delete").await?;
    let existing = repo
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal("delete", "application", e))?
        .ok_or_else(|| ApiError::not_found("Application"))?;

    let pool = support::pool(&APPLICATIONS, "delete").await?;
    let dependents = part::count_for_application(&pool, &existing.name)
        .await
        .map_err(|e| ApiError::internal("delete", "application", e))?;

    if dependents > 0 {
        return Err(ApiError::bad_request(format!(
            "Cannot delete application '{}': {} part(s) reference it",
            existing.name, dependents
        )));
    }

    support::delete_any::<Application>(&APPLICATIONS, id, &principal).await
}
