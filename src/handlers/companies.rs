use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::company::{Company, CompanyPayload, COMPANIES};
use crate::database::pagination::ListQuery;
use crate::error::ApiError;
use crate::handlers::support;
use crate::middleware::auth::AuthUser;

/// GET /api/companies
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Value>, ApiError> {
    support::list_any::<Company>(&COMPANIES, &query).await
}

/// GET /api/companies/:id
pub async fn get(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    support::fetch_any::<Company>(&COMPANIES, id).await
}

/// POST /api/companies
pub async fn create(
    payload: Result<Json<CompanyPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload = support::reject_bad_json(payload)?;
    let name = support::require(&payload.name, "Company", "name")?;

    let repo = support::repository::<Company>(&COMPANIES, "create").await?;
    support::ensure_unique_name(&repo, &COMPANIES, "create", &name, None).await?;

    let pool = support::pool(&COMPANIES, "create").await?;
    let record = Company::insert(
        &pool,
        &name,
        payload.description.as_deref(),
        payload.status.as_deref().unwrap_or("A"),
    )
    .await
    .map_err(|e| ApiError::internal("create", "company", e))?;

    let body = support::record_envelope(&COMPANIES, "create", &record)?;
    Ok((StatusCode::CREATED, body))
}

/// PUT /api/companies/:id
pub async fn update(
    Path(id): Path<Uuid>,
    payload: Result<Json<CompanyPayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let mut payload = support::reject_bad_json(payload)?;
    payload.name = support::optional_trimmed(&payload.name, "Company", "name")?;

    let repo = support::repository::<Company>(&COMPANIES, "update").await?;
    repo.find_by_id(id)
        .await
        .map_err(|e| ApiError::internal("update", "company", e))?
        .ok_or_else(|| ApiError::not_found("Company"))?;

    if let Some(name) = payload.name.as_deref() {
        support::ensure_unique_name(&repo, &COMPANIES, "update", name, Some(id)).await?;
    }

    let pool = support::pool(&COMPANIES, "update").await?;
    let record = Company::update(&pool, id, &payload)
        .await
        .map_err(|e| ApiError::internal("update", "company", e))?;

    support::record_envelope(&COMPANIES, "update", &record)
}

/// DELETE /api/companies/:id
pub async fn remove(
    Extension(principal): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    support::delete_any::<Company>(&COMPANIES, id, &principal).await
}
