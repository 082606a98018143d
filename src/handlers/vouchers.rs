use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::voucher::{Voucher, VoucherPayload, VOUCHERS};
use crate::database::pagination::ListQuery;
use crate::error::ApiError;
use crate::handlers::support;
use crate::middleware::auth::AuthUser;

/// GET /api/vouchers
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Value>, ApiError> {
    support::list_any::<Voucher>(&VOUCHERS, &query).await
}

/// GET /api/vouchers/:id
pub async fn get(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    support::fetch_any::<Voucher>(&VOUCHERS, id).await
}

/// POST /api/vouchers
pub async fn create(
    payload: Result<Json<VoucherPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload = support::reject_bad_json(payload)?;
    let voucher_number = support::require(&payload.voucher_number, "Voucher", "number")?;

    let repo = support::repository::<Voucher>(&VOUCHERS, "create").await?;
    support::ensure_unique_name(&repo, &VOUCHERS, "create", &voucher_number, None).await?;

    let pool = support::pool(&VOUCHERS, "create").await?;
    let record = Voucher::insert(
        &pool,
        &voucher_number,
        &payload,
        payload.status.as_deref().unwrap_or("A"),
    )
    .await
    .map_err(|e| ApiError::internal("create", "voucher", e))?;

    let body = support::record_envelope(&VOUCHERS, "create", &record)?;
    Ok((StatusCode::CREATED, body))
}

/// PUT /api/vouchers/:id
pub async fn update(
    Path(id): Path<Uuid>,
    payload: Result<Json<VoucherPayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let mut payload = support::reject_bad_json(payload)?;
    payload.voucher_number =
        support::optional_trimmed(&payload.voucher_number, "Voucher", "number")?;

    let repo = support::repository::<Voucher>(&VOUCHERS, "update").await?;
    repo.find_by_id(id)
        .await
        .map_err(|e| ApiError::internal("update", "voucher", e))?
        .ok_or_else(|| ApiError::not_found("Voucher"))?;

    if let Some(voucher_number) = payload.voucher_number.as_deref() {
        support::ensure_unique_name(&repo, &VOUCHERS, "update", voucher_number, Some(id)).await?;
    }

    let pool = support::pool(&VOUCHERS, "update").await?;
    let record = Voucher::update(&pool, id, &payload)
        .await
        .map_err(|e| ApiError::internal("update", "voucher", e))?;

    support::record_envelope(&VOUCHERS, "update", &record)
}

/// DELETE /api/vouchers/:id
pub async fn remove(
    Extension(principal): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    support::delete_any::<Voucher>(&VOUCHERS, id, &principal).await
}
