use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::purchase_order::{
    PurchaseOrder, PurchaseOrderPayload, PURCHASE_ORDERS,
};
use crate::database::pagination::ListQuery;
use crate::error::ApiError;
use crate::handlers::support;
use crate::middleware::auth::AuthUser;

/// GET /api/purchase-orders
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Value>, ApiError> {
    support::list_any::<PurchaseOrder>(&PURCHASE_ORDERS, &query).await
}

/// GET /api/purchase-orders/:id
pub async fn get(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    support::fetch_any::<PurchaseOrder>(&PURCHASE_ORDERS, id).await
}

/// POST /api/purchase-orders
pub async fn create(
    payload: Result<Json<PurchaseOrderPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload = support::reject_bad_json(payload)?;
    let po_number = support::require(&payload.po_number, "Purchase order", "number")?;

    let repo = support::repository::<PurchaseOrder>(&PURCHASE_ORDERS, "create").await?;
    support::ensure_unique_name(&repo, &PURCHASE_ORDERS, "create", &po_number, None).await?;

    let pool = support::pool(&PURCHASE_ORDERS, "create").await?;
    let record = PurchaseOrder::insert(
        &pool,
        &po_number,
        &payload,
        payload.status.as_deref().unwrap_or("A"),
    )
    .await
    .map_err(|e| ApiError::internal("create", "purchase order", e))?;

    let body = support::record_envelope(&PURCHASE_ORDERS, "create", &record)?;
    Ok((StatusCode::CREATED, body))
}

/// PUT /api/purchase-orders/:id
pub async fn update(
    Path(id): Path<Uuid>,
    payload: Result<Json<PurchaseOrderPayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let mut payload = support::reject_bad_json(payload)?;
    payload.po_number = support::optional_trimmed(&payload.po_number, "Purchase order", "number")?;

    let repo = support::repository::<PurchaseOrder>(&PURCHASE_ORDERS, "update").await?;
    repo.find_by_id(id)
        .await
        .map_err(|e| ApiError::internal("update", "purchase order", e))?
        .ok_or_else(|| ApiError::not_found("Purchase order"))?;

    if let Some(po_number) = payload.po_number.as_deref() {
        support::ensure_unique_name(&repo, &PURCHASE_ORDERS, "update", po_number, Some(id)).await?;
    }

    let pool = support::pool(&PURCHASE_ORDERS, "update").await?;
    let record = PurchaseOrder::update(&pool, id, &payload)
        .await
        .map_err(|e| ApiError::internal("update", "purchase order", e))?;

    support::record_envelope(&PURCHASE_ORDERS, "update", &record)
}

/// DELETE /api/purchase-orders/:id
pub async fn remove(
    Extension(principal): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    support::delete_any::<PurchaseOrder>(&PURCHASE_ORDERS, id, &principal).await
}
