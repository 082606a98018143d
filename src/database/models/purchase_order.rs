use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::repository::EntityMeta;

pub static PURCHASE_ORDERS: EntityMeta = EntityMeta {
    table: "purchase_orders",
    name_column: "po_number",
    default_order: "created_at DESC",
    display: "Purchase order",
    singular: "purchaseOrder",
    plural: "purchaseOrders",
};

/// The PO number plays the name role: unique case-insensitively, searchable.
/// Numbering itself is owned by the upstream service (see the proxy routes).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub po_number: String,
    pub supplier: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub total_amount: Option<Decimal>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct PurchaseOrderPayload {
    pub po_number: Option<String>,
    pub supplier: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub total_amount: Option<Decimal>,
    pub status: Option<String>,
}

impl PurchaseOrder {
    pub async fn insert(
        pool: &PgPool,
        po_number: &str,
        payload: &PurchaseOrderPayload,
        status: &str,
    ) -> Result<PurchaseOrder, DatabaseError> {
        sqlx::query_as::<_, PurchaseOrder>(
            "INSERT INTO purchase_orders (po_number, supplier, order_date, total_amount, status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(po_number)
        .bind(&payload.supplier)
        .bind(payload.order_date)
        .bind(payload.total_amount)
        .bind(status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        patch: &PurchaseOrderPayload,
    ) -> Result<PurchaseOrder, DatabaseError> {
        sqlx::query_as::<_, PurchaseOrder>(
            "UPDATE purchase_orders SET \
                 po_number = COALESCE($2, po_number), \
                 supplier = COALESCE($3, supplier), \
                 order_date = COALESCE($4, order_date), \
                 total_amount = COALESCE($5, total_amount), \
                 status = COALESCE($6, status), \
                 updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&patch.po_number)
        .bind(&patch.supplier)
        .bind(patch.order_date)
        .bind(patch.total_amount)
        .bind(&patch.status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
