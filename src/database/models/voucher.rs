use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::repository::EntityMeta;

pub static VOUCHERS: EntityMeta = EntityMeta {
    table: "vouchers",
    name_column: "voucher_number",
    default_order: "created_at DESC",
    display: "Voucher",
    singular: "voucher",
    plural: "vouchers",
};

/// Post-dated vouchers are cleared by the upstream service (see the proxy
/// routes); this table only records the flag and clearing timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Voucher {
    pub id: Uuid,
    pub voucher_number: String,
    pub voucher_type: Option<String>,
    pub amount: Option<Decimal>,
    pub post_dated: bool,
    pub cleared_at: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct VoucherPayload {
    pub voucher_number: Option<String>,
    pub voucher_type: Option<String>,
    pub amount: Option<Decimal>,
    pub post_dated: Option<bool>,
    pub status: Option<String>,
}

impl Voucher {
    pub async fn insert(
        pool: &PgPool,
        voucher_number: &str,
        payload: &VoucherPayload,
        status: &str,
    ) -> Result<Voucher, DatabaseError> {
        sqlx::query_as::<_, Voucher>(
            "INSERT INTO vouchers (voucher_number, voucher_type, amount, post_dated, status) \
             VALUES ($1, $2, $3, COALESCE($4, false), $5) RETURNING *",
        )
        .bind(voucher_number)
        .bind(&payload.voucher_type)
        .bind(payload.amount)
        .bind(payload.post_dated)
        .bind(status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        patch: &VoucherPayload,
    ) -> Result<Voucher, DatabaseError> {
        sqlx::query_as::<_, Voucher>(
            "UPDATE vouchers SET \
                 voucher_number = COALESCE($2, voucher_number), \
                 voucher_type = COALESCE($3, voucher_type), \
                 amount = COALESCE($4, amount), \
                 post_dated = COALESCE($5, post_dated), \
                 status = COALESCE($6, status), \
                 updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&patch.voucher_number)
        .bind(&patch.voucher_type)
        .bind(patch.amount)
        .bind(patch.post_dated)
        .bind(&patch.status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
