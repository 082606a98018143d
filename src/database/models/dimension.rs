use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::repository::EntityMeta;

pub static DIMENSIONS: EntityMeta = EntityMeta {
    table: "dimensions",
    name_column: "name",
    default_order: "name ASC",
    display: "Dimension",
    singular: "dimension",
    plural: "dimensions",
};

/// Lookup table. Names are stored in canonical uppercase.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Dimension {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct DimensionPayload {
    pub name: Option<String>,
    pub status: Option<String>,
}

impl Dimension {
    pub async fn insert(pool: &PgPool, name: &str, status: &str) -> Result<Dimension, DatabaseError> {
        sqlx::query_as::<_, Dimension>(
            "INSERT INTO dimensions (name, status) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        name: Option<&str>,
        status: Option<&str>,
    ) -> Result<Dimension, DatabaseError> {
        sqlx::query_as::<_, Dimension>(
            "UPDATE dimensions SET \
                 name = COALESCE($2, name), \
                 status = COALESCE($3, status), \
                 updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
