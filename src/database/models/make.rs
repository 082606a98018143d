use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::repository::EntityMeta;

pub static MAKES: EntityMeta = EntityMeta {
    table: "makes",
    name_column: "name",
    default_order: "name ASC",
    display: "Make",
    singular: "make",
    plural: "makes",
};

/// Vehicle make lookup table. Names are stored in canonical uppercase.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Make {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct MakePayload {
    pub name: Option<String>,
    pub status: Option<String>,
}

impl Make {
    pub async fn insert(pool: &PgPool, name: &str, status: &str) -> Result<Make, DatabaseError> {
        sqlx::query_as::<_, Make>("INSERT INTO makes (name, status) VALUES ($1, $2) RETURNING *")
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
    ) -> Result<Make, DatabaseError> {
        sqlx::query_as::<_, Make>(
            "UPDATE makes SET \
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
