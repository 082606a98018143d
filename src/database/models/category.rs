use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::repository::EntityMeta;

pub static CATEGORIES: EntityMeta = EntityMeta {
    table: "categories",
    name_column: "name",
    default_order: "name ASC",
    display: "Category",
    singular: "category",
    plural: "categories",
};

/// Two-level tree: a category may have a parent, making it a subcategory.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: Option<String>,
    pub parent_id: Option<Uuid>,
    pub status: Option<String>,
}

impl Category {
    pub async fn insert(
        pool: &PgPool,
        name: &str,
        parent_id: Option<Uuid>,
        status: &str,
    ) -> Result<Category, DatabaseError> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, parent_id, status) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(parent_id)
        .bind(status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        patch: &CategoryPayload,
    ) -> Result<Category, DatabaseError> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET \
                 name = COALESCE($2, name), \
                 parent_id = COALESCE($3, parent_id), \
                 status = COALESCE($4, status), \
                 updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&patch.name)
        .bind(patch.parent_id)
        .bind(&patch.status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
