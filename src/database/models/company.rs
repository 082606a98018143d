use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::repository::EntityMeta;

pub static COMPANIES: EntityMeta = EntityMeta {
    table: "companies",
    name_column: "name",
    default_order: "name ASC",
    display: "Company",
    singular: "company",
    plural: "companies",
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CompanyPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl Company {
    pub async fn insert(
        pool: &PgPool,
        name: &str,
        description: Option<&str>,
        status: &str,
    ) -> Result<Company, DatabaseError> {
        sqlx::query_as::<_, Company>(
            "INSERT INTO companies (name, description, status) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(description)
        .bind(status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        patch: &CompanyPayload,
    ) -> Result<Company, DatabaseError> {
        sqlx::query_as::<_, Company>(
            "UPDATE companies SET \
                 name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 status = COALESCE($4, status), \
                 updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(&patch.status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
