use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::repository::EntityMeta;

pub static APPLICATIONS: EntityMeta = EntityMeta {
    table: "applications",
    name_column: "name",
    default_order: "name ASC",
    display: "Application",
    singular: "application",
    plural: "applications",
};

/// Vehicle application a part fits. Parts reference applications by name,
/// not by id, so deletion is guarded by a dependent-part count.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl Application {
    pub async fn insert(
        pool: &PgPool,
        name: &str,
        description: Option<&str>,
        status: &str,
    ) -> Result<Application, DatabaseError> {
        sqlx::query_as::<_, Application>(
            "INSERT INTO applications (name, description, status) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(description)
        .bind(status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Merge only the supplied fields; omitted fields keep their value
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        patch: &ApplicationPayload,
    ) -> Result<Application, DatabaseError> {
        sqlx::query_as::<_, Application>(
            "UPDATE applications SET \
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
