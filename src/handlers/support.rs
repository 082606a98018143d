use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::{postgres::PgRow, FromRow};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::pagination::ListQuery;
use crate::database::repository::{EntityMeta, Repository};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Row bound shared by every generic handler helper
pub trait EntityRow: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin {}
impl<T> EntityRow for T where T: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin {}

/// A structurally invalid JSON body is a 400, not axum's default rejection
pub fn reject_bad_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ApiError::bad_request(format!(
            "Invalid request body: {}",
            rejection.body_text()
        ))),
    }
}

/// Required-field check; trims surrounding whitespace
pub fn require(value: &Option<String>, entity: &str, field: &str) -> Result<String, ApiError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ApiError::bad_request(format!("{} {} is required", entity, field))),
    }
}

/// Optional-field check for updates: absent is fine, present-but-blank is not
pub fn optional_trimmed(
    value: &Option<String>,
    entity: &str,
    field: &str,
) -> Result<Option<String>, ApiError> {
    match value.as_deref().map(str::trim) {
        None => Ok(None),
        Some(v) if v.is_empty() => Err(ApiError::bad_request(format!(
            "{} {} cannot be empty",
            entity, field
        ))),
        Some(v) => Ok(Some(v.to_string())),
    }
}

/// Canonical form for lookup-table names: trimmed, uppercase
pub fn canonical(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Case-insensitive uniqueness probe, excluding the record under update
pub async fn ensure_unique_name<T: EntityRow>(
    repo: &Repository<T>,
    meta: &'static EntityMeta,
    verb: &str,
    name: &str,
    exclude: Option<Uuid>,
) -> Result<(), ApiError> {
    let existing = repo
        .find_by_name(name, exclude)
        .await
        .map_err(|e| ApiError::internal(verb, meta.singular, e))?;

    match existing {
        Some(_) => Err(ApiError::bad_request(format!(
            "{} '{}' already exists",
            meta.display, name
        ))),
        None => Ok(()),
    }
}

pub async fn pool(meta: &'static EntityMeta, verb: &str) -> Result<sqlx::PgPool, ApiError> {
    DatabaseManager::pool()
        .await
        .map_err(|e| ApiError::internal(verb, meta.singular, e))
}

pub async fn repository<T: EntityRow>(
    meta: &'static EntityMeta,
    verb: &str,
) -> Result<Repository<T>, ApiError> {
    Ok(Repository::new(meta, pool(meta, verb).await?))
}

/// { "<key>": value } response body
pub fn envelope(key: &str, value: Value) -> Json<Value> {
    let mut body = Map::new();
    body.insert(key.to_string(), value);
    Json(Value::Object(body))
}

pub fn record_envelope<T: Serialize>(
    meta: &'static EntityMeta,
    verb: &str,
    record: &T,
) -> Result<Json<Value>, ApiError> {
    let value =
        serde_json::to_value(record).map_err(|e| ApiError::internal(verb, meta.singular, e))?;
    Ok(envelope(meta.singular, value))
}

/// Uniform collection GET: search + status filter, default ordering,
/// 1-indexed pagination
pub async fn list_any<T: EntityRow>(
    meta: &'static EntityMeta,
    query: &ListQuery,
) -> Result<Json<Value>, ApiError> {
    let repo = repository::<T>(meta, "fetch").await?;
    let page = repo
        .list(query)
        .await
        .map_err(|e| ApiError::internal("fetch", meta.plural, e))?;

    let rows =
        serde_json::to_value(&page.rows).map_err(|e| ApiError::internal("fetch", meta.plural, e))?;
    let pagination = serde_json::to_value(&page.pagination)
        .map_err(|e| ApiError::internal("fetch", meta.plural, e))?;

    let mut body = Map::new();
    body.insert(meta.plural.to_string(), rows);
    body.insert("pagination".to_string(), pagination);
    Ok(Json(Value::Object(body)))
}

/// Uniform single-resource GET: fetch by id, 404 on a miss
pub async fn fetch_any<T: EntityRow>(
    meta: &'static EntityMeta,
    id: Uuid,
) -> Result<Json<Value>, ApiError> {
    let repo = repository::<T>(meta, "fetch").await?;
    let record = repo
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal("fetch", meta.singular, e))?
        .ok_or_else(|| ApiError::not_found(meta.display))?;

    record_envelope(meta, "fetch", &record)
}

/// Uniform DELETE: existence check first, then remove
pub async fn delete_any<T: EntityRow>(
    meta: &'static EntityMeta,
    id: Uuid,
    principal: &AuthUser,
) -> Result<Json<Value>, ApiError> {
    let repo = repository::<T>(meta, "delete").await?;
    repo.find_by_id(id)
        .await
        .map_err(|e| ApiError::internal("delete", meta.singular, e))?
        .ok_or_else(|| ApiError::not_found(meta.display))?;

    repo.delete(id)
        .await
        .map_err(|e| ApiError::internal("delete", meta.singular, e))?;

    tracing::info!(user = %principal.username, id = %id, "{} deleted", meta.display);
    Ok(envelope(
        "message",
        Value::String(format!("{} deleted successfully", meta.display)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_missing_and_blank() {
        assert!(require(&None, "Application", "name").is_err());
        assert!(require(&Some("   ".to_string()), "Application", "name").is_err());
        assert_eq!(
            require(&Some("  Widget ".to_string()), "Application", "name").unwrap(),
            "Widget"
        );
    }

    #[test]
    fn optional_trimmed_distinguishes_absent_from_blank() {
        assert_eq!(optional_trimmed(&None, "Make", "name").unwrap(), None);
        assert!(optional_trimmed(&Some("".to_string()), "Make", "name").is_err());
        assert_eq!(
            optional_trimmed(&Some(" abc ".to_string()), "Make", "name").unwrap(),
            Some("abc".to_string())
        );
    }

    #[test]
    fn canonical_uppercases_and_trims() {
        assert_eq!(canonical("  15x6.5  "), "15X6.5");
        assert_eq!(canonical("toyota"), "TOYOTA");
    }
}
