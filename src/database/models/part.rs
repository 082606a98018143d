use sqlx::PgPool;

use crate::database::manager::DatabaseError;

/// Parts reference applications by stored name, not by foreign key. This
/// count backs the referential guard on application deletion.
pub async fn count_for_application(
    pool: &PgPool,
    application_name: &str,
) -> Result<i64, DatabaseError> {
    sqlx::query_scalar("SELECT COUNT(*) FROM parts WHERE application = $1")
        .bind(application_name)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
}
