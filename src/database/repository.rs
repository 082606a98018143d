use sqlx::{self, postgres::PgRow, FromRow, PgPool};
use std::marker::PhantomData;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::pagination::{ListQuery, Page, Pagination};

/// Static description of a persisted entity: which table it lives in, which
/// column plays the "name" role for search and uniqueness, how listings are
/// ordered by default, and how the entity is spelled in responses.
pub struct EntityMeta {
    pub table: &'static str,
    pub name_column: &'static str,
    pub default_order: &'static str,
    pub display: &'static str,
    pub singular: &'static str,
    pub plural: &'static str,
}

/// Generic read/delete side of the persistence gateway. Table and column
/// names come from a static EntityMeta, values are always bound parameters.
pub struct Repository<T> {
    meta: &'static EntityMeta,
    pool: PgPool,
    _phantom: PhantomData<T>,
}

impl<T> Repository<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(meta: &'static EntityMeta, pool: PgPool) -> Self {
        Self {
            meta,
            pool,
            _phantom: PhantomData,
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, DatabaseError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", self.meta.table);
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    /// Case-insensitive duplicate probe on the name column. `exclude` skips
    /// the record being updated.
    pub async fn find_by_name(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<Option<T>, DatabaseError> {
        let sql = format!(
            "SELECT * FROM {table} WHERE lower({name}) = lower($1) \
             AND ($2::uuid IS NULL OR id <> $2)",
            table = self.meta.table,
            name = self.meta.name_column,
        );
        sqlx::query_as::<_, T>(&sql)
            .bind(name)
            .bind(exclude)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    /// Filtered, ordered, paginated listing: optional case-insensitive
    /// substring match on the name column, optional exact status match.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<T>, DatabaseError> {
        let filter = format!(
            "($1::text IS NULL OR {name} ILIKE '%' || $1 || '%') \
             AND ($2::text IS NULL OR status = $2)",
            name = self.meta.name_column,
        );

        let count_sql = format!("SELECT COUNT(*) FROM {} WHERE {}", self.meta.table, filter);
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(&query.search)
            .bind(&query.status)
            .fetch_one(&self.pool)
            .await?;

        let (page, limit) = query.normalized();
        let rows_sql = format!(
            "SELECT * FROM {table} WHERE {filter} ORDER BY {order} LIMIT $3 OFFSET $4",
            table = self.meta.table,
            filter = filter,
            order = self.meta.default_order,
        );
        let rows = sqlx::query_as::<_, T>(&rows_sql)
            .bind(&query.search)
            .bind(&query.status)
            .bind(limit)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page {
            rows,
            pagination: Pagination::new(page, limit, total),
        })
    }

    /// Returns whether a row was actually removed
    pub async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.meta.table);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
