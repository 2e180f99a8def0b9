//! Generic CRUD execution against MySQL.

use crate::error::AppError;
use crate::models::{Entity, Patch};
use crate::sql::{quoted, BindValue, QueryBuf};
use sqlx::mysql::{MySqlPool, MySqlQueryResult, MySqlRow};
use sqlx::{Executor, FromRow, MySql};

pub struct CrudService;

impl CrudService {
    /// All rows ordered by primary key.
    pub async fn list<T: Entity>(pool: &MySqlPool) -> Result<Vec<T>, AppError> {
        let q = QueryBuf {
            sql: format!(
                "SELECT * FROM {} ORDER BY {}",
                quoted(T::TABLE),
                quoted(T::KEY)
            ),
            params: Vec::new(),
        };
        Self::fetch_all(pool, q).await
    }

    /// Fetch one row by primary key or `NotFound`.
    pub async fn get<T: Entity>(pool: &MySqlPool, id: i32) -> Result<T, AppError> {
        Self::find::<T, _>(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(T::NAME.to_string()))
    }

    pub async fn find<'e, T, E>(exec: E, id: i32) -> Result<Option<T>, AppError>
    where
        T: Entity,
        E: Executor<'e, Database = MySql>,
    {
        let q = QueryBuf {
            sql: format!(
                "SELECT * FROM {} WHERE {} = ?",
                quoted(T::TABLE),
                quoted(T::KEY)
            ),
            params: vec![id.into()],
        };
        Self::fetch_optional(exec, q).await
    }

    /// First row whose `column` equals `value` (e-mail lookups).
    pub async fn find_by<T: Entity>(
        pool: &MySqlPool,
        column: &'static str,
        value: impl Into<BindValue>,
    ) -> Result<Option<T>, AppError> {
        let q = QueryBuf {
            sql: format!(
                "SELECT * FROM {} WHERE {} = ? LIMIT 1",
                quoted(T::TABLE),
                quoted(column)
            ),
            params: vec![value.into()],
        };
        Self::fetch_optional(pool, q).await
    }

    pub async fn exists<'e, T, E>(exec: E, id: i32) -> Result<bool, AppError>
    where
        T: Entity,
        E: Executor<'e, Database = MySql>,
    {
        let sql = format!(
            "SELECT {k} FROM {t} WHERE {k} = ?",
            k = quoted(T::KEY),
            t = quoted(T::TABLE)
        );
        tracing::debug!(sql = %sql, id, "query");
        let found = sqlx::query_scalar::<_, i32>(&sql)
            .bind(id)
            .fetch_optional(exec)
            .await?;
        Ok(found.is_some())
    }

    /// Apply a partial update. The row is checked first so a missing id is a
    /// 404 with no write.
    pub async fn update<P: Patch>(pool: &MySqlPool, id: i32, patch: P) -> Result<(), AppError> {
        let update = patch.into_update()?;
        tracing::debug!(
            table = update.table(),
            columns = ?update.columns().collect::<Vec<_>>(),
            id,
            "partial update"
        );
        let q = update
            .build(id)
            .ok_or_else(|| AppError::BadRequest("No fields to update".into()))?;
        let mut tx = pool.begin().await?;
        if !Self::exists::<P::Target, _>(&mut *tx, id).await? {
            return Err(AppError::NotFound(P::Target::NAME.to_string()));
        }
        Self::execute(&mut *tx, q).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn delete<T: Entity>(pool: &MySqlPool, id: i32) -> Result<(), AppError> {
        let q = QueryBuf {
            sql: format!(
                "DELETE FROM {} WHERE {} = ?",
                quoted(T::TABLE),
                quoted(T::KEY)
            ),
            params: vec![id.into()],
        };
        let res = Self::execute(pool, q).await?;
        if res.rows_affected() == 0 {
            return Err(AppError::NotFound(T::NAME.to_string()));
        }
        Ok(())
    }

    /// Run an INSERT and return the generated key.
    pub async fn insert<'e, E>(exec: E, q: QueryBuf) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = MySql>,
    {
        let res = Self::execute(exec, q).await?;
        i32::try_from(res.last_insert_id())
            .map_err(|_| AppError::Internal(format!("insert id {} out of range", res.last_insert_id())))
    }

    pub async fn execute<'e, E>(exec: E, q: QueryBuf) -> Result<MySqlQueryResult, AppError>
    where
        E: Executor<'e, Database = MySql>,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query(&q.sql);
        for p in q.params {
            query = p.bind(query);
        }
        Ok(query.execute(exec).await?)
    }

    pub async fn fetch_all<'e, T, E>(exec: E, q: QueryBuf) -> Result<Vec<T>, AppError>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
        E: Executor<'e, Database = MySql>,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in q.params {
            query = p.bind_as(query);
        }
        Ok(query.fetch_all(exec).await?)
    }

    pub async fn fetch_optional<'e, T, E>(exec: E, q: QueryBuf) -> Result<Option<T>, AppError>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
        E: Executor<'e, Database = MySql>,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in q.params {
            query = p.bind_as(query);
        }
        Ok(query.fetch_optional(exec).await?)
    }
}
