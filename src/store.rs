//! Database bootstrap: create or drop the application database and open the
//! shared pool.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::sql::quoted;
use sqlx::mysql::{MySqlConnection, MySqlPool, MySqlPoolOptions};
use sqlx::ConnectOptions;

async fn server_connection(config: &AppConfig) -> Result<MySqlConnection, AppError> {
    config
        .server_options()
        .connect()
        .await
        .map_err(AppError::Db)
}

/// `CREATE DATABASE IF NOT EXISTS` on a connection without a default schema.
pub async fn ensure_database_exists(config: &AppConfig) -> Result<(), AppError> {
    let mut conn = server_connection(config).await?;
    sqlx::query(&format!(
        "CREATE DATABASE IF NOT EXISTS {}",
        quoted(&config.db_name)
    ))
    .execute(&mut conn)
    .await
    .map_err(AppError::Db)?;
    tracing::info!(database = %config.db_name, "database checked/created");
    Ok(())
}

pub async fn drop_database(config: &AppConfig) -> Result<(), AppError> {
    let mut conn = server_connection(config).await?;
    sqlx::query(&format!("DROP DATABASE IF EXISTS {}", quoted(&config.db_name)))
        .execute(&mut conn)
        .await
        .map_err(AppError::Db)?;
    tracing::warn!(database = %config.db_name, "database dropped");
    Ok(())
}

/// Open the pool used by every handler. Callers acquiring a connection wait
/// at most `acquire_timeout`.
pub async fn connect(config: &AppConfig) -> Result<MySqlPool, AppError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.pool_size)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(config.database_options())
        .await
        .map_err(AppError::Db)?;
    tracing::info!(
        host = %config.db_host,
        database = %config.db_name,
        pool_size = config.pool_size,
        "connection pool ready"
    );
    Ok(pool)
}
