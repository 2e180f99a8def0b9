//! Validate loaded configuration before anything touches the database.

use crate::config::AppConfig;
use crate::error::ConfigError;
use regex::Regex;

/// The database name is interpolated into `CREATE DATABASE`, so it must be a
/// plain identifier.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let ident = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,63}$")
        .map_err(|e| ConfigError::Validation(e.to_string()))?;
    if !ident.is_match(&config.db_name) {
        return Err(ConfigError::Validation(format!(
            "DB_NAME '{}' must be an identifier of letters, digits and underscores",
            config.db_name
        )));
    }
    if config.pool_size == 0 {
        return Err(ConfigError::Validation("DB_POOL_SIZE must be at least 1".into()));
    }
    if config.db_host.trim().is_empty() {
        return Err(ConfigError::Validation("DB_HOST must not be empty".into()));
    }
    if config.body_limit == 0 {
        return Err(ConfigError::Validation("BODY_LIMIT_BYTES must be positive".into()));
    }
    Ok(())
}
