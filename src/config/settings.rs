//! Process configuration read from the environment (`.env` honoured).

use crate::error::ConfigError;
use sqlx::mysql::MySqlConnectOptions;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    /// HTTP listen port. `PORT` in the environment.
    pub port: u16,
    pub pool_size: u32,
    pub acquire_timeout: Duration,
    pub cors_origin: String,
    /// Load `seed.sql` after creating the schema on an empty database.
    pub seed: bool,
    pub body_limit: usize,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let config = AppConfig {
            db_host: get("DB_HOST", "localhost"),
            db_port: parse_num("DB_PORT", &get("DB_PORT", "3306"))?,
            db_user: get("DB_USER", "root"),
            db_password: get("DB_PASSWORD", ""),
            db_name: get("DB_NAME", "bank_db"),
            port: parse_num("PORT", &get("PORT", "5000"))?,
            pool_size: parse_num("DB_POOL_SIZE", &get("DB_POOL_SIZE", "10"))?,
            acquire_timeout: Duration::from_secs(parse_num(
                "DB_ACQUIRE_TIMEOUT_SECS",
                &get("DB_ACQUIRE_TIMEOUT_SECS", "30"),
            )?),
            cors_origin: get("CORS_ORIGIN", "http://localhost:3000"),
            seed: parse_bool("SEED_DATABASE", &get("SEED_DATABASE", "true"))?,
            body_limit: parse_num("BODY_LIMIT_BYTES", &get("BODY_LIMIT_BYTES", "1048576"))?,
        };
        crate::config::validate(&config)?;
        Ok(config)
    }

    /// Connect options for the server without a default database, used to
    /// create or drop the application database.
    pub fn server_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
    }

    pub fn database_options(&self) -> MySqlConnectOptions {
        self.server_options().database(&self.db_name)
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_num<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        reason: e.to_string(),
    })
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key,
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.db_host, "localhost");
        assert_eq!(config.db_port, 3306);
        assert_eq!(config.db_name, "bank_db");
        assert_eq!(config.port, 5000);
        assert_eq!(config.pool_size, 10);
        assert!(config.seed);
        assert_eq!(config.listen_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DB_HOST", "db.internal"),
            ("DB_NAME", "branch_ledger"),
            ("PORT", "8080"),
            ("DB_POOL_SIZE", "4"),
            ("SEED_DATABASE", "off"),
        ]))
        .unwrap();
        assert_eq!(config.db_host, "db.internal");
        assert_eq!(config.db_name, "branch_ledger");
        assert_eq!(config.port, 8080);
        assert_eq!(config.pool_size, 4);
        assert!(!config.seed);
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn malformed_bool_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("SEED_DATABASE", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "SEED_DATABASE", .. }));
    }
}
