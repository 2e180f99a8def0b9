//! Database bootstrap: create the tables on an empty database (plus demo data
//! when seeding is on), otherwise apply the idempotent upgrades in
//! `alter.sql`. The SQL files are compiled into the binary.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::store;
use sqlx::mysql::{MySqlDatabaseError, MySqlPool};

const SCHEMA_SQL: &str = include_str!("../migrations/schema.sql");
const SEED_SQL: &str = include_str!("../migrations/seed.sql");
const ALTER_SQL: &str = include_str!("../migrations/alter.sql");

/// MySQL `ER_DUP_FIELDNAME`.
const ER_DUP_FIELDNAME: u16 = 1060;
/// MySQL `ER_DUP_KEYNAME`.
const ER_DUP_KEYNAME: u16 = 1061;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The database was empty; the schema was created.
    Created { seeded: bool },
    /// Tables already existed; upgrade statements were applied or skipped.
    Upgraded { applied: usize, skipped: usize },
}

/// Split a SQL script into statements on `;`, ignoring `--` comments and
/// semicolons inside single-quoted literals.
pub fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                current.push(c);
                if in_quote && chars.peek() == Some(&'\'') {
                    // '' escape inside a literal
                    current.push('\'');
                    chars.next();
                } else {
                    in_quote = !in_quote;
                }
            }
            '-' if !in_quote && chars.peek() == Some(&'-') => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        current.push('\n');
                        break;
                    }
                }
            }
            ';' if !in_quote => {
                push_statement(&mut statements, &current);
                current.clear();
            }
            _ => current.push(c),
        }
    }
    push_statement(&mut statements, &current);
    statements
}

fn push_statement(out: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

fn already_applied(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.try_downcast_ref::<MySqlDatabaseError>())
        .map(|db| matches!(db.number(), ER_DUP_FIELDNAME | ER_DUP_KEYNAME))
        .unwrap_or(false)
}

async fn base_table_count(pool: &MySqlPool) -> Result<i64, AppError> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM information_schema.tables \
         WHERE table_schema = DATABASE() AND table_type = 'BASE TABLE'",
    )
    .fetch_one(pool)
    .await
    .map_err(AppError::Db)
}

async fn run_script(pool: &MySqlPool, name: &str, sql: &str) -> Result<usize, AppError> {
    let mut conn = pool.acquire().await.map_err(AppError::Db)?;
    let statements = split_statements(sql);
    for stmt in &statements {
        sqlx::raw_sql(stmt)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!(script = name, error = %e, "migration statement failed");
                AppError::Db(e)
            })?;
    }
    tracing::info!(script = name, statements = statements.len(), "script applied");
    Ok(statements.len())
}

/// Create the schema on an empty database, or apply `alter.sql` to an
/// existing one. Upgrade statements that already took effect are skipped.
pub async fn apply_migrations(pool: &MySqlPool, seed: bool) -> Result<MigrationOutcome, AppError> {
    let tables = base_table_count(pool).await?;
    if tables == 0 {
        tracing::info!("no tables found; creating schema");
        run_script(pool, "schema.sql", SCHEMA_SQL).await?;
        if seed {
            run_script(pool, "seed.sql", SEED_SQL).await?;
        }
        return Ok(MigrationOutcome::Created { seeded: seed });
    }

    tracing::info!(tables, "tables exist; applying alterations");
    let mut conn = pool.acquire().await.map_err(AppError::Db)?;
    let (mut applied, mut skipped) = (0, 0);
    for stmt in split_statements(ALTER_SQL) {
        match sqlx::raw_sql(&stmt).execute(&mut *conn).await {
            Ok(_) => applied += 1,
            Err(e) if already_applied(&e) => {
                tracing::debug!(statement = %stmt, "already applied");
                skipped += 1;
            }
            Err(e) => return Err(AppError::Db(e)),
        }
    }
    tracing::info!(applied, skipped, "alterations done");
    Ok(MigrationOutcome::Upgraded { applied, skipped })
}

/// Create the database if needed and bring its schema up to date.
pub async fn migrate(config: &AppConfig) -> Result<MigrationOutcome, AppError> {
    store::ensure_database_exists(config).await?;
    let pool = store::connect(config).await?;
    let outcome = apply_migrations(&pool, config.seed).await;
    pool.close().await;
    outcome
}

/// Drop the database and rebuild it from scratch.
pub async fn reset_database(config: &AppConfig) -> Result<MigrationOutcome, AppError> {
    store::drop_database(config).await?;
    migrate(config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_semicolons_and_drops_comments() {
        let sql = "-- header\nCREATE TABLE A (x INT);\n\n-- next\nCREATE TABLE B (y INT);\n";
        assert_eq!(
            split_statements(sql),
            vec!["CREATE TABLE A (x INT)", "CREATE TABLE B (y INT)"]
        );
    }

    #[test]
    fn semicolons_and_dashes_inside_literals_are_kept() {
        let sql = "INSERT INTO T VALUES ('a;b', 'c--d', 'it''s');";
        let stmts = split_statements(sql);
        assert_eq!(stmts.len(), 1);
        assert_eq!(stmts[0], "INSERT INTO T VALUES ('a;b', 'c--d', 'it''s')");
    }

    #[test]
    fn trailing_statement_without_semicolon() {
        assert_eq!(split_statements("SELECT 1;\nSELECT 2"), vec!["SELECT 1", "SELECT 2"]);
        assert!(split_statements("  -- only a comment\n").is_empty());
    }

    #[test]
    fn embedded_schema_creates_every_table() {
        let stmts = split_statements(SCHEMA_SQL);
        let tables: Vec<&str> = stmts
            .iter()
            .filter_map(|s| s.strip_prefix("CREATE TABLE "))
            .filter_map(|s| s.split_whitespace().next())
            .collect();
        assert_eq!(
            tables,
            vec![
                "BANK",
                "BRANCH",
                "CUSTOMER",
                "EMPLOYEE",
                "ACCOUNT",
                "LOAN",
                "LOAN_ACCOUNT",
                "TRANSACTIONS",
                "PAYMENT",
                "MANAGES",
                "AVAIL"
            ]
        );
    }

    #[test]
    fn seed_statements_are_inserts() {
        let stmts = split_statements(SEED_SQL);
        assert!(!stmts.is_empty());
        assert!(stmts.iter().all(|s| s.starts_with("INSERT INTO ")));
        assert!(SEED_SQL.contains("(101, 1, 1, 1000.00, 'Savings', 'Active'"));
        assert!(SEED_SQL.contains("(202, 2, 2, 200.00, 'Savings', 'Active'"));
    }

    #[test]
    fn alter_statements_are_alters() {
        let stmts = split_statements(ALTER_SQL);
        assert_eq!(stmts.len(), 7);
        assert!(stmts.iter().all(|s| s.starts_with("ALTER TABLE ")));
    }

    #[test]
    fn non_database_errors_are_not_treated_as_applied() {
        assert!(!already_applied(&sqlx::Error::RowNotFound));
    }
}
