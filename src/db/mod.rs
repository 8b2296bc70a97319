//! Local SQLite approval store.
//!
//! - Connection pool management with WAL mode
//! - Schema migrations
//! - Approval and category queries
//!
//! Query functions take `&mut SqliteConnection` and never begin or commit a
//! transaction. Pass a pooled connection or an open `Transaction`.

pub mod approvals;
pub mod categories;
pub mod pool;

use crate::config::DatabaseConfig;
use std::path::Path;
use thiserror::Error;

/// Database-related errors.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Ordered schema migrations, applied once each.
const MIGRATIONS: &[(&str, &str)] = &[(
    "0001_initial_schema",
    include_str!("migrations/0001_initial_schema.sql"),
)];

/// Open (creating if needed) the database and bring its schema up to date.
///
/// # Arguments
/// * `db_path` - Path to the SQLite database file
/// * `config` - Pool settings
pub async fn initialize(db_path: &Path, config: &DatabaseConfig) -> Result<pool::DbPool, DbError> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            DbError::Migration(format!("Failed to create database directory: {}", e))
        })?;
    }

    let pool = pool::create_pool(db_path, config).await?;
    run_migrations(&pool).await?;

    Ok(pool)
}

async fn run_migrations(pool: &pool::DbPool) -> Result<(), DbError> {
    let mut conn = pool.acquire().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    for (name, sql) in MIGRATIONS {
        let applied: Option<(i64,)> = sqlx::query_as("SELECT id FROM _migrations WHERE name = ?")
            .bind(*name)
            .fetch_optional(&mut *conn)
            .await?;

        if applied.is_some() {
            continue;
        }

        for statement in split_statements(sql) {
            sqlx::query(&statement)
                .execute(&mut *conn)
                .await
                .map_err(|e| DbError::Migration(format!("{}: {}", name, e)))?;
        }

        sqlx::query("INSERT INTO _migrations (name) VALUES (?)")
            .bind(*name)
            .execute(&mut *conn)
            .await?;

        log::info!("Applied migration {}", name);
    }

    Ok(())
}

/// Split a migration script into single statements.
///
/// `--` comments are dropped. A `;` ends a statement only outside quotes and
/// parentheses.
fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut depth: u32 = 0;
    let mut in_quote = false;

    for line in sql.lines() {
        let mut chars = line.chars().peekable();
        while let Some(ch) = chars.next() {
            if !in_quote && ch == '-' && chars.peek() == Some(&'-') {
                break;
            }
            match ch {
                '\'' => in_quote = !in_quote,
                '(' if !in_quote => depth += 1,
                ')' if !in_quote => depth = depth.saturating_sub(1),
                ';' if !in_quote && depth == 0 => {
                    let stmt = current.trim();
                    if !stmt.is_empty() {
                        statements.push(stmt.to_string());
                    }
                    current.clear();
                    continue;
                }
                _ => {}
            }
            current.push(ch);
        }
        if !current.is_empty() {
            current.push(' ');
        }
    }

    let tail = current.trim();
    if !tail.is_empty() {
        statements.push(tail.to_string());
    }

    statements
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_initialize_creates_tables() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested/review.db");

        let pool = initialize(&db_path, &DatabaseConfig::default()).await.unwrap();
        assert!(db_path.exists());

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '_migrations' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert_eq!(names, vec!["approval_categories", "patch_set_approvals"]);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("review.db");

        let _first = initialize(&db_path, &DatabaseConfig::default()).await.unwrap();
        let second = initialize(&db_path, &DatabaseConfig::default()).await.unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM _migrations")
            .fetch_one(&second)
            .await
            .unwrap();
        assert_eq!(count.0, MIGRATIONS.len() as i64);
    }

    #[test]
    fn test_split_statements() {
        let sql = "-- header\nCREATE TABLE a (x INTEGER DEFAULT (strftime('%s;', 'now'))); -- trailing\n\nCREATE INDEX i ON a (x);\nSELECT 1";
        let statements = split_statements(sql);
        assert_eq!(statements.len(), 3);
        assert!(statements[0].starts_with("CREATE TABLE a"));
        assert!(statements[0].contains("'%s;'"));
        assert_eq!(statements[1], "CREATE INDEX i ON a (x)");
        assert_eq!(statements[2], "SELECT 1");
    }
}
