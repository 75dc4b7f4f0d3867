use async_trait::async_trait;
use burrow_core::{DurableStore, ShortCode, StorageError, UrlRecord};
use jiff::Timestamp;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::debug;

type Result<T> = std::result::Result<T, StorageError>;

const SCHEMA: &str = include_str!("../ddl/sqlite/urls.sql");

/// SQLite implementation of the durable store.
///
/// Rows live in the `urls` table. Timestamps are stored as RFC 3339 text in
/// UTC, keeping nanosecond precision. Rows are never filtered by expiry
/// here; the URL store needs the full history to avoid reissuing codes.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a store from an existing SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `database_url`, creating the database file if missing.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;
        debug!(database_url, "connected to sqlite");
        Ok(Self::new(pool))
    }

    /// Opens a private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` sees its own database, so the pool
    /// is pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(map_sqlx_error)?;
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `urls` table if it does not exist yet.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        debug!("sqlite schema is up to date");
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn parse_timestamp(column: &str, value: &str) -> Result<Timestamp> {
    value.parse().map_err(|e| {
        StorageError::InvalidData(format!("invalid {column} timestamp '{value}': {e}"))
    })
}

fn row_to_record(row: &SqliteRow) -> Result<UrlRecord> {
    let code: String = row.try_get("short_code").map_err(map_sqlx_error)?;
    let target_url: String = row.try_get("long_url").map_err(map_sqlx_error)?;
    let title: Option<String> = row.try_get("title").map_err(map_sqlx_error)?;
    let created_on: String = row.try_get("created_on").map_err(map_sqlx_error)?;
    let expires_on: Option<String> = row.try_get("expires_on").map_err(map_sqlx_error)?;

    Ok(UrlRecord {
        code: ShortCode::new_unchecked(code),
        target_url,
        title,
        created_at: parse_timestamp("created_on", &created_on)?,
        expires_at: expires_on
            .map(|value| parse_timestamp("expires_on", &value))
            .transpose()?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        sqlx::Error::Configuration(_) => StorageError::Operation(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl DurableStore for SqliteStore {
    async fn insert(&self, record: &UrlRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO urls (short_code, long_url, title, created_on, expires_on)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.code.as_str())
        .bind(&record.target_url)
        .bind(record.title.as_deref())
        .bind(record.created_at.to_string())
        .bind(record.expires_at.map(|ts| ts.to_string()))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::Conflict(record.code.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn scan_all(&self) -> Result<Vec<UrlRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT short_code, long_url, title, created_on, expires_on
            FROM urls
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_record).collect()
    }

    async fn remove(&self, code: &ShortCode) -> Result<()> {
        sqlx::query("DELETE FROM urls WHERE short_code = ?")
            .bind(code.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
