use async_trait::async_trait;
use jiff::Timestamp;
use snip_core::repository::{ReadRepository, RecordKey, Repository, Result, UrlRecord};
use snip_core::{ShortCode, StorageError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::str::FromStr;
use tracing::{debug, info};

const CREATE_SHORT_URLS: &str = r#"
    CREATE TABLE IF NOT EXISTS short_urls (
        short_code   TEXT PRIMARY KEY,
        original_url TEXT NOT NULL,
        created_at   INTEGER NOT NULL
    )
"#;

const CREATE_SURROGATE_URLS: &str = r#"
    CREATE TABLE IF NOT EXISTS surrogate_urls (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        original_url TEXT NOT NULL,
        created_at   INTEGER NOT NULL
    )
"#;

/// SQLite implementation of the repository contract.
///
/// Code-keyed records live in `short_urls`, whose primary key enforces
/// uniqueness; id-keyed records live in `surrogate_urls`, whose
/// `AUTOINCREMENT` key never hands out an id twice. Records are never
/// updated or deleted.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a repository from an existing SQLite connection pool.
    ///
    /// Call [`Repository::init`] before use if the tables may be missing.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database at `database_url` and makes
    /// sure the tables exist.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let repository = Self::new(pool);
        repository.init().await?;
        info!(database_url, "opened sqlite repository");
        Ok(repository)
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes every connection in the pool.
    ///
    /// Waits for checked-out connections to be returned first.
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("closed sqlite repository");
    }
}

fn parse_created_at(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{seconds}': {e}"))
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Configuration(_)
        | sqlx::Error::Io(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for SqliteRepository {
    async fn get(&self, key: &RecordKey) -> Result<Option<UrlRecord>> {
        let query = match key {
            RecordKey::Code(code) => sqlx::query(
                r#"
                SELECT original_url, created_at
                FROM short_urls
                WHERE short_code = ?
                LIMIT 1
                "#,
            )
            .bind(code.as_str().to_owned()),
            RecordKey::Id(id) => {
                // rowids are signed, so nothing is stored past i64::MAX
                let Ok(id) = i64::try_from(*id) else {
                    return Ok(None);
                };
                sqlx::query(
                    r#"
                    SELECT original_url, created_at
                    FROM surrogate_urls
                    WHERE id = ?
                    LIMIT 1
                    "#,
                )
                .bind(id)
            }
        };

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let original_url: String = row.try_get("original_url").map_err(map_sqlx_error)?;
        let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

        Ok(Some(UrlRecord {
            original_url,
            created_at: parse_created_at(created_at)?,
        }))
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn init(&self) -> Result<()> {
        for ddl in [CREATE_SHORT_URLS, CREATE_SURROGATE_URLS] {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        }
        Ok(())
    }

    async fn insert(&self, code: &ShortCode, record: UrlRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO short_urls (short_code, original_url, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(code.as_str())
        .bind(record.original_url)
        .bind(record.created_at.as_second())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(code.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn insert_assigned(&self, record: UrlRecord) -> Result<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO surrogate_urls (original_url, created_at)
            VALUES (?, ?)
            "#,
        )
        .bind(record.original_url)
        .bind(record.created_at.as_second())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let id = result.last_insert_rowid();
        u64::try_from(id)
            .map_err(|_| StorageError::InvalidData(format!("store assigned negative id {id}")))
    }
}
