//! PostgreSQL implementation of the short URL store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::domain::entities::{CreateShortUrlParams, ShortUrl};
use crate::domain::repositories::{ShortUrlStore, StoreError, StoreResult, ensure_destination};
use crate::domain::slug::{InsertOutcome, SlugAllocator};

/// Connection settings for [`connect`].
#[derive(Debug, Clone)]
pub struct PgSettings {
    pub database_url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

/// Opens a connection pool and applies pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn connect(settings: &PgSettings) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.connect_timeout)
        .connect(&settings.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied");

    Ok(pool)
}

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    slug: String,
    destination: String,
    created_at: DateTime<Utc>,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        ShortUrl::new(row.slug, row.destination, row.created_at)
    }
}

/// PostgreSQL store for short URLs.
///
/// Uniqueness comes from the `short_urls_slug_key` constraint. Inserts use
/// `ON CONFLICT (slug) DO NOTHING`, so a taken slug shows up as an empty
/// `RETURNING` set instead of an error.
pub struct PgShortUrlStore {
    pool: Arc<PgPool>,
    allocator: SlugAllocator,
}

impl PgShortUrlStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>, allocator: SlugAllocator) -> Self {
        Self { pool, allocator }
    }

    /// Checks that the database answers a trivial query.
    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Number of stored mappings.
    pub async fn count(&self) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM short_urls")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }

    async fn insert_row(&self, slug: String, destination: &str) -> StoreResult<InsertOutcome> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            INSERT INTO short_urls (slug, destination)
            VALUES ($1, $2)
            ON CONFLICT (slug) DO NOTHING
            RETURNING slug, destination, created_at
            "#,
        )
        .bind(&slug)
        .bind(destination)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(match row {
            Some(row) => InsertOutcome::Inserted(row.into()),
            None => InsertOutcome::SlugTaken,
        })
    }
}

#[async_trait]
impl ShortUrlStore for PgShortUrlStore {
    async fn create_short_url(&self, params: CreateShortUrlParams) -> StoreResult<ShortUrl> {
        ensure_destination(&params)?;
        let destination = params.destination.trim();

        self.allocator
            .allocate(move |slug| self.insert_row(slug, destination))
            .await
    }

    async fn get_short_url_by_slug(&self, slug: &str) -> StoreResult<Option<ShortUrl>> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT slug, destination, created_at
            FROM short_urls
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(ShortUrl::from))
    }
}

/// Row-not-found never reaches this point because lookups use
/// `fetch_optional`.
fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    StoreError::Storage(e.to_string())
}
