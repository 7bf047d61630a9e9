//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Link, LinkWithClicks};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct LinkRow {
    id: i64,
    short_code: String,
    original_url: String,
    created_at: DateTime<Utc>,
    is_active: bool,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(r.id, r.short_code, r.original_url, r.created_at, r.is_active)
    }
}

#[derive(Debug, FromRow)]
struct LinkWithClicksRow {
    #[sqlx(flatten)]
    link: LinkRow,
    click_count: i64,
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Active-link uniqueness comes from two partial unique indexes
/// (`urls_active_short_code_key`, `urls_active_original_url_key`); a
/// violating insert fails atomically and surfaces as [`AppError::Conflict`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, short_code, original_url, created_at, is_active
            FROM urls
            WHERE short_code = $1 AND is_active
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_original_url(&self, url: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, short_code, original_url, created_at, is_active
            FROM urls
            WHERE original_url = $1 AND is_active
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn insert(&self, original_url: &str, code: &str) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO urls (original_url, short_code)
            VALUES ($1, $2)
            RETURNING id, short_code, original_url, created_at, is_active
            "#,
        )
        .bind(original_url)
        .bind(code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_active(&self, limit: i64) -> Result<Vec<LinkWithClicks>, AppError> {
        let rows = sqlx::query_as::<_, LinkWithClicksRow>(
            r#"
            SELECT
                u.id,
                u.short_code,
                u.original_url,
                u.created_at,
                u.is_active,
                COUNT(c.id) AS click_count
            FROM urls u
            LEFT JOIN clicks c ON c.url_id = u.id
            WHERE u.is_active
            GROUP BY u.id
            ORDER BY u.created_at DESC, u.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| LinkWithClicks {
                link: r.link.into(),
                click_count: r.click_count,
            })
            .collect())
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE urls SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_active(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls WHERE is_active")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
