//! PostgreSQL implementation of click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::{ClickDimension, ClickRepository, CountEntry};
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct ClickRow {
    id: i64,
    url_id: i64,
    ip_address: Option<String>,
    user_agent: Option<String>,
    browser: String,
    platform: String,
    device: String,
    referer: Option<String>,
    clicked_at: DateTime<Utc>,
}

impl From<ClickRow> for Click {
    fn from(r: ClickRow) -> Self {
        Click {
            id: r.id,
            url_id: r.url_id,
            ip_address: r.ip_address,
            user_agent: r.user_agent,
            browser: r.browser,
            platform: r.platform,
            device: r.device,
            referer: r.referer,
            clicked_at: r.clicked_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct CountRow {
    name: String,
    count: i64,
}

/// PostgreSQL repository for click tracking and analytics.
///
/// Grouping and counting happen in SQL; nothing is materialized between
/// calls.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO clicks
                (url_id, ip_address, user_agent, browser, platform, device, referer, clicked_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, url_id, ip_address, user_agent, browser, platform, device, referer, clicked_at
            "#,
        )
        .bind(new_click.url_id)
        .bind(new_click.ip_address)
        .bind(new_click.user_agent)
        .bind(new_click.client.browser.as_str())
        .bind(new_click.client.platform.as_str())
        .bind(new_click.client.device.as_str())
        .bind(new_click.referer)
        .bind(new_click.clicked_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn count_for_url(&self, url_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks WHERE url_id = $1")
            .bind(url_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn breakdown(
        &self,
        url_id: i64,
        dimension: ClickDimension,
    ) -> Result<Vec<CountEntry>, AppError> {
        // Column names come from a closed enum, never from input.
        let sql = format!(
            r#"
            SELECT {col} AS name, COUNT(*) AS count
            FROM clicks
            WHERE url_id = $1
            GROUP BY {col}
            ORDER BY count DESC, name ASC
            "#,
            col = dimension.column()
        );

        let rows = sqlx::query_as::<_, CountRow>(&sql)
            .bind(url_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| CountEntry::new(r.name, r.count))
            .collect())
    }

    async fn recent_for_url(&self, url_id: i64, limit: i64) -> Result<Vec<Click>, AppError> {
        let rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT id, url_id, ip_address, user_agent, browser, platform, device, referer, clicked_at
            FROM clicks
            WHERE url_id = $1
            ORDER BY clicked_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(url_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Click::from).collect())
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn count_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM clicks WHERE clicked_at >= $1 AND clicked_at < $2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}
