//! Mutex-guarded implementation of the link and click repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::domain::entities::{Click, Link, LinkWithClicks, NewClick};
use crate::domain::repositories::{ClickDimension, ClickRepository, CountEntry, LinkRepository};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    links: Vec<Link>,
    clicks: Vec<Click>,
}

/// A single-process store implementing [`LinkRepository`] and
/// [`ClickRepository`].
///
/// Every operation runs under one lock, so the uniqueness checks in
/// [`LinkRepository::insert`] and the write that follows are atomic, just
/// like the partial unique indexes of the PostgreSQL schema.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using in-memory store");
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        self.tables
            .lock()
            .map_err(|_| AppError::internal("Store lock poisoned", json!({})))
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let tables = self.tables()?;

        Ok(tables
            .links
            .iter()
            .find(|l| l.is_active && l.short_code == code)
            .cloned())
    }

    async fn find_by_original_url(&self, url: &str) -> Result<Option<Link>, AppError> {
        let tables = self.tables()?;

        Ok(tables
            .links
            .iter()
            .filter(|l| l.is_active && l.original_url == url)
            .max_by_key(|l| (l.created_at, l.id))
            .cloned())
    }

    async fn insert(&self, original_url: &str, code: &str) -> Result<Link, AppError> {
        let mut tables = self.tables()?;

        let mut active = tables.links.iter().filter(|l| l.is_active);
        if active.clone().any(|l| l.short_code == code) {
            return Err(AppError::code_taken(code));
        }
        if active.any(|l| l.original_url == original_url) {
            return Err(AppError::url_taken(original_url));
        }

        let link = Link::new(
            tables.links.len() as i64 + 1,
            code.to_string(),
            original_url.to_string(),
            Utc::now(),
            true,
        );
        tables.links.push(link.clone());

        Ok(link)
    }

    async fn list_active(&self, limit: i64) -> Result<Vec<LinkWithClicks>, AppError> {
        let tables = self.tables()?;

        let mut counts: HashMap<i64, i64> = HashMap::new();
        for click in &tables.clicks {
            *counts.entry(click.url_id).or_default() += 1;
        }

        let mut links: Vec<&Link> = tables.links.iter().filter(|l| l.is_active).collect();
        links.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        Ok(links
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|l| LinkWithClicks {
                link: l.clone(),
                click_count: counts.get(&l.id).copied().unwrap_or(0),
            })
            .collect())
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables()?;

        match tables.links.iter_mut().find(|l| l.id == id) {
            Some(link) => {
                link.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_active(&self) -> Result<i64, AppError> {
        let tables = self.tables()?;

        Ok(tables.links.iter().filter(|l| l.is_active).count() as i64)
    }
}

#[async_trait]
impl ClickRepository for MemoryStore {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut tables = self.tables()?;

        if !tables.links.iter().any(|l| l.id == new_click.url_id) {
            return Err(AppError::internal(
                "Click references unknown link",
                json!({ "url_id": new_click.url_id }),
            ));
        }

        let click = Click {
            id: tables.clicks.len() as i64 + 1,
            url_id: new_click.url_id,
            ip_address: new_click.ip_address,
            user_agent: new_click.user_agent,
            browser: new_click.client.browser.to_string(),
            platform: new_click.client.platform.to_string(),
            device: new_click.client.device.to_string(),
            referer: new_click.referer,
            clicked_at: new_click.clicked_at,
        };
        tables.clicks.push(click.clone());

        Ok(click)
    }

    async fn count_for_url(&self, url_id: i64) -> Result<i64, AppError> {
        let tables = self.tables()?;

        Ok(tables.clicks.iter().filter(|c| c.url_id == url_id).count() as i64)
    }

    async fn breakdown(
        &self,
        url_id: i64,
        dimension: ClickDimension,
    ) -> Result<Vec<CountEntry>, AppError> {
        let tables = self.tables()?;

        let mut counts: HashMap<&str, i64> = HashMap::new();
        for click in tables.clicks.iter().filter(|c| c.url_id == url_id) {
            *counts.entry(dimension.value_of(click)).or_default() += 1;
        }

        let mut entries: Vec<CountEntry> = counts
            .into_iter()
            .map(|(name, count)| CountEntry::new(name, count))
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

        Ok(entries)
    }

    async fn recent_for_url(&self, url_id: i64, limit: i64) -> Result<Vec<Click>, AppError> {
        let tables = self.tables()?;

        let mut clicks: Vec<&Click> = tables.clicks.iter().filter(|c| c.url_id == url_id).collect();
        clicks.sort_by(|a, b| (b.clicked_at, b.id).cmp(&(a.clicked_at, a.id)));

        Ok(clicks
            .into_iter()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let tables = self.tables()?;

        Ok(tables.clicks.len() as i64)
    }

    async fn count_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let tables = self.tables()?;

        Ok(tables
            .clicks
            .iter()
            .filter(|c| c.clicked_at >= from && c.clicked_at < to)
            .count() as i64)
    }
}
