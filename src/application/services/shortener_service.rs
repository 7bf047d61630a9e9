//! Link creation, resolution and removal.

use std::sync::Arc;

use crate::domain::entities::{Link, LinkWithClicks};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code, sanitize_code};
use crate::utils::url_normalizer::normalize_url;
use serde_json::json;
use tracing::{debug, error, warn};

/// Random codes tried at the default length before escalating.
pub const MAX_ATTEMPTS: usize = 10;

/// Upper bound on links returned by [`ShortenerService::list_all`].
pub const MAX_LIST_LIMIT: i64 = 100;

/// Service for creating and retrieving shortened links.
///
/// Handles URL validation, deduplication and collision-free code
/// generation. Uniqueness is delegated to the repository's atomic insert:
/// a collision comes back as a conflict and the service simply draws again.
pub struct ShortenerService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> ShortenerService<L> {
    /// Creates a new shortener service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Shortens `raw_url`, reusing the existing link if the URL is already
    /// shortened.
    ///
    /// # Code Generation
    ///
    /// - Up to [`MAX_ATTEMPTS`] random codes of length 7 are inserted until
    ///   one is accepted
    /// - If every attempt collides, one code of length 8 is tried
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not absolute.
    /// Returns [`AppError::Internal`] on storage errors or if the escalated
    /// attempt also collides.
    pub async fn shorten(&self, raw_url: &str) -> Result<Link, AppError> {
        let url = normalize_url(raw_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(existing) = self.link_repository.find_by_original_url(&url).await? {
            debug!(code = %existing.short_code, "URL already shortened");
            return Ok(existing);
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            if let Some(link) = self.try_insert(&url, &code).await? {
                return Ok(link);
            }
            debug!(attempt, "Short code collision");
        }

        warn!(
            "{} collisions at length {}, escalating",
            MAX_ATTEMPTS, DEFAULT_CODE_LENGTH
        );

        let code = generate_code(DEFAULT_CODE_LENGTH + 1);
        match self.try_insert(&url, &code).await? {
            Some(link) => Ok(link),
            None => Err(AppError::internal(
                "Failed to generate unique code",
                json!({ "reason": "Code space exhausted" }),
            )),
        }
    }

    /// Inserts one candidate.
    ///
    /// `Ok(None)` means the code was taken. Losing a dedup race to a
    /// concurrent shorten of the same URL returns the winner's link.
    async fn try_insert(&self, url: &str, code: &str) -> Result<Option<Link>, AppError> {
        match self.link_repository.insert(url, code).await {
            Ok(link) => Ok(Some(link)),
            Err(e) if e.is_conflict_on("short_code") => Ok(None),
            Err(e) if e.is_conflict_on("original_url") => {
                debug!("Concurrent shorten of the same URL, returning existing link");
                self.link_repository
                    .find_by_original_url(url)
                    .await?
                    .map(Some)
                    .ok_or_else(|| {
                        AppError::internal("Failed to store link", json!({ "reason": e.to_string() }))
                    })
            }
            Err(AppError::Conflict { message, details }) => {
                error!("Unexpected conflict while storing link: {}", message);
                Err(AppError::internal("Failed to store link", details))
            }
            Err(e) => {
                error!("Failed to store link: {}", e);
                Err(e)
            }
        }
    }

    /// Resolves a short code to its active link.
    ///
    /// The input is stripped down to alphanumerics first. Anything that does
    /// not match an active link, including input that sanitizes to nothing,
    /// yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, code: &str) -> Result<Option<Link>, AppError> {
        let code = sanitize_code(code);
        if code.is_empty() {
            return Ok(None);
        }

        self.link_repository.find_by_code(&code).await
    }

    /// Lists active links, newest first, with their click counts.
    ///
    /// `limit` is clamped to `1..=100`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_all(&self, limit: i64) -> Result<Vec<LinkWithClicks>, AppError> {
        self.link_repository
            .list_active(limit.clamp(1, MAX_LIST_LIMIT))
            .await
    }

    /// Soft-deletes a link.
    ///
    /// Deleting an already-deleted link succeeds again; `Ok(false)` only
    /// means that no link with this id exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        self.link_repository.soft_delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    fn create_test_link(id: i64, code: &str, url: &str) -> Link {
        Link::new(id, code.to_string(), url.to_string(), Utc::now(), true)
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_original_url()
            .withf(|url| url == "https://example.com")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert()
            .withf(|url, code| url == "https://example.com" && code.len() == 7)
            .times(1)
            .returning(|url, code| Ok(create_test_link(10, code, url)));

        let service = ShortenerService::new(Arc::new(mock_repo));

        let link = service.shorten("https://example.com").await.unwrap();

        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.short_code.len(), 7);
        assert!(link.short_code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_shorten_trims_before_dedup() {
        let mut mock_repo = MockLinkRepository::new();

        let existing = create_test_link(5, "exist12", "https://example.com/a");
        mock_repo
            .expect_find_by_original_url()
            .withf(|url| url == "https://example.com/a")
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        mock_repo.expect_insert().times(0);

        let service = ShortenerService::new(Arc::new(mock_repo));

        let link = service.shorten("  https://example.com/a\t").await.unwrap();

        assert_eq!(link.id, 5);
        assert_eq!(link.short_code, "exist12");
    }

    #[tokio::test]
    async fn test_shorten_invalid_url() {
        let mock_repo = MockLinkRepository::new();
        let service = ShortenerService::new(Arc::new(mock_repo));

        let result = service.shorten("not-a-url").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_shorten_retries_on_collision() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_original_url()
            .returning(|_| Ok(None));

        let mut calls = 0;
        mock_repo
            .expect_insert()
            .times(4)
            .returning(move |url, code| {
                calls += 1;
                if calls < 4 {
                    Err(AppError::code_taken(code))
                } else {
                    Ok(create_test_link(1, code, url))
                }
            });

        let service = ShortenerService::new(Arc::new(mock_repo));

        let link = service.shorten("https://example.com").await.unwrap();
        assert_eq!(link.short_code.len(), 7);
    }

    #[tokio::test]
    async fn test_shorten_escalates_length_after_budget() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_original_url()
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert()
            .withf(|_, code| code.len() == 7)
            .times(MAX_ATTEMPTS)
            .returning(|_, code| Err(AppError::code_taken(code)));

        mock_repo
            .expect_insert()
            .withf(|_, code| code.len() == 8)
            .times(1)
            .returning(|url, code| Ok(create_test_link(2, code, url)));

        let service = ShortenerService::new(Arc::new(mock_repo));

        let link = service.shorten("https://example.com").await.unwrap();
        assert_eq!(link.short_code.len(), 8);
    }

    #[tokio::test]
    async fn test_shorten_fails_when_escalation_collides() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_original_url()
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert()
            .times(MAX_ATTEMPTS + 1)
            .returning(|_, code| Err(AppError::code_taken(code)));

        let service = ShortenerService::new(Arc::new(mock_repo));

        let result = service.shorten("https://example.com").await;
        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_shorten_returns_winner_of_dedup_race() {
        let mut mock_repo = MockLinkRepository::new();

        let mut lookups = 0;
        let winner = create_test_link(3, "winner1", "https://example.com");
        mock_repo
            .expect_find_by_original_url()
            .times(2)
            .returning(move |_| {
                lookups += 1;
                if lookups == 1 {
                    Ok(None)
                } else {
                    Ok(Some(winner.clone()))
                }
            });

        mock_repo
            .expect_insert()
            .times(1)
            .returning(|url, _| Err(AppError::url_taken(url)));

        let service = ShortenerService::new(Arc::new(mock_repo));

        let link = service.shorten("https://example.com").await.unwrap();
        assert_eq!(link.short_code, "winner1");
    }

    #[tokio::test]
    async fn test_shorten_surfaces_storage_failure() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_original_url()
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert()
            .times(1)
            .returning(|_, _| Err(AppError::internal("Database error", json!({}))));

        let service = ShortenerService::new(Arc::new(mock_repo));

        let result = service.shorten("https://example.com").await;
        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_resolve_sanitizes_code() {
        let mut mock_repo = MockLinkRepository::new();

        let link = create_test_link(1, "abc1234", "https://example.com");
        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "abc1234")
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let service = ShortenerService::new(Arc::new(mock_repo));

        let resolved = service.resolve("abc-12;34").await.unwrap();
        assert_eq!(resolved.unwrap().original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_empty_after_sanitizing_skips_lookup() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_code().times(0);

        let service = ShortenerService::new(Arc::new(mock_repo));

        assert!(service.resolve("%%--").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_clamps_limit() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_list_active()
            .withf(|limit| *limit == MAX_LIST_LIMIT)
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = ShortenerService::new(Arc::new(mock_repo));

        assert!(service.list_all(5000).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_delegates_to_soft_delete() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_soft_delete()
            .withf(|id| *id == 42)
            .times(1)
            .returning(|_| Ok(true));

        let service = ShortenerService::new(Arc::new(mock_repo));

        assert!(service.delete(42).await.unwrap());
    }
}
