//! Link creation, listing, deletion, and redirect resolution.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::{generate_code, validate_custom_alias};
use crate::utils::url_validator::validate_destination;

/// One page of a user's links plus pagination metadata.
#[derive(Debug, Clone)]
pub struct LinkPage {
    pub links: Vec<Link>,
    pub total_pages: i64,
    pub current_page: i64,
}

/// Service for managing shortened links.
///
/// Owns the uniqueness policy: caller-chosen aliases are copied into the
/// `code` column, so generated codes and aliases share one namespace and a
/// single lookup resolves either.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
    cache: Arc<dyn CacheService>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        clicks: Arc<dyn ClickRepository>,
        cache: Arc<dyn CacheService>,
        base_url: String,
    ) -> Self {
        Self {
            links,
            clicks,
            cache,
            base_url,
        }
    }

    /// Creates a short link for a user.
    ///
    /// The destination must be an absolute HTTP(S) URL; it is stored verbatim.
    /// When `alias` is given it is validated and claimed as the link's code;
    /// otherwise a random 6-character code is generated with collision retry.
    /// `expires_at` is accepted as-is, including timestamps already in the past.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed destination, an
    /// invalid alias, or an alias already in use by any link.
    pub async fn create_link(
        &self,
        user_id: i64,
        destination: String,
        alias: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Link, AppError> {
        validate_destination(&destination).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        let code = if let Some(alias_value) = &alias {
            validate_custom_alias(alias_value)?;

            if self.links.find_by_code(alias_value).await?.is_some() {
                return Err(AppError::bad_request(
                    "Custom alias is already in use",
                    json!({ "alias": alias_value }),
                ));
            }

            alias_value.clone()
        } else {
            self.generate_unique_code().await?
        };

        let new_link = NewLink {
            code,
            alias,
            long_url: destination,
            user_id,
            expires_at,
        };

        self.links.create(new_link).await
    }

    /// Lists a user's links, newest first, with pagination metadata.
    ///
    /// `search` performs a case-insensitive substring match against the
    /// destination URL, code, and alias.
    pub async fn list_links(
        &self,
        user_id: i64,
        search: Option<String>,
        page: i64,
        page_size: i64,
    ) -> Result<LinkPage, AppError> {
        let offset = (page - 1) * page_size;

        let links = self
            .links
            .list_for_user(user_id, search.clone(), offset, page_size)
            .await?;
        let total = self.links.count_for_user(user_id, search).await?;

        Ok(LinkPage {
            links,
            total_pages: (total + page_size - 1) / page_size,
            current_page: page,
        })
    }

    /// Retrieves a link by id, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the link does not exist or belongs
    /// to a different user.
    pub async fn get_owned_link(&self, user_id: i64, id: i64) -> Result<Link, AppError> {
        self.links
            .find_by_id_for_user(id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "id": id })))
    }

    /// Deletes a link and all of its click events.
    ///
    /// Events are removed first, then the link. The two statements are not
    /// transactional: if the link deletion fails after the events are gone,
    /// the inconsistency is logged and the error surfaced.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] under the same ownership rule as
    /// [`Self::get_owned_link`].
    pub async fn delete_link(&self, user_id: i64, id: i64) -> Result<(), AppError> {
        let link = self.get_owned_link(user_id, id).await?;

        let removed_events = self.clicks.delete_for_link(link.id).await?;

        if let Err(e) = self.links.delete(link.id).await {
            tracing::warn!(
                link_id = link.id,
                removed_events,
                "Link row survived after its click events were deleted"
            );
            return Err(e);
        }

        if let Err(e) = self.cache.invalidate(&link.code).await {
            tracing::warn!(error = %e, code = link.code, "Failed to invalidate cache after delete");
        }

        Ok(())
    }

    /// Resolves a short code for redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown code and
    /// [`AppError::Gone`] for a link past its expiry. Neither produces any
    /// side effect.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        let link = self
            .links
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "code": code })))?;

        if link.is_expired() {
            return Err(AppError::gone("URL has expired", json!({ "code": code })));
        }

        Ok(link)
    }

    /// Constructs the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Generates a short code not currently present in the store.
    ///
    /// Attempts up to 10 times before failing.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        const MAX_ATTEMPTS: usize = 10;

        for _ in 0..MAX_ATTEMPTS {
            let code = generate_code();

            if self.links.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}
