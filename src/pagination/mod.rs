//! Incremental pagination over cursor-paged post lists
//!
//! The home page receives its first page of summaries at render time; this
//! state object takes over from there, growing the list one page per call
//! without ever re-fetching what is already loaded. A `None` cursor means
//! the result set is exhausted and further calls do nothing.

use crate::cms::{CmsError, ContentSource, PageCursor};
use crate::config::SiteConfig;
use crate::content::PostSummary;

/// Accumulated pagination state for one page view.
///
/// Owned by whatever drives the page's lifecycle; there is no global
/// instance. `items` is append-only and its insertion order is the display
/// order.
#[derive(Debug, Clone)]
pub struct PaginationState {
    pub items: Vec<PostSummary>,
    pub cursor: Option<PageCursor>,
    /// 1-based number of the most recently loaded page.
    pub page_number: u32,
}

impl PaginationState {
    /// State seeded with the externally supplied first page and the page
    /// number it arrived with.
    pub fn new(items: Vec<PostSummary>, cursor: Option<PageCursor>, page_number: u32) -> Self {
        Self {
            items,
            cursor,
            page_number,
        }
    }

    /// Empty state resuming from a known cursor, for callers that keep the
    /// already-loaded items elsewhere (the browser, in the JSON endpoint's
    /// case).
    pub fn resume(cursor: Option<PageCursor>, page_number: u32) -> Self {
        Self {
            items: Vec::new(),
            cursor,
            page_number,
        }
    }

    /// Whether another page can be fetched.
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    /// Fetch the next page and append its posts.
    ///
    /// Exactly one network read per call; each successful call advances the
    /// cursor, so the operation is deliberately not idempotent. When the
    /// cursor is already exhausted this is a no-op returning `Ok(0)`, which
    /// absorbs duplicate triggers such as a re-clicked "load more" button.
    /// On failure the error is returned and the state is left untouched.
    pub async fn load_next_page(
        &mut self,
        source: &dyn ContentSource,
        config: &SiteConfig,
    ) -> Result<usize, CmsError> {
        let Some(cursor) = &self.cursor else {
            return Ok(0);
        };

        let response = source.fetch_page(cursor).await?;

        // Convert everything before touching state, so a bad document
        // cannot leave a partially merged page behind.
        let mut incoming = Vec::with_capacity(response.results.len());
        for raw in response.results {
            incoming.push(PostSummary::from_raw(raw, config)?);
        }

        tracing::debug!(
            "loaded page {} with {} posts, more: {}",
            response.page,
            incoming.len(),
            response.next_page.is_some()
        );

        let added = incoming.len();
        self.items.extend(incoming);
        self.cursor = response.next_page;
        self.page_number = response.page;
        Ok(added)
    }
}
