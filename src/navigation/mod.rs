//! Previous/next post resolution for the detail page
//!
//! Two single-result queries are anchored after the target document, one
//! ascending and one descending by first publication date. The original
//! site ordered the "previous" probe by last publication date instead,
//! which made the two sides disagree whenever a post was edited after
//! publishing; both sides use the same sort key here.

use crate::cms::{
    CmsError, ContentSource, Ordering, Predicate, QueryOptions, QueryResponse, SortKey, SortOrder,
};
use crate::config::SiteConfig;

/// Up to two links rendered under a post. Built fresh per request, never
/// persisted.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct NavigationLinks {
    pub previous: Option<NavigationTarget>,
    pub next: Option<NavigationTarget>,
}

/// One adjacent post, just enough to render a link.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NavigationTarget {
    pub uid: String,
    pub title: String,
}

/// Resolve the posts adjacent to `target_id` in the publication timeline.
///
/// The two probes have no data dependency and run concurrently. An empty
/// result on either side means that side has no link; a query failure fails
/// the whole resolution, and the caller is expected to render the post
/// without links rather than fail the page.
pub async fn resolve_navigation(
    source: &dyn ContentSource,
    config: &SiteConfig,
    target_id: &str,
) -> Result<NavigationLinks, CmsError> {
    let predicate = Predicate::at("document.type", &config.document_type);

    let next_options = adjacent_options(target_id, SortOrder::Asc);
    let previous_options = adjacent_options(target_id, SortOrder::Desc);

    let (next, previous) = tokio::join!(
        source.query(&predicate, &next_options),
        source.query(&predicate, &previous_options),
    );

    Ok(NavigationLinks {
        previous: first_target(previous?),
        next: first_target(next?),
    })
}

fn adjacent_options(target_id: &str, order: SortOrder) -> QueryOptions {
    QueryOptions {
        page_size: 1,
        orderings: Some(Ordering::new(SortKey::FirstPublicationDate, order)),
        after: Some(target_id.to_string()),
    }
}

fn first_target(response: QueryResponse) -> Option<NavigationTarget> {
    response.results.into_iter().next().and_then(|doc| {
        let uid = doc.uid?;
        Some(NavigationTarget {
            uid,
            title: doc.data.title,
        })
    })
}
