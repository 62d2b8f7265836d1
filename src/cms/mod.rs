//! Headless CMS client module
//!
//! Talks to a Prismic-style content repository over its JSON search API.
//! Responses are deserialized into an explicit [`RawDocument`] schema at the
//! boundary; the rest of the crate only sees the strongly-typed view models
//! built from it.

mod client;
mod document;
mod predicate;

pub use client::{ContentSource, PrismicClient};
pub use document::{
    PageCursor, QueryResponse, RawBanner, RawData, RawDocument, RawSection, RichSpan,
    RichTextBlock,
};
pub use predicate::{Ordering, Predicate, QueryOptions, SortKey, SortOrder};

use thiserror::Error;

/// Errors produced while talking to the content repository.
#[derive(Debug, Error)]
pub enum CmsError {
    /// Network-level failure (connect, timeout, non-success status).
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response arrived but could not be decoded.
    #[error("malformed response from {url}: {detail}")]
    Malformed { url: String, detail: String },

    /// A document violated the schema the view models require.
    #[error("invalid document {id}: {detail}")]
    Invalid { id: String, detail: String },

    /// The requested document does not exist.
    #[error("document not found: {0}")]
    NotFound(String),
}
