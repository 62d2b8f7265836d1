//! Wire types for the content repository's search API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque token identifying the next page of a paged query.
///
/// For Prismic this is a complete URL; the crate never inspects it beyond
/// handing it back to the client. `None` in the surrounding types means the
/// result set is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageCursor(String);

impl PageCursor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of a search query.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    /// 1-based page number of this response.
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    /// Cursor to the next page, absent on the last page.
    #[serde(default)]
    pub next_page: Option<PageCursor>,
    #[serde(default)]
    pub results: Vec<RawDocument>,
}

impl QueryResponse {
    /// An exhausted, empty result set.
    pub fn empty() -> Self {
        Self {
            page: 1,
            total_pages: 0,
            next_page: None,
            results: Vec::new(),
        }
    }
}

/// A document exactly as the repository returns it.
///
/// Publication dates are null for unpublished or preview content, and `uid`
/// is only present for types that define one. Validation into the view
/// models happens in [`crate::content`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub first_publication_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub last_publication_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub data: RawData,
}

/// The type-specific payload of a document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub banner: Option<RawBanner>,
    #[serde(default)]
    pub content: Vec<RawSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBanner {
    pub url: String,
}

/// A heading plus its rich-text body.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSection {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub body: Vec<RichTextBlock>,
}

/// One block of structured text (paragraph, heading, list item, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<RichSpan>,
}

/// Inline formatting span within a block. Carried through untouched; the
/// renderer works at block level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichSpan {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub span_type: String,
}

/// Prismic emits `+0000` offsets, which strict RFC 3339 parsing rejects.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .or_else(|_| DateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%z"))
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom),
    }
}
