//! Post view models
//!
//! Raw documents are validated and converted here, at the boundary, so the
//! pagination and navigation logic only ever sees well-formed posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cms::{CmsError, RawDocument, RichTextBlock};
use crate::config::SiteConfig;
use crate::helpers::date::format_display_date;

/// A post as shown on the home page list.
///
/// Immutable once built. `publication_date` is `None` for unpublished or
/// preview content; `display_date` is pre-formatted with the configured
/// locale so templates and the JSON endpoint emit the same string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub uid: String,
    pub publication_date: Option<DateTime<Utc>>,
    pub display_date: Option<String>,
    pub tags: Vec<String>,
    pub title: String,
    pub subtitle: String,
}

impl PostSummary {
    /// Convert a raw document, formatting its publication date for display.
    ///
    /// A document without a uid cannot be linked to and is rejected as
    /// invalid, which fails the whole page it arrived on.
    pub fn from_raw(raw: RawDocument, config: &SiteConfig) -> Result<Self, CmsError> {
        let uid = raw.uid.ok_or_else(|| CmsError::Invalid {
            id: raw.id.clone(),
            detail: "document has no uid".to_string(),
        })?;

        let display_date = raw
            .first_publication_date
            .map(|date| format_display_date(&date, &config.date_format, &config.language));

        Ok(Self {
            uid,
            publication_date: raw.first_publication_date,
            display_date,
            tags: raw.tags,
            title: raw.data.title,
            subtitle: raw.data.subtitle,
        })
    }
}

/// A fully loaded post for the detail page.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub uid: String,
    pub first_publication_date: Option<DateTime<Utc>>,
    pub last_publication_date: Option<DateTime<Utc>>,
    pub display_date: Option<String>,
    pub tags: Vec<String>,
    pub title: String,
    pub banner_url: Option<String>,
    pub content: Vec<ContentSection>,
}

/// A heading plus its rich-text body.
#[derive(Debug, Clone, Serialize)]
pub struct ContentSection {
    pub heading: String,
    pub body: Vec<RichTextBlock>,
}

impl PostDetail {
    pub fn from_raw(raw: RawDocument, config: &SiteConfig) -> Result<Self, CmsError> {
        let uid = raw.uid.ok_or_else(|| CmsError::Invalid {
            id: raw.id.clone(),
            detail: "document has no uid".to_string(),
        })?;

        let display_date = raw
            .first_publication_date
            .map(|date| format_display_date(&date, &config.date_format, &config.language));

        let content = raw
            .data
            .content
            .into_iter()
            .map(|section| ContentSection {
                heading: section.heading,
                body: section.body,
            })
            .collect();

        Ok(Self {
            uid,
            first_publication_date: raw.first_publication_date,
            last_publication_date: raw.last_publication_date,
            display_date,
            tags: raw.tags,
            title: raw.data.title,
            banner_url: raw.data.banner.map(|b| b.url),
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::testing::raw_doc;
    use crate::cms::{RawBanner, RawSection};

    #[test]
    fn test_summary_from_raw() {
        let config = SiteConfig::default();
        let summary = PostSummary::from_raw(raw_doc("post-a", "Rodada decisiva"), &config).unwrap();

        assert_eq!(summary.uid, "post-a");
        assert_eq!(summary.title, "Rodada decisiva");
        assert_eq!(summary.display_date.as_deref(), Some("05 jan 2022"));
        assert_eq!(summary.tags, vec!["esportes".to_string()]);
    }

    #[test]
    fn test_summary_without_uid_is_invalid() {
        let config = SiteConfig::default();
        let mut raw = raw_doc("post-a", "Rodada decisiva");
        raw.uid = None;

        let err = PostSummary::from_raw(raw, &config).unwrap_err();
        assert!(matches!(err, CmsError::Invalid { .. }));
    }

    #[test]
    fn test_summary_without_date_has_no_display_date() {
        let config = SiteConfig::default();
        let mut raw = raw_doc("draft", "Rascunho");
        raw.first_publication_date = None;

        let summary = PostSummary::from_raw(raw, &config).unwrap();
        assert!(summary.display_date.is_none());
    }

    #[test]
    fn test_detail_from_raw() {
        let config = SiteConfig::default();
        let mut raw = raw_doc("post-a", "Rodada decisiva");
        raw.data.banner = Some(RawBanner {
            url: "https://images.example/banner.png".to_string(),
        });
        raw.data.content = vec![RawSection {
            heading: "Primeiro tempo".to_string(),
            body: Vec::new(),
        }];

        let detail = PostDetail::from_raw(raw, &config).unwrap();
        assert_eq!(detail.uid, "post-a");
        assert_eq!(
            detail.banner_url.as_deref(),
            Some("https://images.example/banner.png")
        );
        assert_eq!(detail.content.len(), 1);
        assert_eq!(detail.content[0].heading, "Primeiro tempo");
    }
}
