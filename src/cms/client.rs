//! HTTP client for the content repository

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::OnceCell;

use super::{CmsError, PageCursor, Predicate, QueryOptions, QueryResponse, RawDocument};
use crate::config::SiteConfig;

/// Per-request timeout. The upstream API has none of its own.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Abstraction over the content repository.
///
/// The production implementation is [`PrismicClient`]; tests substitute an
/// in-memory source.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Run a filtered, optionally ordered and anchored query.
    async fn query(
        &self,
        predicate: &Predicate,
        options: &QueryOptions,
    ) -> Result<QueryResponse, CmsError>;

    /// Fetch the page a cursor points at. Exactly one network read; a
    /// cursor that does not point back at the content repository is
    /// rejected before any request is made.
    async fn fetch_page(&self, cursor: &PageCursor) -> Result<QueryResponse, CmsError>;

    /// Fetch a single document by its uid.
    async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<RawDocument, CmsError>;
}

/// Reqwest-backed client for a Prismic v2 repository.
pub struct PrismicClient {
    http: reqwest::Client,
    endpoint: reqwest::Url,
    access_token: Option<String>,
    /// Master ref of the repository, resolved lazily on first use.
    master_ref: OnceCell<String>,
}

/// Whether `cursor` shares scheme, host and port with the repository
/// endpoint. Cursors arrive from the browser, so anything else would let a
/// request be proxied to an arbitrary host.
fn same_origin(endpoint: &reqwest::Url, cursor: &reqwest::Url) -> bool {
    cursor.scheme() == endpoint.scheme()
        && cursor.host_str() == endpoint.host_str()
        && cursor.port_or_known_default() == endpoint.port_or_known_default()
}

#[derive(Debug, Deserialize)]
struct RepositoryInfo {
    refs: Vec<RepositoryRef>,
}

#[derive(Debug, Deserialize)]
struct RepositoryRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master: bool,
}

impl PrismicClient {
    pub fn new(config: &SiteConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let endpoint = reqwest::Url::parse(config.api_endpoint.trim_end_matches('/'))?;

        Ok(Self {
            http,
            endpoint,
            access_token: config.access_token.clone(),
            master_ref: OnceCell::new(),
        })
    }

    /// Resolve the repository's master ref, caching it for the lifetime of
    /// the client. Every search request must carry a ref.
    async fn master_ref(&self) -> Result<&str, CmsError> {
        self.master_ref
            .get_or_try_init(|| async {
                let url = self.endpoint.to_string();
                let mut request = self.http.get(self.endpoint.clone());
                if let Some(token) = &self.access_token {
                    request = request.query(&[("access_token", token)]);
                }

                let response = request
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|source| CmsError::Fetch {
                        url: url.clone(),
                        source,
                    })?;

                let info: RepositoryInfo =
                    response.json().await.map_err(|e| CmsError::Malformed {
                        url: url.clone(),
                        detail: e.to_string(),
                    })?;

                info.refs
                    .into_iter()
                    .find(|r| r.is_master)
                    .map(|r| r.reference)
                    .ok_or(CmsError::Malformed {
                        url,
                        detail: "repository info carries no master ref".to_string(),
                    })
            })
            .await
            .map(String::as_str)
    }
}

#[async_trait]
impl ContentSource for PrismicClient {
    async fn query(
        &self,
        predicate: &Predicate,
        options: &QueryOptions,
    ) -> Result<QueryResponse, CmsError> {
        let reference = self.master_ref().await?.to_string();
        let url = format!("{}/documents/search", self.endpoint);

        let mut request = self.http.get(&url).query(&[
            ("ref", reference),
            ("q", predicate.to_query()),
            ("pageSize", options.page_size.to_string()),
        ]);
        if let Some(ordering) = &options.orderings {
            request = request.query(&[("orderings", ordering.to_query())]);
        }
        if let Some(after) = &options.after {
            request = request.query(&[("after", after)]);
        }
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token)]);
        }

        tracing::debug!("querying {} with {}", url, predicate.to_query());

        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| CmsError::Fetch {
                url: url.clone(),
                source,
            })?;

        response.json().await.map_err(|e| CmsError::Malformed {
            url,
            detail: e.to_string(),
        })
    }

    async fn fetch_page(&self, cursor: &PageCursor) -> Result<QueryResponse, CmsError> {
        // The cursor is a complete URL carrying ref, query and page number,
        // but it reaches us from the browser and is only trusted after it
        // proves to point at the configured repository.
        let page_url =
            reqwest::Url::parse(cursor.as_str()).map_err(|e| CmsError::Malformed {
                url: cursor.as_str().to_string(),
                detail: format!("cursor is not a valid URL: {}", e),
            })?;
        if !same_origin(&self.endpoint, &page_url) {
            return Err(CmsError::Malformed {
                url: page_url.to_string(),
                detail: "cursor does not point at the content repository".to_string(),
            });
        }

        let url = page_url.to_string();
        tracing::debug!("fetching page {}", url);

        let response = self
            .http
            .get(page_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| CmsError::Fetch {
                url: url.clone(),
                source,
            })?;

        response.json().await.map_err(|e| CmsError::Malformed {
            url,
            detail: e.to_string(),
        })
    }

    async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<RawDocument, CmsError> {
        let predicate = Predicate::at(&format!("my.{}.uid", doc_type), uid);
        let options = QueryOptions {
            page_size: 1,
            ..QueryOptions::default()
        };

        let mut response = self.query(&predicate, &options).await?;
        if response.results.is_empty() {
            return Err(CmsError::NotFound(uid.to_string()));
        }
        Ok(response.results.remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PrismicClient {
        PrismicClient::new(&SiteConfig::default()).unwrap()
    }

    #[test]
    fn test_same_origin_accepts_repository_pages() {
        let endpoint = reqwest::Url::parse("https://publica.cdn.prismic.io/api/v2").unwrap();
        let page = reqwest::Url::parse(
            "https://publica.cdn.prismic.io/api/v2/documents/search?ref=x&page=2",
        )
        .unwrap();
        assert!(same_origin(&endpoint, &page));
    }

    #[test]
    fn test_same_origin_rejects_foreign_origins() {
        let endpoint = reqwest::Url::parse("https://publica.cdn.prismic.io/api/v2").unwrap();

        let other_host = reqwest::Url::parse("https://evil.example/api/v2").unwrap();
        assert!(!same_origin(&endpoint, &other_host));

        let other_scheme = reqwest::Url::parse("http://publica.cdn.prismic.io/api/v2").unwrap();
        assert!(!same_origin(&endpoint, &other_scheme));

        let other_port = reqwest::Url::parse("https://publica.cdn.prismic.io:8443/api/v2").unwrap();
        assert!(!same_origin(&endpoint, &other_port));
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_cursor_for_foreign_host() {
        // A browser-supplied cursor must not be able to steer the server
        // at internal services.
        let cursor = PageCursor::new("http://127.0.0.1:8080/internal-metadata");
        let err = client().fetch_page(&cursor).await.unwrap_err();
        assert!(matches!(err, CmsError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_non_url_cursor() {
        let err = client()
            .fetch_page(&PageCursor::new("page2-token"))
            .await
            .unwrap_err();
        assert!(matches!(err, CmsError::Malformed { .. }));
    }
}
