//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    /// Language tag driving date display, e.g. "pt-br".
    pub language: String,

    // Content repository
    /// Prismic v2 repository endpoint.
    pub api_endpoint: String,
    /// Access token for private repositories, passed through as-is.
    pub access_token: Option<String>,
    /// Document type holding the blog posts.
    pub document_type: String,

    // Home page
    /// Posts per page on the home list.
    pub per_page: u32,

    // Date format (Moment.js style)
    pub date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Publica".to_string(),
            description: String::new(),
            language: "pt-br".to_string(),

            api_endpoint: "https://publica.cdn.prismic.io/api/v2".to_string(),
            access_token: None,
            document_type: "publications".to_string(),

            per_page: 3,

            date_format: "DD MMM YYYY".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
