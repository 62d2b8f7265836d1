//! publica: a server-rendered blog front-end for headless CMS content
//!
//! This crate renders a blog out of a Prismic-style content repository: a
//! paginated home page, post detail pages with previous/next navigation,
//! and a JSON endpoint for incremental "load more" pagination.

pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod navigation;
pub mod pagination;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main application
#[derive(Clone)]
pub struct Publica {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
}

impl Publica {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self { config, base_dir })
    }

    /// Start the blog server
    pub async fn serve(&self, ip: &str, port: u16, open: bool) -> Result<()> {
        server::start(self, ip, port, open).await
    }

    /// List all posts in the content repository
    pub async fn list(&self) -> Result<()> {
        commands::list::run(self).await
    }
}
