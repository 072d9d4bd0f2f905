//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub timezone: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,
    pub static_dir: String,

    // Date / Time format (Moment.js-style tokens)
    pub date_format: String,
    pub datetime_format: String,

    // Listing pagination
    pub per_page: usize,

    // Content API
    #[serde(default)]
    pub cms: CmsConfig,

    // Comment widget
    #[serde(default)]
    pub comments: CommentsConfig,

    // Where the preview badge links to leave preview mode
    pub preview_exit_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Spacewalk".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),
            timezone: String::new(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            date_format: "DD MMM YYYY".to_string(),
            datetime_format: "DD MMM YYYY, HH:mm".to_string(),

            per_page: 2,

            cms: CmsConfig::default(),
            comments: CommentsConfig::default(),

            preview_exit_path: "/".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Content API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Base URL of the CMS search API
    pub api_url: String,
    /// Document type holding blog posts
    pub document_type: String,
    /// Field projection for listing queries
    pub fetch_fields: Vec<String>,
    /// Ordering for the listing query
    pub orderings: String,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            api_url: "https://blog.cdn.example.com/api/v2".to_string(),
            document_type: "posts".to_string(),
            fetch_fields: vec![
                "posts.title".to_string(),
                "posts.subtitle".to_string(),
                "posts.author".to_string(),
            ],
            orderings: "[document.last_publication_date desc]".to_string(),
        }
    }
}

/// Comment widget configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    pub enable: bool,
    /// URL of the comment-thread client script
    pub script_url: String,
    /// Repository the threads live in
    pub repository: String,
    /// How the per-page thread key is derived
    pub issue_term: String,
    pub theme: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            enable: false,
            script_url: "https://utteranc.es/client.js".to_string(),
            repository: String::new(),
            issue_term: "pathname".to_string(),
            theme: "github-dark".to_string(),
        }
    }
}
