//! Site configuration (_config.yml)

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{GenError, Result};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub url: String,

    // Directory
    pub data_dir: String,
    pub template_dir: String,
    pub public_dir: String,

    // Content
    pub rate_low: String,
    pub rate_high: String,
    pub fallback_limit: usize,

    // Sitemap
    /// Fixed `lastmod` date; today's date when unset
    pub lastmod: Option<String>,
    pub static_pages: Vec<StaticPage>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "CLS CRE".to_string(),
            url: "https://commerciallendingsolutions.ai".to_string(),

            data_dir: "data".to_string(),
            template_dir: "templates".to_string(),
            public_dir: "public".to_string(),

            rate_low: "5.34%".to_string(),
            rate_high: "8.25%".to_string(),
            fallback_limit: 3,

            lastmod: None,
            static_pages: StaticPage::defaults(),

            extra: IndexMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| GenError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| GenError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The `lastmod` stamp used for every sitemap entry of this run
    pub fn lastmod(&self) -> String {
        self.lastmod
            .clone()
            .unwrap_or_else(|| chrono::Local::now().date_naive().format("%Y-%m-%d").to_string())
    }
}

/// A hand-written page listed in the sitemap ahead of generated pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticPage {
    /// Path relative to the site root ("" for the home page)
    pub path: String,
    pub changefreq: String,
    pub priority: String,
}

impl StaticPage {
    fn new(path: &str, changefreq: &str, priority: &str) -> Self {
        Self {
            path: path.to_string(),
            changefreq: changefreq.to_string(),
            priority: priority.to_string(),
        }
    }

    /// Home, market data, about and contact
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("", "weekly", "1.0"),
            Self::new("market-data.html", "daily", "0.8"),
            Self::new("about.html", "monthly", "0.6"),
            Self::new("contact.html", "monthly", "0.8"),
        ]
    }
}
