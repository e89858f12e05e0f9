//! Sitemap and robots.txt

use serde::Serialize;

use super::pages::PageFamily;
use crate::config::SiteConfig;
use crate::helpers::full_url;

/// One `<url>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: String,
    pub priority: String,
}

/// Accumulates URLs while pages are emitted
#[derive(Debug, Clone)]
pub struct Sitemap {
    base_url: String,
    lastmod: String,
    urls: Vec<SitemapUrl>,
}

impl Sitemap {
    /// Start a sitemap holding the configured static pages
    pub fn new(config: &SiteConfig) -> Self {
        let mut sitemap = Self {
            base_url: config.url.clone(),
            lastmod: config.lastmod(),
            urls: Vec::new(),
        };
        for page in &config.static_pages {
            sitemap.push(&page.path, &page.changefreq, &page.priority);
        }
        sitemap
    }

    /// Record a site-relative path
    pub fn push(&mut self, path: &str, changefreq: &str, priority: &str) {
        let loc = full_url(&self.base_url, path);
        self.push_loc(loc, changefreq, priority);
    }

    fn push_loc(&mut self, loc: String, changefreq: &str, priority: &str) {
        self.urls.push(SitemapUrl {
            loc,
            lastmod: self.lastmod.clone(),
            changefreq: changefreq.to_string(),
            priority: priority.to_string(),
        });
    }

    /// Record a generated page by the absolute URL its canonical link uses,
    /// with its family's crawl policy
    pub fn push_page(&mut self, page_url: &str, family: PageFamily) {
        self.push_loc(page_url.to_string(), family.changefreq(), family.priority());
    }

    /// Absolute URL for a path below the site root
    pub fn page_url(&self, path: &str) -> String {
        full_url(&self.base_url, path)
    }

    pub fn urls(&self) -> &[SitemapUrl] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// robots.txt allowing everything and pointing at the sitemap
pub fn robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        full_url(base_url, "sitemap.xml")
    )
}
