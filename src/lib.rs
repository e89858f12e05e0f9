//! cre-pages: programmatic SEO page generator for commercial real estate lending
//!
//! Reads loan type, property type, city, transaction and FAQ catalogs and
//! renders hub pages, city combination pages, a sitemap and robots.txt
//! through embedded Tera templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod faq;
pub mod filter;
pub mod generator;
pub mod helpers;
pub mod templates;

use std::path::{Path, PathBuf};

pub use error::{GenError, Result};

/// Config file looked up in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// A site rooted at a base directory
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Data (JSON catalog) directory
    pub data_dir: PathBuf,
    /// Template override directory
    pub template_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Create a new site from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let data_dir = base_dir.join(&config.data_dir);
        let template_dir = base_dir.join(&config.template_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            data_dir,
            template_dir,
            public_dir,
        }
    }

    /// Generate the static pages
    pub fn generate(&self) -> Result<generator::GenerationReport> {
        commands::generate::run(self)
    }

    /// Remove generated output
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
