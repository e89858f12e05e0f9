//! Generator module - renders every page family, the sitemap and robots.txt

mod pages;
mod sitemap;

pub use pages::{
    city_loan_pages, city_property_pages, loan_hub_pages, property_hub_pages, PageDescriptor,
    PageFamily, FINANCING_DIR, PROPERTY_DIR,
};
pub use sitemap::{robots_txt, Sitemap, SitemapUrl};

use std::fs;
use std::path::{Path, PathBuf};

use tera::Context;

use crate::config::SiteConfig;
use crate::content::{City, LoanType, PropertyType, SiteData};
use crate::error::{GenError, Result};
use crate::helpers::depth_prefix;
use crate::templates::{SiteInfo, TemplateRenderer, SITEMAP_TEMPLATE};
use crate::Site;

/// Read-only values shared by every page render
struct SharedContext<'a> {
    site: SiteInfo,
    all_loan_types: &'a [LoanType],
    all_property_types: &'a [PropertyType],
    all_cities: &'a [City],
}

/// Counts from a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub loan_hubs: usize,
    pub property_hubs: usize,
    pub city_loans: usize,
    pub city_properties: usize,
    pub sitemap_urls: usize,
    pub output_dir: PathBuf,
}

impl GenerationReport {
    pub fn total_pages(&self) -> usize {
        self.loan_hubs + self.property_hubs + self.city_loans + self.city_properties
    }

    fn record(&mut self, family: PageFamily, count: usize) {
        match family {
            PageFamily::LoanHub => self.loan_hubs = count,
            PageFamily::PropertyHub => self.property_hubs = count,
            PageFamily::CityLoan => self.city_loans = count,
            PageFamily::CityProperty => self.city_properties = count,
        }
    }
}

/// Static page generator using Tera templates
pub struct Generator {
    config: SiteConfig,
    public_dir: PathBuf,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator, picking up template overrides from the site
    pub fn new(site: &Site) -> Result<Self> {
        let renderer = TemplateRenderer::with_overrides(&site.template_dir)?;
        Ok(Self::with_renderer(site, renderer))
    }

    pub fn with_renderer(site: &Site, renderer: TemplateRenderer) -> Self {
        Self {
            config: site.config.clone(),
            public_dir: site.public_dir.clone(),
            renderer,
        }
    }

    /// Generate every page family, then sitemap.xml and robots.txt
    pub fn generate(&self, data: &SiteData) -> Result<GenerationReport> {
        for dir in [FINANCING_DIR, PROPERTY_DIR] {
            create_dir(&self.public_dir.join(dir))?;
        }

        let shared = SharedContext {
            site: self.build_site_info(),
            all_loan_types: &data.loan_types,
            all_property_types: &data.property_types,
            all_cities: &data.cities,
        };

        let mut sitemap = Sitemap::new(&self.config);
        let mut report = GenerationReport {
            output_dir: self.public_dir.clone(),
            ..Default::default()
        };

        for family in PageFamily::ALL {
            tracing::info!("Generating {}", family.label());
            let pages = match family {
                PageFamily::LoanHub => loan_hub_pages(data),
                PageFamily::PropertyHub => property_hub_pages(data),
                PageFamily::CityLoan => city_loan_pages(data, &self.config),
                PageFamily::CityProperty => city_property_pages(data, &self.config),
            };
            for page in &pages {
                self.emit_page(page, &shared, &mut sitemap)?;
            }
            tracing::info!("Generated {} {}", pages.len(), family.label());
            report.record(family, pages.len());
        }

        self.generate_sitemap(&sitemap)?;
        self.generate_robots()?;
        report.sitemap_urls = sitemap.len();

        Ok(report)
    }

    fn build_site_info(&self) -> SiteInfo {
        SiteInfo {
            title: self.config.title.clone(),
            url: self.config.url.clone(),
            lastmod: self.config.lastmod(),
            rate_low: self.config.rate_low.clone(),
            rate_high: self.config.rate_high.clone(),
            extra: self.config.extra.clone(),
        }
    }

    /// Create a base context with the shared catalog
    fn create_base_context(&self, shared: &SharedContext) -> Context {
        let mut context = Context::new();
        context.insert("site", &shared.site);
        context.insert("all_loan_types", shared.all_loan_types);
        context.insert("all_property_types", shared.all_property_types);
        context.insert("all_cities", shared.all_cities);
        context
    }

    /// Render one page, write it and record it in the sitemap
    fn emit_page(
        &self,
        page: &PageDescriptor,
        shared: &SharedContext,
        sitemap: &mut Sitemap,
    ) -> Result<()> {
        let path = page.path();
        let page_url = sitemap.page_url(&path);

        let mut context = self.create_base_context(shared);
        if let Some(loan) = page.loan {
            context.insert("loan", loan);
        }
        if let Some(prop) = page.property {
            context.insert("prop", prop);
        }
        if let Some(city) = page.city {
            context.insert("city", city);
        }
        context.insert("seo", &page.seo);
        context.insert("canonical_path", &path);
        context.insert("page_url", &page_url);
        context.insert("depth", &depth_prefix(&path));
        context.insert("transactions", &page.transactions);
        context.insert("faqs", &page.faqs);

        let html = self.renderer.render(page.family.template(), &context)?;
        self.write_output(&path, &html)?;
        sitemap.push_page(&page_url, page.family);

        tracing::debug!("[OK] {}  ({} txns)", path, page.transactions.len());
        Ok(())
    }

    fn generate_sitemap(&self, sitemap: &Sitemap) -> Result<()> {
        let mut context = Context::new();
        context.insert("urls", sitemap.urls());
        let xml = self.renderer.render(SITEMAP_TEMPLATE, &context)?;
        self.write_output("sitemap.xml", &xml)?;
        tracing::info!("Generated sitemap.xml ({} URLs)", sitemap.len());
        Ok(())
    }

    fn generate_robots(&self) -> Result<()> {
        self.write_output("robots.txt", &robots_txt(&self.config.url))?;
        tracing::info!("Generated robots.txt");
        Ok(())
    }

    /// Write a file below the public directory
    fn write_output(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.public_dir.join(relative);
        if let Some(parent) = path.parent() {
            create_dir(parent)?;
        }
        fs::write(&path, content).map_err(|source| GenError::Write { path, source })
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| GenError::Write {
        path: dir.to_path_buf(),
        source,
    })
}
