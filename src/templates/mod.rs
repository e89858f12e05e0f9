//! Built-in page templates using the Tera template engine
//!
//! The default theme is embedded in the binary. Files found in the site's
//! template directory replace embedded templates of the same name, or add
//! new ones (for example extra partials).

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;
use tera::{Context, Tera};
use walkdir::WalkDir;

use crate::error::{GenError, Result};

pub const LOAN_HUB_TEMPLATE: &str = "financing_page.html";
pub const PROPERTY_HUB_TEMPLATE: &str = "property_page.html";
pub const CITY_LOAN_TEMPLATE: &str = "city_financing.html";
pub const CITY_PROPERTY_TEMPLATE: &str = "city_property.html";
pub const SITEMAP_TEMPLATE: &str = "sitemap.xml";

const BUILTIN: &str = "<builtin>";

/// Template renderer with the embedded default theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a renderer with the embedded templates only
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Pages are assembled from trusted catalog HTML
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            (LOAN_HUB_TEMPLATE, include_str!("theme/financing_page.html")),
            (PROPERTY_HUB_TEMPLATE, include_str!("theme/property_page.html")),
            (CITY_LOAN_TEMPLATE, include_str!("theme/city_financing.html")),
            (CITY_PROPERTY_TEMPLATE, include_str!("theme/city_property.html")),
            (SITEMAP_TEMPLATE, include_str!("theme/sitemap.xml")),
            // Partials
            ("partials/nav.html", include_str!("theme/partials/nav.html")),
            (
                "partials/footer.html",
                include_str!("theme/partials/footer.html"),
            ),
            (
                "partials/transactions.html",
                include_str!("theme/partials/transactions.html"),
            ),
            ("partials/faqs.html", include_str!("theme/partials/faqs.html")),
        ])
        .map_err(|source| GenError::Render {
            template: BUILTIN.to_string(),
            source,
        })?;

        tera.register_filter("money", money_filter);
        tera.register_filter("clip_description", clip_description_filter);

        Ok(Self { tera })
    }

    /// Create a renderer and apply overrides from `template_dir` if it exists
    pub fn with_overrides<P: AsRef<Path>>(template_dir: P) -> Result<Self> {
        let mut renderer = Self::new()?;
        let template_dir = template_dir.as_ref();
        if !template_dir.is_dir() {
            return Ok(renderer);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(template_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_template_file(path) {
                continue;
            }
            let Ok(relative) = path.strip_prefix(template_dir) else {
                continue;
            };
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            tracing::debug!("Template override: {}", name);
            files.push((path.to_path_buf(), Some(name)));
        }

        if !files.is_empty() {
            tracing::info!("Loaded {} template overrides from {:?}", files.len(), template_dir);
            renderer
                .tera
                .add_template_files(files)
                .map_err(|source| GenError::Render {
                    template: template_dir.display().to_string(),
                    source,
                })?;
        }

        Ok(renderer)
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        self.tera
            .render(template_name, context)
            .map_err(|source| GenError::Render {
                template: template_name.to_string(),
                source,
            })
    }
}

/// Extensions picked up from the override directory
const TEMPLATE_EXTENSIONS: [&str; 3] = ["html", "xml", "txt"];

fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn is_template_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| TEMPLATE_EXTENSIONS.contains(&ext))
}

const MONEY_UNITS: [(f64, &str); 4] = [(1e9, "B"), (1e6, "M"), (1e3, "K"), (1.0, "")];

/// Short dollar form of an amount: $12.5M, $850K, $900
pub fn format_money(amount: f64) -> String {
    let tenths = |unit: usize| (amount * 10.0 / MONEY_UNITS[unit].0).round();

    let mut unit = MONEY_UNITS
        .iter()
        .position(|(scale, _)| amount >= *scale)
        .unwrap_or(MONEY_UNITS.len() - 1);
    let mut scaled = tenths(unit);
    // 999_950 rounds to 1000.0K; promote to 1M
    if unit > 0 && scaled >= 10_000.0 {
        unit -= 1;
        scaled = tenths(unit);
    }

    let digits = format!("{:.1}", scaled / 10.0);
    format!("${}{}", digits.trim_end_matches(".0"), MONEY_UNITS[unit].1)
}

/// Tera filter: format a numeric amount; null counts as zero
fn money_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let amount = value.as_f64().unwrap_or(0.0);
    Ok(tera::Value::String(format_money(amount)))
}

/// Longest meta description search engines display in full
pub const META_DESCRIPTION_CHARS: usize = 160;

/// Cap `text` at `max` characters, cutting back to a word boundary and
/// ending in "..." so the result never exceeds `max`
pub fn clip_description(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max.saturating_sub(3)).collect();
    let cut = match head.rfind(char::is_whitespace) {
        Some(idx) if idx > 0 => &head[..idx],
        _ => head.as_str(),
    };
    format!("{}...", cut.trim_end_matches(|c: char| c.is_whitespace() || c == ',' || c == '.'))
}

/// Tera filter: `{{ seo.meta_description | clip_description }}`, optional `length`
fn clip_description_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let text = tera::try_get_value!("clip_description", "value", String, value);
    let max = match args.get("length") {
        Some(val) => tera::try_get_value!("clip_description", "length", usize, val),
        None => META_DESCRIPTION_CHARS,
    };
    Ok(tera::Value::String(clip_description(&text, max)))
}

/// Site-wide values exposed to every template as `site`
#[derive(Debug, Clone, Serialize)]
pub struct SiteInfo {
    pub title: String,
    pub url: String,
    pub lastmod: String,
    pub rate_low: String,
    pub rate_high: String,
    pub extra: IndexMap<String, serde_yaml::Value>,
}
