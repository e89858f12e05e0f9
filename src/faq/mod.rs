//! FAQ composition for city pages
//!
//! City page FAQs are written once as templates containing `{token}`
//! placeholders and resolved per page. Resolution is a single pass over the
//! text, so a substituted value is never scanned for further tokens.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::content::{City, Faq, LoanType, PropertyType};

/// Characters of the city blurb kept in `{context_snippet}`
pub const SNIPPET_CHARS: usize = 120;

pub const FINANCING_CATEGORY: &str = "financing";
pub const PROPERTY_CATEGORY: &str = "property";

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"\{([a-z_]+)\}").unwrap();
}

/// Per-page values available to FAQ templates
#[derive(Debug, Clone, Copy)]
pub struct FaqContext<'a> {
    pub city: Option<&'a City>,
    pub loan: Option<&'a LoanType>,
    pub property: Option<&'a PropertyType>,
    pub rate_low: &'a str,
    pub rate_high: &'a str,
}

impl<'a> FaqContext<'a> {
    pub fn new(rate_low: &'a str, rate_high: &'a str) -> Self {
        Self {
            city: None,
            loan: None,
            property: None,
            rate_low,
            rate_high,
        }
    }

    pub fn with_city(mut self, city: &'a City) -> Self {
        self.city = Some(city);
        self
    }

    pub fn with_loan(mut self, loan: &'a LoanType) -> Self {
        self.loan = Some(loan);
        self
    }

    pub fn with_property(mut self, property: &'a PropertyType) -> Self {
        self.property = Some(property);
        self
    }

    /// Template category: financing when a loan is present, property otherwise
    pub fn category(&self) -> &'static str {
        if self.loan.is_some() {
            FINANCING_CATEGORY
        } else {
            PROPERTY_CATEGORY
        }
    }

    /// Value for a token name, `None` when the token is not recognized.
    /// Recognized tokens without backing context resolve to "".
    fn lookup(&self, token: &str) -> Option<String> {
        let value = match token {
            "city" => self.city.map(|c| c.city.clone()).unwrap_or_default(),
            "metro" => self.city.map(|c| c.metro.clone()).unwrap_or_default(),
            "loan_type" => self.loan.map(|l| l.name.to_lowercase()).unwrap_or_default(),
            "property_type" => self
                .property
                .map(|p| p.name.to_lowercase())
                .unwrap_or_default(),
            "rate_low" => self.rate_low.to_string(),
            "rate_high" => self.rate_high.to_string(),
            "context_snippet" => self.city.map(|c| snippet(&c.context)).unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }
}

/// First [`SNIPPET_CHARS`] characters of a blurb followed by "..."
pub fn snippet(text: &str) -> String {
    let head: String = text.chars().take(SNIPPET_CHARS).collect();
    format!("{}...", head)
}

/// Resolve every recognized token in `text`. Unknown `{words}` stay literal.
pub fn resolve(text: &str, ctx: &FaqContext) -> String {
    TOKEN_RE
        .replace_all(text, |caps: &Captures| {
            ctx.lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Resolve a list of templates without touching the originals
pub fn compose(templates: &[Faq], ctx: &FaqContext) -> Vec<Faq> {
    templates
        .iter()
        .map(|tpl| Faq {
            q: resolve(&tpl.q, ctx),
            a: resolve(&tpl.a, ctx),
        })
        .collect()
}

/// Pick the category matching the context and resolve its templates
pub fn compose_city_faqs(templates: &IndexMap<String, Vec<Faq>>, ctx: &FaqContext) -> Vec<Faq> {
    templates
        .get(ctx.category())
        .map(|tpls| compose(tpls, ctx))
        .unwrap_or_default()
}
