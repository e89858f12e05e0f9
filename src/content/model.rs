//! Catalog and transaction models

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A closed deal shown as social proof on the generated pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Numeric loan amount used for ordering
    #[serde(default)]
    pub amount_num: Option<f64>,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub loan_type_slug: String,

    #[serde(default)]
    pub property_slug: String,

    /// Display fields (amount string, lender, rate, term, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// Amount for sorting; a missing amount counts as zero
    pub fn amount(&self) -> f64 {
        self.amount_num.unwrap_or(0.0)
    }
}

/// Title and meta description pair for search engines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub meta_description: String,
}

/// A loan product (bridge, CMBS, SBA 504, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanType {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub seo: Seo,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A property class (multifamily, industrial, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyType {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub seo: Seo,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A target market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    /// URL slug; derived from city and state when absent
    #[serde(default)]
    pub slug: String,
    /// Display name
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub metro: String,
    /// Free-text market blurb
    #[serde(default)]
    pub context: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A question/answer pair, possibly holding `{token}` placeholders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    #[serde(alias = "question")]
    pub q: String,
    #[serde(alias = "answer")]
    pub a: String,
}

/// Contents of faqs.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqCatalog {
    /// Hub page FAQs keyed by loan slug
    pub loan_types: IndexMap<String, Vec<Faq>>,
    /// Hub page FAQs keyed by property slug
    pub property_types: IndexMap<String, Vec<Faq>>,
    /// City page templates keyed by category (`financing` or `property`)
    pub city_templates: IndexMap<String, Vec<Faq>>,
}

impl FaqCatalog {
    pub fn for_loan(&self, slug: &str) -> &[Faq] {
        self.loan_types.get(slug).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn for_property(&self, slug: &str) -> &[Faq] {
        self.property_types
            .get(slug)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Everything read from the data directory
#[derive(Debug, Clone, Default)]
pub struct SiteData {
    pub transactions: Vec<Transaction>,
    pub loan_types: Vec<LoanType>,
    pub property_types: Vec<PropertyType>,
    pub cities: Vec<City>,
    pub faqs: FaqCatalog,
}
