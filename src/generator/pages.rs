//! Page planning - decides which pages exist and what goes on each

use crate::config::SiteConfig;
use crate::content::{City, Faq, LoanType, PropertyType, Seo, SiteData, Transaction};
use crate::faq::{self, FaqContext};
use crate::filter::TransactionFilter;
use crate::templates::{
    CITY_LOAN_TEMPLATE, CITY_PROPERTY_TEMPLATE, LOAN_HUB_TEMPLATE, PROPERTY_HUB_TEMPLATE,
};

pub const FINANCING_DIR: &str = "financing";
pub const PROPERTY_DIR: &str = "property";

/// The four generated page families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFamily {
    LoanHub,
    PropertyHub,
    CityLoan,
    CityProperty,
}

impl PageFamily {
    pub const ALL: [PageFamily; 4] = [
        PageFamily::LoanHub,
        PageFamily::PropertyHub,
        PageFamily::CityLoan,
        PageFamily::CityProperty,
    ];

    pub fn template(self) -> &'static str {
        match self {
            PageFamily::LoanHub => LOAN_HUB_TEMPLATE,
            PageFamily::PropertyHub => PROPERTY_HUB_TEMPLATE,
            PageFamily::CityLoan => CITY_LOAN_TEMPLATE,
            PageFamily::CityProperty => CITY_PROPERTY_TEMPLATE,
        }
    }

    /// Output subdirectory
    pub fn dir(self) -> &'static str {
        match self {
            PageFamily::LoanHub | PageFamily::CityLoan => FINANCING_DIR,
            PageFamily::PropertyHub | PageFamily::CityProperty => PROPERTY_DIR,
        }
    }

    pub fn changefreq(self) -> &'static str {
        "monthly"
    }

    /// Hub pages rank above city combinations
    pub fn priority(self) -> &'static str {
        match self {
            PageFamily::LoanHub | PageFamily::PropertyHub => "0.9",
            PageFamily::CityLoan | PageFamily::CityProperty => "0.7",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PageFamily::LoanHub => "Loan Type Hub Pages",
            PageFamily::PropertyHub => "Property Type Hub Pages",
            PageFamily::CityLoan => "City x Loan Type Pages",
            PageFamily::CityProperty => "City x Property Type Pages",
        }
    }
}

/// Everything needed to render and place one page
#[derive(Debug, Clone)]
pub struct PageDescriptor<'a> {
    pub family: PageFamily,
    pub slug: String,
    pub seo: Seo,
    pub loan: Option<&'a LoanType>,
    pub property: Option<&'a PropertyType>,
    pub city: Option<&'a City>,
    pub transactions: Vec<&'a Transaction>,
    pub faqs: Vec<Faq>,
}

impl PageDescriptor<'_> {
    /// Output path relative to the public directory, e.g. `financing/cmbs-austin-tx.html`
    pub fn path(&self) -> String {
        format!("{}/{}.html", self.family.dir(), self.slug)
    }
}

/// One page per loan type, showing all of its transactions
pub fn loan_hub_pages(data: &SiteData) -> Vec<PageDescriptor<'_>> {
    data.loan_types
        .iter()
        .map(|loan| PageDescriptor {
            family: PageFamily::LoanHub,
            slug: loan.slug.clone(),
            seo: loan.seo.clone(),
            loan: Some(loan),
            property: None,
            city: None,
            transactions: TransactionFilter::new()
                .loan(&loan.slug)
                .apply(&data.transactions),
            faqs: data.faqs.for_loan(&loan.slug).to_vec(),
        })
        .collect()
}

/// One page per property type, showing all of its transactions
pub fn property_hub_pages(data: &SiteData) -> Vec<PageDescriptor<'_>> {
    data.property_types
        .iter()
        .map(|prop| PageDescriptor {
            family: PageFamily::PropertyHub,
            slug: prop.slug.clone(),
            seo: prop.seo.clone(),
            loan: None,
            property: Some(prop),
            city: None,
            transactions: TransactionFilter::new()
                .property(&prop.slug)
                .apply(&data.transactions),
            faqs: data.faqs.for_property(&prop.slug).to_vec(),
        })
        .collect()
}

/// One page per loan type and city, loan-major order
pub fn city_loan_pages<'a>(data: &'a SiteData, config: &SiteConfig) -> Vec<PageDescriptor<'a>> {
    let brand = &config.title;
    let mut pages = Vec::with_capacity(data.loan_types.len() * data.cities.len());

    for loan in &data.loan_types {
        for city in &data.cities {
            let filter = TransactionFilter::new().loan(&loan.slug);
            let transactions = state_transactions(
                &data.transactions,
                filter,
                &city.state,
                config.fallback_limit,
            );

            let ctx = FaqContext::new(&config.rate_low, &config.rate_high)
                .with_loan(loan)
                .with_city(city);

            pages.push(PageDescriptor {
                family: PageFamily::CityLoan,
                slug: format!("{}-{}", loan.slug, city.slug),
                seo: Seo {
                    title: format!("{} in {}, {} | {}", loan.name, city.city, city.state, brand),
                    meta_description: format!(
                        "{} for commercial real estate in {}, {}. Competitive rates from 1,000+ lenders. Get a free quote from {}.",
                        loan.name, city.city, city.state, brand
                    ),
                },
                loan: Some(loan),
                property: None,
                city: Some(city),
                transactions,
                faqs: faq::compose_city_faqs(&data.faqs.city_templates, &ctx),
            });
        }
    }

    pages
}

/// One page per property type and city, property-major order
pub fn city_property_pages<'a>(
    data: &'a SiteData,
    config: &SiteConfig,
) -> Vec<PageDescriptor<'a>> {
    let brand = &config.title;
    let mut pages = Vec::with_capacity(data.property_types.len() * data.cities.len());

    for prop in &data.property_types {
        for city in &data.cities {
            let filter = TransactionFilter::new().property(&prop.slug);
            let transactions = state_transactions(
                &data.transactions,
                filter,
                &city.state,
                config.fallback_limit,
            );

            let ctx = FaqContext::new(&config.rate_low, &config.rate_high)
                .with_property(prop)
                .with_city(city);

            pages.push(PageDescriptor {
                family: PageFamily::CityProperty,
                slug: format!("{}-{}", prop.slug, city.slug),
                seo: Seo {
                    title: format!(
                        "{} Financing in {}, {} | {}",
                        prop.name, city.city, city.state, brand
                    ),
                    meta_description: format!(
                        "{} financing in {}, {}. Banks, life companies, CMBS, bridge & construction loans. Free quote from {}.",
                        prop.name, city.city, city.state, brand
                    ),
                },
                loan: None,
                property: Some(prop),
                city: Some(city),
                transactions,
                faqs: faq::compose_city_faqs(&data.faqs.city_templates, &ctx),
            });
        }
    }

    pages
}

/// Transactions in `state`; when the state has none, the top `limit`
/// transactions from anywhere
fn state_transactions<'t>(
    transactions: &'t [Transaction],
    filter: TransactionFilter<'_>,
    state: &str,
    limit: usize,
) -> Vec<&'t Transaction> {
    let scoped = filter.clone().state(state).apply(transactions);
    if !scoped.is_empty() {
        return scoped;
    }

    tracing::debug!("No transactions in {}, falling back to top {}", state, limit);
    let mut fallback = filter.apply(transactions);
    fallback.truncate(limit);
    fallback
}
