//! Content module - data models and loading

pub mod loader;
mod model;

pub use loader::DataLoader;
pub use model::{City, Faq, FaqCatalog, LoanType, PropertyType, Seo, SiteData, Transaction};
