//! Data loader - reads the JSON catalogs from the data directory

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use super::{City, FaqCatalog, LoanType, PropertyType, SiteData, Transaction};
use crate::error::{GenError, Result};

pub const TRANSACTIONS_FILE: &str = "transactions.json";
pub const LOAN_TYPES_FILE: &str = "loan_types.json";
pub const PROPERTY_TYPES_FILE: &str = "property_types.json";
pub const CITIES_FILE: &str = "cities.json";
pub const FAQS_FILE: &str = "faqs.json";

/// Loads the fixed set of data sources
pub struct DataLoader {
    data_dir: PathBuf,
}

impl DataLoader {
    /// Create a new loader rooted at `data_dir`
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Read and parse one named source
    pub fn load_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.data_dir.join(name);
        let content = fs::read_to_string(&path).map_err(|source| GenError::Load {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| GenError::Parse { path, source })
    }

    /// Load every source the generator needs
    pub fn load_all(&self) -> Result<SiteData> {
        let transactions: Vec<Transaction> = self.load_json(TRANSACTIONS_FILE)?;
        let loan_types: Vec<LoanType> = self.load_json(LOAN_TYPES_FILE)?;
        let property_types: Vec<PropertyType> = self.load_json(PROPERTY_TYPES_FILE)?;
        let mut cities: Vec<City> = self.load_json(CITIES_FILE)?;
        let faqs: FaqCatalog = self.load_json(FAQS_FILE)?;

        for city in cities.iter_mut().filter(|c| c.slug.is_empty()) {
            city.slug = slug::slugify(format!("{} {}", city.city, city.state));
        }

        tracing::info!(
            "Loaded {} transactions, {} loan types, {} property types, {} cities",
            transactions.len(),
            loan_types.len(),
            property_types.len(),
            cities.len()
        );

        Ok(SiteData {
            transactions,
            loan_types,
            property_types,
            cities,
            faqs,
        })
    }
}
