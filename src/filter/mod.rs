//! Transaction filtering
//!
//! Narrows the transaction list by loan type, property type, state and city,
//! then orders the survivors by amount (largest first).

use crate::content::Transaction;

/// Criteria for selecting transactions. Unset or empty criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter<'a> {
    loan: Option<&'a str>,
    property: Option<&'a str>,
    city: Option<&'a str>,
    state: Option<&'a str>,
}

impl<'a> TransactionFilter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact match on `loan_type_slug`
    pub fn loan(mut self, slug: &'a str) -> Self {
        self.loan = non_empty(slug);
        self
    }

    /// Exact match on `property_slug`
    pub fn property(mut self, slug: &'a str) -> Self {
        self.property = non_empty(slug);
        self
    }

    /// Case-insensitive substring match on the transaction city
    pub fn city(mut self, name: &'a str) -> Self {
        self.city = non_empty(name);
        self
    }

    /// Exact match on `state`
    pub fn state(mut self, code: &'a str) -> Self {
        self.state = non_empty(code);
        self
    }

    /// Apply the criteria, largest amount first. Ties keep input order.
    pub fn apply<'t>(&self, transactions: &'t [Transaction]) -> Vec<&'t Transaction> {
        let city = self.city.map(str::to_lowercase);

        let mut results: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| self.loan.map_or(true, |l| t.loan_type_slug == l))
            .filter(|t| self.property.map_or(true, |p| t.property_slug == p))
            .filter(|t| self.state.map_or(true, |s| t.state == s))
            .filter(|t| {
                city.as_deref()
                    .map_or(true, |c| t.city.to_lowercase().contains(c))
            })
            .collect();

        // Vec::sort_by is stable
        results.sort_by(|a, b| b.amount().total_cmp(&a.amount()));
        results
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Filter transactions by any combination of loan slug, property slug, city and state
pub fn filter_transactions<'t>(
    transactions: &'t [Transaction],
    loan: Option<&str>,
    property: Option<&str>,
    city: Option<&str>,
    state: Option<&str>,
) -> Vec<&'t Transaction> {
    let mut filter = TransactionFilter::new();
    if let Some(l) = loan {
        filter = filter.loan(l);
    }
    if let Some(p) = property {
        filter = filter.property(p);
    }
    if let Some(c) = city {
        filter = filter.city(c);
    }
    if let Some(s) = state {
        filter = filter.state(s);
    }
    filter.apply(transactions)
}
