use serde::{Deserialize, Serialize};

/// A retailer listing. Only `title` and `manufacturer` take part in matching;
/// `currency` and `price` are carried through to the output as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default, alias = "announced-date")]
    pub announced_date: Option<String>,
}

/// Every listing judged to describe one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchGroup {
    pub product_name: String,
    pub listings: Vec<Listing>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub listings: Vec<Listing>,
}

#[derive(Debug, Clone)]
pub struct MatchReport {
    pub groups: Vec<MatchGroup>,
    pub listing_count: usize,
}

impl MatchReport {
    pub fn product_count(&self) -> usize {
        self.groups.len()
    }

    pub fn matched_products(&self) -> usize {
        self.groups.iter().filter(|g| !g.listings.is_empty()).count()
    }

    /// Listing-to-product assignments; a listing matched by two products counts twice.
    pub fn total_assignments(&self) -> usize {
        self.groups.iter().map(|g| g.listings.len()).sum()
    }
}

/// What the loader does with a line that is not a valid record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum MalformedPolicy {
    #[default]
    Abort,
    Skip,
}
