use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

use super::data::{Watch, WatchId};

/// Catalog compiled into the binary
const BUNDLED_CATALOG: &str = include_str!("../../assets/watches.json");

/// Price span used when the catalog has no watches
const EMPTY_CATALOG_BOUNDS: PriceBounds = PriceBounds { min: 0, max: 10_000 };

/// Reasons a catalog is rejected at startup
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("watch id {0} appears more than once")]
    DuplicateId(WatchId),

    #[error("watch {0} has no images")]
    NoImages(WatchId),

    #[error("watch {id} has a price without digits: {price:?}")]
    InvalidPrice { id: WatchId, price: String },
}

/// Lowest and highest catalog price, derived once when the catalog is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBounds {
    pub min: u32,
    pub max: u32,
}

impl PriceBounds {
    /// Clamp a value into the bounds
    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }
}

/// The immutable watch catalog.
///
/// Cloning is cheap: the watches live behind an `Arc` so async tasks
/// (recommendations) can hold the catalog without copying it.
#[derive(Debug, Clone)]
pub struct Catalog {
    watches: Arc<[Watch]>,
    bounds: PriceBounds,
    brands: Arc<[String]>,
}

impl Catalog {
    /// Build a catalog, enforcing unique ids, non-empty images and numeric prices
    pub fn new(watches: Vec<Watch>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(watches.len());
        let mut prices = Vec::with_capacity(watches.len());

        for watch in &watches {
            if !seen.insert(watch.id) {
                return Err(CatalogError::DuplicateId(watch.id));
            }
            if watch.image_urls.is_empty() {
                return Err(CatalogError::NoImages(watch.id));
            }
            let price = watch.price_value().ok_or_else(|| CatalogError::InvalidPrice {
                id: watch.id,
                price: watch.price.clone(),
            })?;
            prices.push(price);
        }

        let bounds = match (prices.iter().min(), prices.iter().max()) {
            // Keep min < max even when every watch costs the same
            (Some(&min), Some(&max)) if min == max => PriceBounds {
                min,
                max: max.saturating_add(1),
            },
            (Some(&min), Some(&max)) => PriceBounds { min, max },
            _ => EMPTY_CATALOG_BOUNDS,
        };

        let mut brands: Vec<String> = Vec::new();
        for watch in &watches {
            if !brands.contains(&watch.brand) {
                brands.push(watch.brand.clone());
            }
        }

        Ok(Self {
            watches: watches.into(),
            bounds,
            brands: brands.into(),
        })
    }

    /// Parse a catalog from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let watches: Vec<Watch> = serde_json::from_str(json)?;
        Self::new(watches)
    }

    /// Load the catalog bundled with the application
    pub fn bundled() -> Result<Self, CatalogError> {
        let catalog = Self::from_json(BUNDLED_CATALOG)?;
        tracing::info!(
            watches = catalog.len(),
            brands = catalog.brands.len(),
            min_price = catalog.bounds.min,
            max_price = catalog.bounds.max,
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// All watches in catalog order
    pub fn watches(&self) -> &[Watch] {
        &self.watches
    }

    pub fn len(&self) -> usize {
        self.watches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }

    pub fn get(&self, id: WatchId) -> Option<&Watch> {
        self.watches.iter().find(|watch| watch.id == id)
    }

    pub fn price_bounds(&self) -> PriceBounds {
        self.bounds
    }

    /// Distinct brands in order of first appearance
    pub fn brands(&self) -> &[String] {
        &self.brands
    }
}
