/// Filter and search over the catalog
///
/// The filter state is transient: it is created with defaults when the
/// collection page starts, changed only by user input and reset on request.
/// Filtering itself is a pure function of the catalog and the state.

use std::fmt;

use super::catalog::{Catalog, PriceBounds};
use super::data::Watch;

/// Brand selector: either every brand or one exact brand
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BrandFilter {
    #[default]
    All,
    Brand(String),
}

impl BrandFilter {
    fn matches(&self, brand: &str) -> bool {
        match self {
            BrandFilter::All => true,
            BrandFilter::Brand(selected) => selected == brand,
        }
    }

    /// "All" followed by every catalog brand, for the brand chooser
    pub fn options(catalog: &Catalog) -> Vec<BrandFilter> {
        std::iter::once(BrandFilter::All)
            .chain(catalog.brands().iter().cloned().map(BrandFilter::Brand))
            .collect()
    }
}

impl fmt::Display for BrandFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrandFilter::All => f.write_str("All"),
            BrandFilter::Brand(brand) => f.write_str(brand),
        }
    }
}

/// Selected price span.
///
/// Always satisfies `min < max` within the catalog bounds: the two handles
/// of the range slider are never allowed to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: u32,
    max: u32,
    bounds: PriceBounds,
}

impl PriceRange {
    /// Full catalog span
    pub fn full(bounds: PriceBounds) -> Self {
        Self {
            min: bounds.min,
            max: bounds.max,
            bounds,
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn bounds(&self) -> PriceBounds {
        self.bounds
    }

    /// Move the lower handle, keeping it at most `max - 1`
    pub fn set_min(&mut self, value: u32) {
        let value = self.bounds.clamp(value);
        self.min = value.min(self.max.saturating_sub(1));
    }

    /// Move the upper handle, keeping it at least `min + 1`
    pub fn set_max(&mut self, value: u32) {
        let value = self.bounds.clamp(value);
        self.max = value.max(self.min.saturating_add(1));
    }

    /// Inclusive on both ends
    pub fn contains(&self, price: u32) -> bool {
        (self.min..=self.max).contains(&price)
    }
}

/// Brand, price and search text controlling which watches are visible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub brand: BrandFilter,
    pub price: PriceRange,
    pub query: String,
}

impl FilterState {
    /// Defaults: every brand, the full price span and no search text
    pub fn new(bounds: PriceBounds) -> Self {
        Self {
            brand: BrandFilter::All,
            price: PriceRange::full(bounds),
            query: String::new(),
        }
    }

    /// Check if this state hides nothing
    pub fn is_default(&self) -> bool {
        *self == Self::new(self.price.bounds())
    }

    /// Reset every filter to its default
    pub fn reset(&mut self) {
        *self = Self::new(self.price.bounds());
    }

    /// Check all three predicates (brand AND price AND search)
    pub fn matches(&self, watch: &Watch) -> bool {
        self.brand.matches(&watch.brand) && self.price_matches(watch) && self.search_matches(watch)
    }

    fn price_matches(&self, watch: &Watch) -> bool {
        watch
            .price_value()
            .is_some_and(|price| self.price.contains(price))
    }

    fn search_matches(&self, watch: &Watch) -> bool {
        if self.query.trim().is_empty() {
            return true;
        }
        let query = self.query.to_lowercase();
        watch.brand.to_lowercase().contains(&query) || watch.model.to_lowercase().contains(&query)
    }
}

/// Select the watches matching the filter state, preserving their order
pub fn filter_watches<'a, I>(watches: I, state: &FilterState) -> Vec<&'a Watch>
where
    I: IntoIterator<Item = &'a Watch>,
{
    watches
        .into_iter()
        .filter(|watch| state.matches(watch))
        .collect()
}

/// Format a price with thousands separators (e.g., 12345 -> "$12,345")
pub fn format_price(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
