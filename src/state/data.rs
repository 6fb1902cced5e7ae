/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the catalog, the recommendation client and the UI layer.

use serde::{Deserialize, Serialize};

/// Unique catalog identifier of a watch
pub type WatchId = u32;

/// Represents a single watch in the catalog
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Watch {
    /// Unique catalog ID, assigned when the catalog is authored
    pub id: WatchId,
    pub brand: String,
    pub model: String,
    /// Display price with currency formatting (e.g., "$12,345")
    pub price: String,
    pub case_material: String,
    pub strap_material: String,
    pub dial_color: String,
    pub description: String,
    /// Ordered image references, never empty
    pub image_urls: Vec<String>,
}

impl Watch {
    /// Numeric price used for every comparison
    pub fn price_value(&self) -> Option<u32> {
        parse_price(&self.price)
    }

    /// First image, used for grid cards and as the default detail image
    pub fn cover_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }
}

/// Parse a formatted price string into an integer.
///
/// Every character that is not an ASCII digit is removed before parsing,
/// so "$12,345" and "USD 12 345.-" both yield 12345. Returns None when no
/// digits remain or the value does not fit.
pub fn parse_price(price: &str) -> Option<u32> {
    let digits: String = price.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Reduced projection of a watch sent to the recommendation service.
///
/// Image references are left out to bound the prompt size.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchSummary<'a> {
    pub id: WatchId,
    pub brand: &'a str,
    pub model: &'a str,
    pub description: &'a str,
    pub case_material: &'a str,
    pub strap_material: &'a str,
    pub dial_color: &'a str,
    pub price: &'a str,
}

impl<'a> From<&'a Watch> for WatchSummary<'a> {
    fn from(watch: &'a Watch) -> Self {
        Self {
            id: watch.id,
            brand: &watch.brand,
            model: &watch.model,
            description: &watch.description,
            case_material: &watch.case_material,
            strap_material: &watch.strap_material,
            dial_color: &watch.dial_color,
            price: &watch.price,
        }
    }
}

/// The selected watch as described to the recommendation service
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SelectedSummary<'a> {
    pub brand: &'a str,
    pub model: &'a str,
    pub description: &'a str,
    pub price: &'a str,
}

impl<'a> From<&'a Watch> for SelectedSummary<'a> {
    fn from(watch: &'a Watch) -> Self {
        Self {
            brand: &watch.brand,
            model: &watch.model,
            description: &watch.description,
            price: &watch.price,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_watch(id: WatchId, brand: &str, model: &str, price: &str) -> Watch {
    Watch {
        id,
        brand: brand.to_string(),
        model: model.to_string(),
        price: price.to_string(),
        case_material: "Steel".to_string(),
        strap_material: "Leather".to_string(),
        dial_color: "Black".to_string(),
        description: format!("{} {} test watch", brand, model),
        image_urls: vec![format!("https://example.com/{}.jpg", id)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_strips_every_non_digit() {
        assert_eq!(parse_price("$12,345"), Some(12345));
        assert_eq!(parse_price("CHF 9'800.-"), Some(9800));
        assert_eq!(parse_price("1 2a3"), Some(123));
        assert_eq!(parse_price("$0"), Some(0));
    }

    #[test]
    fn test_parse_price_without_digits() {
        assert_eq!(parse_price("Price on request"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn test_parse_price_overflow() {
        assert_eq!(parse_price("$99,999,999,999"), None);
    }

    #[test]
    fn test_watch_deserializes_camel_case() {
        let json = r#"{
            "id": 7,
            "brand": "Omega",
            "model": "Speedmaster",
            "price": "$7,000",
            "caseMaterial": "Steel",
            "strapMaterial": "Steel",
            "dialColor": "Black",
            "description": "Moonwatch",
            "imageUrls": ["a.jpg", "b.jpg"]
        }"#;
        let watch: Watch = serde_json::from_str(json).unwrap();
        assert_eq!(watch.id, 7);
        assert_eq!(watch.case_material, "Steel");
        assert_eq!(watch.price_value(), Some(7000));
        assert_eq!(watch.cover_image(), Some("a.jpg"));
    }

    #[test]
    fn test_summary_drops_images() {
        let watch = sample_watch(3, "Rolex", "Submariner", "$10,000");
        let json = serde_json::to_value(WatchSummary::from(&watch)).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["caseMaterial"], "Steel");
        assert!(json.get("imageUrls").is_none());
    }
}
