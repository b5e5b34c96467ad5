//! The flat restaurant × menu-item join record.

use serde::{Deserialize, Serialize};

/// One restaurant–menu-item pairing, produced by ingestion and stored as the
/// payload of an indexed point.
///
/// Identity fields are required: a retrieved payload missing any of them is
/// rejected at deserialization time rather than rendered half-empty.
/// Columns that are genuinely nullable in the source data are `Option` and
/// render as `"Not available"` wherever they are formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuRecord {
    /// Restaurant identifier shared by both tabular sources.
    pub restaurant_id: i64,
    /// Restaurant name.
    pub restaurant_name: String,
    /// Aggregate review score of the restaurant.
    pub score: Option<f64>,
    /// Number of ratings behind the score.
    pub ratings: Option<f64>,
    /// Restaurant category, e.g. "Burgers, Fast Food".
    pub restaurant_category: String,
    /// Price range bucket, e.g. "$$".
    pub price_range: Option<String>,
    /// Full street address including city and state.
    pub full_address: String,
    pub zip_code: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Menu section the item belongs to.
    pub menu_category: String,
    /// Menu item name.
    pub item_name: String,
    /// Menu item description.
    pub description: Option<String>,
    /// Item price as printed in the source, e.g. "9.99 USD".
    pub item_price: Option<String>,
    /// City extracted from the trailing ", City, ST" address suffix.
    pub city: Option<String>,
    /// Two-letter state code extracted alongside `city`.
    pub state: Option<String>,
}

impl MenuRecord {
    /// Render an optional field, substituting the fixed placeholder for
    /// missing values. The placeholder text feeds directly into embedding
    /// input and must stay stable.
    pub fn display_or_na<T: std::fmt::Display>(value: Option<&T>) -> String {
        match value {
            Some(v) => v.to_string(),
            None => "Not available".to_string(),
        }
    }
}
