//! Tabular corpus loading and merging.
//!
//! Two row-oriented CSV sources — restaurant attributes and menu items —
//! are deduplicated, inner-joined on the restaurant identifier, and
//! flattened into one [`MenuRecord`] per restaurant–menu-item pair.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use tracing::info;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::MenuRecord;

/// Trailing ", City, ST" suffix of a full street address.
const CITY_STATE_PATTERN: &str = r",\s*([^,]+?)\s*,\s*([A-Z]{2})\b";

fn city_state_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CITY_STATE_PATTERN).expect("valid city/state pattern"))
}

/// One row of the restaurant attributes source.
#[derive(Debug, Deserialize)]
struct RestaurantRow {
    id: i64,
    name: String,
    score: Option<f64>,
    ratings: Option<f64>,
    category: String,
    price_range: Option<String>,
    full_address: String,
    zip_code: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
}

/// One row of the menu items source. Hash/Eq drive full-row deduplication.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Hash)]
struct MenuRow {
    restaurant_id: i64,
    category: String,
    name: String,
    description: Option<String>,
    price: Option<String>,
}

/// Loads and merges the two tabular sources into the flat corpus.
pub struct CorpusLoader {
    restaurants_path: PathBuf,
    menus_path: PathBuf,
    max_menu_rows: usize,
}

impl CorpusLoader {
    pub fn new(
        restaurants_path: impl Into<PathBuf>,
        menus_path: impl Into<PathBuf>,
        max_menu_rows: usize,
    ) -> Self {
        Self {
            restaurants_path: restaurants_path.into(),
            menus_path: menus_path.into(),
            max_menu_rows,
        }
    }

    /// Load both sources, deduplicate, and inner-join into records.
    ///
    /// Restaurants are deduplicated by name (first occurrence wins), menu
    /// rows by full-row equality. Menu rows whose restaurant id has no
    /// surviving restaurant are dropped by the join.
    pub fn load_and_merge(&self) -> DomainResult<Vec<MenuRecord>> {
        let restaurants = self.load_restaurants()?;
        let menus = self.load_menu_rows()?;

        let mut records = Vec::new();
        for menu in &menus {
            if let Some(restaurant) = restaurants.get(&menu.restaurant_id) {
                records.push(Self::merge(restaurant, menu));
            }
        }

        info!(
            restaurants = restaurants.len(),
            menu_rows = menus.len(),
            records = records.len(),
            "Merged corpus sources"
        );

        Ok(records)
    }

    /// Render the fixed embedding template for one record. Missing values
    /// become the literal "Not available" — this substitution shapes the
    /// embedding space and must stay stable.
    pub fn format_embedding_text(record: &MenuRecord) -> String {
        let na = MenuRecord::display_or_na::<String>;
        format!(
            "{} - {} - {}. Menu item: {} - {}. Description: {}. Price Range: {}. Ratings: {}.",
            record.restaurant_name,
            record.restaurant_category,
            record.full_address,
            record.item_name,
            record.menu_category,
            na(record.description.as_ref()),
            na(record.price_range.as_ref()),
            MenuRecord::display_or_na(record.ratings.as_ref()),
        )
    }

    fn load_restaurants(&self) -> DomainResult<HashMap<i64, RestaurantRow>> {
        let mut reader = open_reader(&self.restaurants_path)?;

        let mut seen_names: HashSet<String> = HashSet::new();
        let mut by_id = HashMap::new();
        for row in reader.deserialize() {
            let row: RestaurantRow = row.map_err(invalid_source(&self.restaurants_path))?;
            if seen_names.insert(row.name.clone()) {
                by_id.insert(row.id, row);
            }
        }
        Ok(by_id)
    }

    fn load_menu_rows(&self) -> DomainResult<Vec<MenuRow>> {
        let mut reader = open_reader(&self.menus_path)?;

        let mut seen: HashSet<MenuRow> = HashSet::new();
        let mut rows = Vec::new();
        for row in reader.deserialize().take(self.max_menu_rows) {
            let row: MenuRow = row.map_err(invalid_source(&self.menus_path))?;
            if seen.insert(row.clone()) {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    fn merge(restaurant: &RestaurantRow, menu: &MenuRow) -> MenuRecord {
        let (city, state) = extract_city_state(&restaurant.full_address);
        MenuRecord {
            restaurant_id: restaurant.id,
            restaurant_name: restaurant.name.clone(),
            score: restaurant.score,
            ratings: restaurant.ratings,
            restaurant_category: restaurant.category.clone(),
            price_range: restaurant.price_range.clone(),
            full_address: restaurant.full_address.clone(),
            zip_code: restaurant.zip_code.clone(),
            lat: restaurant.lat,
            lng: restaurant.lng,
            menu_category: menu.category.clone(),
            item_name: menu.name.clone(),
            description: menu.description.clone(),
            item_price: menu.price.clone(),
            city,
            state,
        }
    }
}

/// Pattern-extract the trailing ", City, ST" suffix. Extraction failure is
/// not an error — both parts stay empty.
fn extract_city_state(full_address: &str) -> (Option<String>, Option<String>) {
    match city_state_regex().captures(full_address) {
        Some(caps) => (
            caps.get(1).map(|m| m.as_str().to_string()),
            caps.get(2).map(|m| m.as_str().to_string()),
        ),
        None => (None, None),
    }
}

fn open_reader(path: &Path) -> DomainResult<csv::Reader<std::fs::File>> {
    if !path.exists() {
        return Err(DomainError::SourceNotFound(path.to_path_buf()));
    }
    csv::Reader::from_path(path).map_err(|e| DomainError::InvalidSource(e.to_string()))
}

fn invalid_source(path: &Path) -> impl Fn(csv::Error) -> DomainError + '_ {
    move |e| DomainError::InvalidSource(format!("{}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_city_and_state_from_suffix() {
        let (city, state) = extract_city_state("484 6th Ave, New York, NY 10011");
        assert_eq!(city.as_deref(), Some("New York"));
        assert_eq!(state.as_deref(), Some("NY"));
    }

    #[test]
    fn extraction_failure_leaves_both_empty() {
        let (city, state) = extract_city_state("no commas here");
        assert!(city.is_none());
        assert!(state.is_none());

        // Lowercase state code does not match the pattern.
        let (city, state) = extract_city_state("1 Main St, Springfield, il");
        assert!(city.is_none());
        assert!(state.is_none());
    }

    #[test]
    fn embedding_text_substitutes_not_available() {
        let record = MenuRecord {
            restaurant_id: 1,
            restaurant_name: "Restaurant A".to_string(),
            score: None,
            ratings: None,
            restaurant_category: "Burgers".to_string(),
            price_range: None,
            full_address: "1 Main St, Springfield, IL".to_string(),
            zip_code: None,
            lat: None,
            lng: None,
            menu_category: "Mains".to_string(),
            item_name: "Burger".to_string(),
            description: None,
            item_price: None,
            city: Some("Springfield".to_string()),
            state: Some("IL".to_string()),
        };

        let text = CorpusLoader::format_embedding_text(&record);
        assert_eq!(
            text,
            "Restaurant A - Burgers - 1 Main St, Springfield, IL. \
             Menu item: Burger - Mains. Description: Not available. \
             Price Range: Not available. Ratings: Not available."
        );
    }

    #[test]
    fn embedding_text_uses_present_values() {
        let record = MenuRecord {
            restaurant_id: 1,
            restaurant_name: "Restaurant B".to_string(),
            score: Some(4.2),
            ratings: Some(57.0),
            restaurant_category: "Salads".to_string(),
            price_range: Some("$$".to_string()),
            full_address: "2 Oak St, Portland, OR".to_string(),
            zip_code: Some("97201".to_string()),
            lat: None,
            lng: None,
            menu_category: "Greens".to_string(),
            item_name: "Salad".to_string(),
            description: Some("Crisp romaine".to_string()),
            item_price: Some("7.49 USD".to_string()),
            city: Some("Portland".to_string()),
            state: Some("OR".to_string()),
        };

        let text = CorpusLoader::format_embedding_text(&record);
        assert!(text.contains("Description: Crisp romaine."));
        assert!(text.contains("Price Range: $$."));
        assert!(text.contains("Ratings: 57."));
    }
}
