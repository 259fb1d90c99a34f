use crate::listing::filters::{FilterCriteria, ALL, ANY, DEFAULT_PAGE};

pub const CATEGORY_OPTIONS: [&str; 5] = ["Apartment", "House", "Villa", "Commercial", "Land"];

pub const LOCATION_OPTIONS: [&str; 5] = ["Downtown", "Suburban", "Beachfront", "Mountain View", "Countryside"];

pub const AMENITY_OPTIONS: [&str; 9] = [
    "Swimming Pool",
    "Gym",
    "Parking",
    "Security",
    "Garden",
    "Elevator",
    "Balcony",
    "Air Conditioning",
    "Furnished",
];

/// Bedroom/bathroom minimums offered besides "any"
pub const ROOM_OPTIONS: [u32; 5] = [1, 2, 3, 4, 5];

pub const PRICE_SLIDER_MIN: u64 = 0;
pub const PRICE_SLIDER_MAX: u64 = 1_000_000;
pub const PRICE_SLIDER_STEP: u64 = 10_000;

/// Raw state of the filter sidebar, before it is turned into criteria.
///
/// Text inputs keep whatever the user typed; bad input is dropped only
/// when the form is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterForm {
    pub category: String,
    pub location: String,
    pub min_price: String,
    pub max_price: String,
    pub bedrooms: String,
    pub bathrooms: String,
    /// Toggle order is kept for display
    pub amenities: Vec<String>,
    pub price_range: (u64, u64),
    limit: u32,
}

impl Default for FilterForm {
    fn default() -> Self {
        Self {
            category: ALL.to_string(),
            location: ALL.to_string(),
            min_price: String::new(),
            max_price: String::new(),
            bedrooms: ANY.to_string(),
            bathrooms: ANY.to_string(),
            amenities: Vec::new(),
            price_range: (PRICE_SLIDER_MIN, PRICE_SLIDER_MAX),
            limit: FilterCriteria::default().limit,
        }
    }
}

impl FilterForm {
    /// Seed the sidebar from the criteria the page was rendered with.
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let c = criteria.normalize();
        let text = |n: Option<u64>| n.map(|v| v.to_string()).unwrap_or_default();
        Self {
            category: c.category.clone().unwrap_or_else(|| ALL.to_string()),
            location: c.location.clone().unwrap_or_else(|| ALL.to_string()),
            min_price: text(c.min_price),
            max_price: text(c.max_price),
            bedrooms: c.bedrooms.map(|b| b.to_string()).unwrap_or_else(|| ANY.to_string()),
            bathrooms: c.bathrooms.map(|b| b.to_string()).unwrap_or_else(|| ANY.to_string()),
            amenities: c.amenities.iter().cloned().collect(),
            price_range: (
                c.min_price.unwrap_or(PRICE_SLIDER_MIN),
                c.max_price.unwrap_or(PRICE_SLIDER_MAX),
            ),
            limit: c.limit,
        }
    }

    pub fn toggle_amenity(&mut self, amenity: &str) {
        if let Some(pos) = self.amenities.iter().position(|a| a == amenity) {
            self.amenities.remove(pos);
        } else {
            self.amenities.push(amenity.to_string());
        }
    }

    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities.iter().any(|a| a == amenity)
    }

    /// Move the slider: snaps to the step, clamps to the bounds and fills both inputs.
    pub fn set_price_range(&mut self, low: u64, high: u64) {
        let snap = |v: u64| {
            let v = v.clamp(PRICE_SLIDER_MIN, PRICE_SLIDER_MAX);
            (v + PRICE_SLIDER_STEP / 2) / PRICE_SLIDER_STEP * PRICE_SLIDER_STEP
        };
        let (low, high) = (snap(low.min(high)), snap(low.max(high)));
        self.price_range = (low, high.min(PRICE_SLIDER_MAX));
        self.min_price = self.price_range.0.to_string();
        self.max_price = self.price_range.1.to_string();
    }

    /// Criteria for the "Apply Filters" action; starts again from page 1.
    pub fn apply(&self) -> FilterCriteria {
        let raw = format!(
            "category={}&location={}&minPrice={}&maxPrice={}&bedrooms={}&bathrooms={}",
            urlencoding::encode(&self.category),
            urlencoding::encode(&self.location),
            urlencoding::encode(&self.min_price),
            urlencoding::encode(&self.max_price),
            urlencoding::encode(&self.bedrooms),
            urlencoding::encode(&self.bathrooms),
        );
        FilterCriteria {
            amenities: self
                .amenities
                .iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
            page: DEFAULT_PAGE,
            limit: self.limit,
            ..FilterCriteria::parse(&raw)
        }
    }

    /// Where "Apply Filters" navigates
    pub fn href(&self) -> String {
        self.apply().href()
    }

    /// Clear everything; the returned link is the unfiltered listing.
    pub fn reset(&mut self) -> String {
        *self = Self::default();
        "/properties".to_string()
    }
}
