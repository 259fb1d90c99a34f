use std::collections::BTreeSet;
use url::form_urlencoded;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 9;

/// Select value meaning "no category/location filter"
pub const ALL: &str = "all";
/// Select value meaning "no bedroom/bathroom minimum"
pub const ANY: &str = "any";

/// Search constraints for one listing query.
///
/// Unset filters are `None` (or an empty set). On the wire an unset filter
/// is an absent parameter, never the sentinel literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub location: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub amenities: BTreeSet<String>,
    pub page: u32,
    pub limit: u32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            category: None,
            location: None,
            min_price: None,
            max_price: None,
            bedrooms: None,
            bathrooms: None,
            amenities: BTreeSet::new(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// `None` for blank input or a select sentinel
fn choice(raw: &str, sentinel: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(sentinel) {
        None
    } else {
        Some(value.to_string())
    }
}

/// `None` for blank, sentinel, negative or non-numeric input
fn number<T: std::str::FromStr>(raw: &str) -> Option<T> {
    let value = raw.trim();
    if value.eq_ignore_ascii_case(ANY) {
        return None;
    }
    value.parse().ok()
}

fn positive(raw: &str, default: u32) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(0) | Err(_) => default,
        Ok(n) => n,
    }
}

fn amenity_set(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

impl FilterCriteria {
    /// Parse a query string (with or without the leading `?`).
    ///
    /// Unknown keys are ignored, a repeated key keeps its last value, and
    /// invalid values read as unset.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut criteria = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "category" => criteria.category = choice(&value, ALL),
                "location" => criteria.location = choice(&value, ALL),
                "minPrice" => criteria.min_price = number(&value),
                "maxPrice" => criteria.max_price = number(&value),
                "bedrooms" => criteria.bedrooms = number(&value),
                "bathrooms" => criteria.bathrooms = number(&value),
                "amenities" => criteria.amenities = amenity_set(&value),
                "page" => criteria.page = positive(&value, DEFAULT_PAGE),
                "limit" => criteria.limit = positive(&value, DEFAULT_LIMIT),
                _ => {}
            }
        }
        criteria
    }

    /// Fold sentinels and blanks into their unset form.
    pub fn normalize(&self) -> Self {
        Self {
            category: self.category.as_deref().and_then(|c| choice(c, ALL)),
            location: self.location.as_deref().and_then(|l| choice(l, ALL)),
            min_price: self.min_price,
            max_price: self.max_price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            amenities: self
                .amenities
                .iter()
                .flat_map(|a| amenity_set(a))
                .collect(),
            page: if self.page == 0 { DEFAULT_PAGE } else { self.page },
            limit: if self.limit == 0 { DEFAULT_LIMIT } else { self.limit },
        }
    }

    /// Active filters only, in a fixed order
    fn filter_pairs(&self) -> Vec<(&'static str, String)> {
        let c = self.normalize();
        let mut pairs = Vec::new();
        if let Some(category) = c.category {
            pairs.push(("category", category));
        }
        if let Some(location) = c.location {
            pairs.push(("location", location));
        }
        if let Some(min) = c.min_price {
            pairs.push(("minPrice", min.to_string()));
        }
        if let Some(max) = c.max_price {
            pairs.push(("maxPrice", max.to_string()));
        }
        if let Some(bedrooms) = c.bedrooms {
            pairs.push(("bedrooms", bedrooms.to_string()));
        }
        if let Some(bathrooms) = c.bathrooms {
            pairs.push(("bathrooms", bathrooms.to_string()));
        }
        if !c.amenities.is_empty() {
            let joined: Vec<&str> = c.amenities.iter().map(String::as_str).collect();
            pairs.push(("amenities", joined.join(",")));
        }
        pairs
    }

    /// Canonical navigation pairs: active filters, then `page`/`limit` only
    /// when they differ from the defaults.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.filter_pairs();
        let c = self.normalize();
        if c.page != DEFAULT_PAGE {
            pairs.push(("page", c.page.to_string()));
        }
        if c.limit != DEFAULT_LIMIT {
            pairs.push(("limit", c.limit.to_string()));
        }
        pairs
    }

    /// Parameters sent to the listings API: `page` and `limit` are always present.
    pub fn api_query(&self) -> Vec<(&'static str, String)> {
        let c = self.normalize();
        let mut pairs = vec![("page", c.page.to_string()), ("limit", c.limit.to_string())];
        pairs.extend(self.filter_pairs());
        pairs
    }

    /// Canonical query string, without the leading `?`
    pub fn to_query_string(&self) -> String {
        encode(&self.query_pairs())
    }

    /// `/properties` link for these criteria
    pub fn href(&self) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            "/properties".to_string()
        } else {
            format!("/properties?{}", query)
        }
    }

    /// Link to `page` that keeps every other active parameter.
    pub fn page_href(&self, page: u32) -> String {
        let c = self.normalize();
        let mut pairs = vec![("page", page.max(1).to_string())];
        pairs.extend(self.filter_pairs());
        if c.limit != DEFAULT_LIMIT {
            pairs.push(("limit", c.limit.to_string()));
        }
        format!("/properties?{}", encode(&pairs))
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    pub fn is_filtered(&self) -> bool {
        !self.filter_pairs().is_empty()
    }
}

fn encode(pairs: &[(&str, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apartment_over_100k() -> FilterCriteria {
        FilterCriteria {
            category: Some("Apartment".to_string()),
            min_price: Some(100_000),
            ..FilterCriteria::default()
        }
    }

    #[test]
    fn omits_unset_filters() {
        let query = apartment_over_100k().to_query_string();
        assert!(query.contains("category=Apartment&minPrice=100000"));
        for absent in ["location", "bedrooms", "bathrooms", "amenities", "page", "limit"] {
            assert!(!query.contains(absent), "{} should be omitted: {}", absent, query);
        }
    }

    #[test]
    fn sentinels_never_reach_the_wire() {
        let criteria = FilterCriteria {
            category: Some("all".to_string()),
            location: Some("ALL".to_string()),
            amenities: ["".to_string()].into_iter().collect(),
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.to_query_string(), "");
        assert_eq!(criteria.href(), "/properties");
        assert!(!criteria.is_filtered());
    }

    #[test]
    fn parse_restores_sentinels() {
        let criteria = FilterCriteria::parse("?category=all&bedrooms=any&location=");
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn round_trips_through_the_query_string() {
        let criteria = FilterCriteria {
            category: Some("Villa".to_string()),
            location: Some("Mountain View".to_string()),
            min_price: Some(5),
            max_price: Some(900_000),
            bedrooms: Some(3),
            bathrooms: Some(2),
            amenities: ["Swimming Pool", "Gym"].iter().map(|s| s.to_string()).collect(),
            page: 4,
            limit: 12,
        };
        let query = criteria.to_query_string();
        assert_eq!(FilterCriteria::parse(&query), criteria.normalize());
        assert!(query.contains("location=Mountain+View"));
        assert!(query.contains("amenities=Gym%2CSwimming+Pool"));
    }

    #[test]
    fn round_trip_normalizes_sentinels() {
        let criteria = FilterCriteria {
            category: Some(" all ".to_string()),
            bedrooms: Some(1),
            page: 0,
            ..FilterCriteria::default()
        };
        let back = FilterCriteria::parse(&criteria.to_query_string());
        assert_eq!(back, criteria.normalize());
        assert_eq!(back.category, None);
        assert_eq!(back.page, 1);
    }

    #[test]
    fn invalid_numbers_read_as_unset() {
        let criteria = FilterCriteria::parse("minPrice=cheap&maxPrice=-10&bedrooms=2.5&bathrooms=x&page=abc&limit=0");
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn last_duplicate_wins_and_unknown_keys_are_ignored() {
        let criteria = FilterCriteria::parse("category=House&utm_source=mail&category=Land");
        assert_eq!(criteria.category.as_deref(), Some("Land"));
    }

    #[test]
    fn api_query_always_carries_paging() {
        let pairs = apartment_over_100k().api_query();
        assert_eq!(pairs[0], ("page", "1".to_string()));
        assert_eq!(pairs[1], ("limit", "9".to_string()));
        assert!(pairs.contains(&("category", "Apartment".to_string())));
    }

    #[test]
    fn page_links_change_only_the_page() {
        let criteria = FilterCriteria {
            page: 2,
            limit: 20,
            ..apartment_over_100k()
        };
        let href = criteria.page_href(5);
        assert_eq!(href, "/properties?page=5&category=Apartment&minPrice=100000&limit=20");
        let back = FilterCriteria::parse(href.trim_start_matches("/properties"));
        assert_eq!(back, criteria.with_page(5));
    }
}
