//! Shared fixtures for unit tests

use crate::models::Property;
use serde_json::json;

/// A listing in the exact shape the service returns it
pub fn sample_json() -> serde_json::Value {
    json!({
        "_id": "p1",
        "category": "Apartment",
        "title": "Sea view flat",
        "description": "Two bedrooms by the beach",
        "price": 250000,
        "location": "Beachfront",
        "area": "1200 sqft",
        "bedrooms": 2,
        "bathrooms": 1,
        "amenities": ["Gym"],
        "images": [],
        "videos": [],
        "createdAt": "2024-01-05T10:00:00.000Z",
        "updatedAt": "2024-01-06T10:00:00.000Z"
    })
}

pub fn sample_property(id: &str) -> Property {
    let mut value = sample_json();
    value["_id"] = json!(id);
    serde_json::from_value(value).expect("fixture decodes")
}
