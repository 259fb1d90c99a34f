use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder shown when a listing has no images
pub const DEFAULT_PROPERTY_IMAGE: &str = "https://images.unsplash.com/photo-1560518883-ce09059eeffa?ixlib=rb-4.0.3&auto=format&fit=crop&w=1973&q=80";

/// A decoded listing that breaks an invariant serde cannot express
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidProperty {
    #[error("property has an empty _id")]
    EmptyId,

    #[error("property {id} has invalid price {price}")]
    BadPrice { id: String, price: f64 },
}

/// Core property data model, as served by the listings service.
///
/// Read-only on this side: properties are fetched and rendered, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: String,
    pub category: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub location: String,
    /// Free-form, e.g. "1200 sqft"
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Check the invariants serde cannot express.
    pub fn check(&self) -> Result<(), InvalidProperty> {
        if self.id.trim().is_empty() {
            return Err(InvalidProperty::EmptyId);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(InvalidProperty::BadPrice {
                id: self.id.clone(),
                price: self.price,
            });
        }
        Ok(())
    }

    /// Images to display, falling back to the placeholder
    pub fn display_images(&self) -> Vec<String> {
        if self.images.is_empty() {
            vec![DEFAULT_PROPERTY_IMAGE.to_string()]
        } else {
            self.images.clone()
        }
    }

    /// Cover image used on listing cards
    pub fn cover_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_PROPERTY_IMAGE)
    }

    pub fn formatted_price(&self) -> String {
        format_price(self.price)
    }

    /// Listing date, e.g. "January 5, 2024"
    pub fn listed_on(&self) -> String {
        self.created_at.format("%B %-d, %Y").to_string()
    }

    /// Relative detail page path
    pub fn href(&self) -> String {
        format!("/properties/{}", self.id)
    }
}

/// Format a price as whole dollars with thousands separators.
pub fn format_price(price: f64) -> String {
    let whole = price.max(0.0).round() as u64;
    let digits = whole.to_string();
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

/// Who said a transcript line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

/// One line of a chatbot conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
        }
    }
}
