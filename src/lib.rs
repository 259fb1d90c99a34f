//! Property listing browser: a typed client for the remote listings and
//! chatbot service, plus the page state built on top of it (filters,
//! pagination, detail view, carousel, chat session, contact form).

pub mod api;
pub mod carousel;
pub mod chatbot;
pub mod config;
pub mod contact;
pub mod error;
pub mod listing;
pub mod models;
pub mod share;
pub mod store;
pub mod theme;

#[cfg(test)]
mod test_utils;

pub use api::{ChatbotApi, HttpClient, ListingsApi};
pub use config::Config;
pub use error::ApiError;
pub use listing::FilterCriteria;
pub use models::Property;
