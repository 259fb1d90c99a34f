pub mod client;
pub mod traits;
pub mod types;

pub use client::HttpClient;
pub use traits::{ChatbotApi, ListingsApi};
