use crate::api::types::{Ack, ChatReply, ChatRequest, ContactRequest, HistoryEntry, PropertyPage};
use crate::listing::FilterCriteria;
use crate::models::Property;
use async_trait::async_trait;

/// Read access to the remote listings service.
///
/// Every failure (transport, status, schema) comes back as `None`;
/// implementations log the cause.
#[async_trait]
pub trait ListingsApi: Send + Sync {
    /// Fetch one page of listings matching `criteria`
    async fn fetch_properties(&self, criteria: &FilterCriteria) -> Option<PropertyPage>;

    /// Fetch a single listing; `None` when absent or on failure
    async fn fetch_property(&self, id: &str) -> Option<Property>;

    /// Submit an enquiry from the contact form
    async fn submit_contact(&self, request: &ContactRequest) -> Option<Ack>;
}

/// The remote conversational backend
#[async_trait]
pub trait ChatbotApi: Send + Sync {
    async fn send_message(&self, request: &ChatRequest) -> Option<ChatReply>;

    async fn history(&self, session_id: &str) -> Option<Vec<HistoryEntry>>;

    async fn clear_history(&self, session_id: &str) -> Option<Ack>;
}
