use crate::models::Property;
use serde::{Deserialize, Serialize};

/// `GET /api/properties` envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertiesResponse {
    pub success: bool,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// `GET /api/properties/{id}` envelope
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyResponse {
    pub success: bool,
    #[serde(default)]
    pub property: Option<Property>,
}

/// One page of listings as handed to controllers
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyPage {
    pub properties: Vec<Property>,
    pub count: u32,
    pub total: u64,
    pub total_pages: u32,
    pub current_page: u32,
}

impl From<PropertiesResponse> for PropertyPage {
    fn from(resp: PropertiesResponse) -> Self {
        Self {
            properties: resp.properties,
            count: resp.count,
            total: resp.total,
            total_pages: resp.total_pages,
            current_page: resp.current_page,
        }
    }
}

/// `POST /api/contact` body
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
    pub name: String,
    pub phone: String,
    pub message: String,
}

/// Generic `{success, message?}` envelope
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Ack {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /api/chatbot/message` body
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// `POST /api/chatbot/message` envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub success: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A bot reply that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub session_id: String,
    pub message: String,
}

/// `GET /api/chatbot/history/{sessionId}` envelope
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// One user/bot exchange from the stored history. Other fields the
/// service sends (timestamps) are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub user: String,
    pub bot: String,
}
