use crate::api::traits::{ChatbotApi, ListingsApi};
use crate::api::types::{
    Ack, ChatReply, ChatRequest, ChatResponse, ContactRequest, HistoryEntry, HistoryResponse,
    PropertiesResponse, PropertyPage, PropertyResponse,
};
use crate::config::Config;
use crate::error::ApiError;
use crate::listing::FilterCriteria;
use crate::models::Property;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

/// reqwest-backed client for the listings, contact and chatbot endpoints
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("property-browser/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn try_fetch_properties(&self, criteria: &FilterCriteria) -> Result<PropertyPage, ApiError> {
        let url = self.endpoint(&["api", "properties"])?;
        let query = criteria.api_query();
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(url).query(&query).send().await?;
        let envelope: PropertiesResponse = Self::read_json(response).await?;
        if !envelope.success {
            return Err(ApiError::Rejected);
        }
        for property in &envelope.properties {
            property.check()?;
        }
        Ok(envelope.into())
    }

    async fn try_fetch_property(&self, id: &str) -> Result<Option<Property>, ApiError> {
        let url = self.endpoint(&["api", "properties", id])?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let envelope: PropertyResponse = Self::read_json(response).await?;
        if !envelope.success {
            return Err(ApiError::Rejected);
        }
        if let Some(property) = &envelope.property {
            property.check()?;
        }
        Ok(envelope.property)
    }

    async fn try_submit_contact(&self, request: &ContactRequest) -> Result<Ack, ApiError> {
        let url = self.endpoint(&["api", "contact"])?;
        debug!("POST {}", url);

        let response = self.client.post(url).json(request).send().await?;
        let ack: Ack = Self::read_json(response).await?;
        if !ack.success {
            return Err(ApiError::Rejected);
        }
        Ok(ack)
    }

    async fn try_send_message(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        let url = self.endpoint(&["api", "chatbot", "message"])?;
        debug!("POST {} (session: {:?})", url, request.session_id);

        let response = self.client.post(url).json(request).send().await?;
        let envelope: ChatResponse = Self::read_json(response).await?;
        if !envelope.success {
            return Err(ApiError::Rejected);
        }
        let session_id = envelope
            .session_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::Malformed("reply has no sessionId".to_string()))?;
        let message = envelope
            .message
            .ok_or_else(|| ApiError::Malformed("reply has no message".to_string()))?;
        Ok(ChatReply { session_id, message })
    }

    async fn try_history(&self, session_id: &str) -> Result<Vec<HistoryEntry>, ApiError> {
        let url = self.endpoint(&["api", "chatbot", "history", session_id])?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let envelope: HistoryResponse = Self::read_json(response).await?;
        if !envelope.success {
            return Err(ApiError::Rejected);
        }
        Ok(envelope.history)
    }

    async fn try_clear_history(&self, session_id: &str) -> Result<Ack, ApiError> {
        let url = self.endpoint(&["api", "chatbot", "history", session_id])?;
        debug!("DELETE {}", url);

        let response = self.client.delete(url).send().await?;
        let ack: Ack = Self::read_json(response).await?;
        if !ack.success {
            return Err(ApiError::Rejected);
        }
        Ok(ack)
    }
}

/// Collapse a failure into the uniform "no data" signal, keeping the cause in the log.
fn settle<T>(what: &str, result: Result<T, ApiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("Error {}: {}", what, err);
            None
        }
    }
}

#[async_trait]
impl ListingsApi for HttpClient {
    async fn fetch_properties(&self, criteria: &FilterCriteria) -> Option<PropertyPage> {
        settle("fetching properties", self.try_fetch_properties(criteria).await)
    }

    async fn fetch_property(&self, id: &str) -> Option<Property> {
        let property = settle("fetching property", self.try_fetch_property(id).await)?;
        if property.is_none() {
            info!("Property {} is absent from the service", id);
        }
        property
    }

    async fn submit_contact(&self, request: &ContactRequest) -> Option<Ack> {
        settle("submitting contact form", self.try_submit_contact(request).await)
    }
}

#[async_trait]
impl ChatbotApi for HttpClient {
    async fn send_message(&self, request: &ChatRequest) -> Option<ChatReply> {
        settle("sending chatbot message", self.try_send_message(request).await)
    }

    async fn history(&self, session_id: &str) -> Option<Vec<HistoryEntry>> {
        settle("loading chat history", self.try_history(session_id).await)
    }

    async fn clear_history(&self, session_id: &str) -> Option<Ack> {
        settle("clearing chat history", self.try_clear_history(session_id).await)
    }
}
