//! Support chatbot session: a locally persisted session id plus the
//! transcript of the current conversation.

use crate::api::types::ChatRequest;
use crate::api::ChatbotApi;
use crate::models::ChatMessage;
use crate::store::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Store key holding the session id
pub const SESSION_KEY: &str = "chatbotSessionId";
/// Sent, without a transcript entry, when the widget opens on an empty chat
pub const GREETING: &str = "Hi";
pub const FALLBACK_REPLY: &str = "Sorry, I'm having trouble connecting. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    Active(String),
}

/// Request/response exchange with the remote chatbot.
///
/// User lines are appended before the request goes out; every exchange
/// ends with exactly one bot line, the fallback text when the call fails.
pub struct ChatSession {
    api: Arc<dyn ChatbotApi>,
    store: Arc<dyn KeyValueStore>,
    state: SessionState,
    transcript: Vec<ChatMessage>,
}

impl ChatSession {
    /// Restore a stored session, eagerly loading its history.
    pub async fn mount(api: Arc<dyn ChatbotApi>, store: Arc<dyn KeyValueStore>) -> Self {
        let state = match store.get(SESSION_KEY) {
            Some(id) if !id.is_empty() => SessionState::Active(id),
            _ => SessionState::NoSession,
        };
        let mut session = Self {
            api,
            store,
            state,
            transcript: Vec::new(),
        };
        if session.session_id().is_some() {
            session.load_history().await;
        }
        session
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session_id(&self) -> Option<&str> {
        match &self.state {
            SessionState::Active(id) => Some(id.as_str()),
            SessionState::NoSession => None,
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Rebuild the transcript from the server. A failed or empty history
    /// leaves the local transcript as it is.
    pub async fn load_history(&mut self) {
        let Some(id) = self.session_id().map(str::to_string) else {
            return;
        };
        match self.api.history(&id).await {
            Some(history) if !history.is_empty() => {
                debug!("Restored {} exchanges for session {}", history.len(), id);
                self.transcript = history
                    .into_iter()
                    .flat_map(|entry| [ChatMessage::user(entry.user), ChatMessage::bot(entry.bot)])
                    .collect();
            }
            Some(_) => {}
            None => warn!("Could not load chat history for session {}", id),
        }
    }

    /// Widget opened: greet the bot when nothing has been said yet.
    pub async fn open(&mut self) {
        if self.transcript.is_empty() {
            self.exchange(GREETING).await;
        }
    }

    /// Send a user line. Blank input is ignored.
    pub async fn send_message(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.transcript.push(ChatMessage::user(text));
        self.exchange(text).await;
    }

    async fn exchange(&mut self, text: &str) {
        let request = ChatRequest {
            message: text.to_string(),
            session_id: self.session_id().map(str::to_string),
        };

        match self.api.send_message(&request).await {
            Some(reply) => {
                if self.state == SessionState::NoSession {
                    if let Err(err) = self.store.set(SESSION_KEY, &reply.session_id) {
                        warn!("Could not persist chat session id: {:#}", err);
                    }
                    info!("Started chat session {}", reply.session_id);
                    self.state = SessionState::Active(reply.session_id);
                }
                self.transcript.push(ChatMessage::bot(reply.message));
            }
            None => self.transcript.push(ChatMessage::bot(FALLBACK_REPLY)),
        }
    }

    /// Delete the server history and empty the transcript, keeping the
    /// session id. A `success: false` reply and an unreachable service are
    /// treated the same: the call returns false and the transcript stays.
    pub async fn clear_chat(&mut self) -> bool {
        let Some(id) = self.session_id().map(str::to_string) else {
            self.transcript.clear();
            return true;
        };
        match self.api.clear_history(&id).await {
            Some(_) => {
                self.transcript.clear();
                true
            }
            None => {
                warn!("Could not clear chat history for session {}", id);
                false
            }
        }
    }

    /// Forget the session entirely; the next message starts a new one.
    pub async fn reset_chat(&mut self) {
        if let Some(id) = self.session_id().map(str::to_string) {
            if self.api.clear_history(&id).await.is_none() {
                warn!("Could not clear chat history for session {}", id);
            }
        }
        if let Err(err) = self.store.remove(SESSION_KEY) {
            warn!("Could not remove stored chat session id: {:#}", err);
        }
        self.state = SessionState::NoSession;
        self.transcript.clear();
    }
}
