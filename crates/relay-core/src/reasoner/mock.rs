//! Mock reasoner for testing
//!
//! Deterministic, configurable responses without network dependencies.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use futures::{stream, StreamExt};

use crate::types::{Message, MessageRole, Response};

use super::traits::{ReasonStream, Reasoner, ReasonerError, ReasonerResult, StreamEvent};

/// Mock response mode
#[derive(Debug, Clone, Default)]
pub enum MockMode {
    /// Echo back the last user message
    #[default]
    Echo,
    /// Return a fixed response
    Fixed(String),
    /// Return the response as these exact tokens
    Chunks(Vec<String>),
    /// Fail with a backend error
    Error(String),
}

/// Mock reasoning backend
///
/// Records the last message list it was given so tests can assert on the
/// assembled context.
pub struct MockReasoner {
    mode: MockMode,
    model_id: String,
    chunk_size: usize,
    chunk_delay_ms: u64,
    recorded: RwLock<Vec<Message>>,
}

impl Default for MockReasoner {
    fn default() -> Self {
        Self::echo()
    }
}

impl MockReasoner {
    /// Create a mock with an explicit mode
    pub fn with_mode(mode: MockMode) -> Self {
        Self {
            mode,
            model_id: "mock".to_string(),
            chunk_size: 10,
            chunk_delay_ms: 0,
            recorded: RwLock::new(Vec::new()),
        }
    }

    /// Echo provider (echoes back the last user message)
    pub fn echo() -> Self {
        Self::with_mode(MockMode::Echo)
    }

    /// Fixed response provider
    pub fn fixed(response: impl Into<String>) -> Self {
        Self::with_mode(MockMode::Fixed(response.into()))
    }

    /// Exact-chunks provider
    pub fn chunked(chunks: Vec<String>) -> Self {
        Self::with_mode(MockMode::Chunks(chunks))
    }

    /// Error-producing provider
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_mode(MockMode::Error(message.into()))
    }

    /// Set the reported model id
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Set the token size used when splitting echo/fixed responses
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Delay between streamed tokens in milliseconds (0 = no delay)
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.chunk_delay_ms = delay_ms;
        self
    }

    /// The message list from the most recent call
    pub fn last_messages(&self) -> Vec<Message> {
        self.recorded.read().unwrap().clone()
    }

    fn last_user_content(&self, messages: &[Message]) -> String {
        messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User && !m.content.is_empty())
            .map(|m| m.content.clone())
            .unwrap_or_else(|| "Hello from MockReasoner!".to_string())
    }

    fn split_into_chunks(&self, text: &str) -> Vec<String> {
        if self.chunk_size == 0 || text.is_empty() {
            return vec![text.to_string()];
        }
        text.chars()
            .collect::<Vec<_>>()
            .chunks(self.chunk_size)
            .map(|c| c.iter().collect())
            .collect()
    }

    fn content_for(&self, messages: &[Message]) -> ReasonerResult<String> {
        match &self.mode {
            MockMode::Echo => Ok(self.last_user_content(messages)),
            MockMode::Fixed(response) => Ok(response.clone()),
            MockMode::Chunks(chunks) => Ok(chunks.concat()),
            MockMode::Error(message) => Err(ReasonerError::Backend {
                backend: "mock".to_string(),
                message: message.clone(),
            }),
        }
    }
}

#[async_trait]
impl Reasoner for MockReasoner {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn reason(&self, messages: &[Message]) -> ReasonerResult<Response> {
        *self.recorded.write().unwrap() = messages.to_vec();
        let content = self.content_for(messages)?;
        Ok(Response::new(content, &self.model_id))
    }

    async fn stream_reason(&self, messages: &[Message]) -> ReasonerResult<ReasonStream> {
        *self.recorded.write().unwrap() = messages.to_vec();
        let content = self.content_for(messages)?;

        let tokens = match &self.mode {
            MockMode::Chunks(chunks) => chunks.clone(),
            _ => self.split_into_chunks(&content),
        };

        let response = Response::new(content, &self.model_id);
        let events: Vec<ReasonerResult<StreamEvent>> = tokens
            .into_iter()
            .map(|t| Ok(StreamEvent::Token(t)))
            .chain(std::iter::once(Ok(StreamEvent::Done(response))))
            .collect();

        let delay_ms = self.chunk_delay_ms;
        let stream = stream::iter(events.into_iter().enumerate()).then(move |(i, event)| {
            async move {
                if i > 0 && delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                event
            }
        });
        Ok(Box::pin(stream))
    }
}
