//! Reasoner trait definition

use std::pin::Pin;

use async_trait::async_trait;
use futures::{stream, Stream};
use thiserror::Error;

use crate::types::{Message, Response};

/// Errors from reasoning backends
#[derive(Error, Debug)]
pub enum ReasonerError {
    /// No API key available for a backend that needs one
    #[error("missing API key for {provider}; set {env_var}")]
    MissingApiKey { provider: String, env_var: String },

    /// The backend call failed
    #[error("{backend} backend error: {message}")]
    Backend { backend: String, message: String },

    /// The backend produced no content
    #[error("empty response from {model}")]
    EmptyResponse { model: String },
}

pub type ReasonerResult<T> = Result<T, ReasonerError>;

/// One element of a streamed reasoning response
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// Incremental text
    Token(String),
    /// End of stream, carrying the assembled response
    Done(Response),
}

/// Type alias for the streaming response
pub type ReasonStream = Pin<Box<dyn Stream<Item = ReasonerResult<StreamEvent>> + Send>>;

/// A reasoning backend: message list in, response out
#[async_trait]
pub trait Reasoner: Send + Sync {
    /// Model identifier this backend reasons with (e.g. "ollama/llama3.2")
    fn model_id(&self) -> &str;

    /// Produce a single response from the given message list
    async fn reason(&self, messages: &[Message]) -> ReasonerResult<Response>;

    /// Streaming mode. Default: emits the full content in one token via
    /// `reason()`, then the response.
    async fn stream_reason(&self, messages: &[Message]) -> ReasonerResult<ReasonStream> {
        let response = self.reason(messages).await?;
        let events = vec![
            Ok(StreamEvent::Token(response.content.clone())),
            Ok(StreamEvent::Done(response)),
        ];
        Ok(Box::pin(stream::iter(events)))
    }
}
