//! Genai-backed reasoner
//!
//! Handles all genai-supported backends (Ollama, DeepSeek, OpenAI,
//! Anthropic, ...) through one client. Model ids are `provider/model`
//! strings; a bare model name is treated as a local Ollama model. Auth flows
//! through the secret store, not genai's default env lookup, so key
//! resolution stays consistent with the CLI's fail-fast check.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures::StreamExt;

use genai::chat::{ChatMessage as GenaiMessage, ChatRequest, ChatStreamEvent};
use genai::resolver::{AuthData, AuthResolver};
use genai::{Client, ModelIden};

use crate::logging::Logger;
use crate::secrets::{EnvSecretStore, SecretStore};
use crate::types::{Message, MessageRole, Response};

use super::traits::{ReasonStream, Reasoner, ReasonerError, ReasonerResult, StreamEvent};

fn to_genai_messages(messages: &[Message]) -> Vec<GenaiMessage> {
    messages
        .iter()
        .map(|m| match m.role {
            MessageRole::System => GenaiMessage::system(m.content.clone()),
            MessageRole::User => GenaiMessage::user(m.content.clone()),
            MessageRole::Assistant => GenaiMessage::assistant(m.content.clone()),
        })
        .collect()
}

/// Reasoner over the genai client
pub struct GenaiReasoner {
    model: String,
    secrets: Arc<dyn SecretStore>,
    logger: Arc<dyn Logger>,
}

impl GenaiReasoner {
    /// Create a reasoner for a `provider/model` id, reading keys from the
    /// environment
    pub fn new(model: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self {
            model: model.into(),
            secrets: Arc::new(EnvSecretStore::new()),
            logger,
        }
    }

    /// Use an explicit secret store instead of the environment
    pub fn with_secret_store(mut self, secrets: Arc<dyn SecretStore>) -> Self {
        self.secrets = secrets;
        self
    }

    /// Provider part of the model id ("ollama" for bare model names)
    pub fn provider(&self) -> &str {
        self.model.split_once('/').map(|(p, _)| p).unwrap_or("ollama")
    }

    /// Model part of the model id
    pub fn model_name(&self) -> &str {
        self.model
            .split_once('/')
            .map(|(_, m)| m)
            .unwrap_or(&self.model)
    }

    /// Fail fast when the provider needs an API key the store cannot supply
    ///
    /// Call before the first backend request so the operator gets a clear
    /// message naming the variable to set, not a mid-turn HTTP failure.
    pub fn check_api_key(&self) -> ReasonerResult<()> {
        let provider = self.provider();
        if provider == "ollama" {
            return Ok(());
        }
        if self.secrets.get(provider).is_some() {
            return Ok(());
        }
        let env_var = EnvSecretStore::env_vars_for_provider(provider)
            .first()
            .cloned()
            .unwrap_or_else(|| format!("{}_API_KEY", provider.to_uppercase()));
        Err(ReasonerError::MissingApiKey {
            provider: provider.to_string(),
            env_var,
        })
    }

    fn backend_error(&self, message: impl ToString) -> ReasonerError {
        ReasonerError::Backend {
            backend: self.provider().to_string(),
            message: message.to_string(),
        }
    }

    fn build_client(&self) -> Client {
        let provider = self.provider().to_string();
        let secrets = Arc::clone(&self.secrets);

        let auth_resolver = AuthResolver::from_resolver_async_fn(
            move |_model_iden: ModelIden| -> Pin<
                Box<dyn Future<Output = genai::resolver::Result<Option<AuthData>>> + Send>,
            > {
                let provider = provider.clone();
                let secrets = Arc::clone(&secrets);
                Box::pin(async move {
                    // None is fine for keyless providers like Ollama
                    Ok(secrets.get(&provider).map(AuthData::from_single))
                })
            },
        );

        Client::builder().with_auth_resolver(auth_resolver).build()
    }
}

#[async_trait]
impl Reasoner for GenaiReasoner {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn reason(&self, messages: &[Message]) -> ReasonerResult<Response> {
        self.logger.debug(&format!(
            "[GenaiReasoner] reason: provider={}, model={}",
            self.provider(),
            self.model_name()
        ));

        // Single-shot reasoning drains the streaming path; the backends
        // behave identically either way and the End event already carries
        // the assembled response.
        let mut stream = self.stream_reason(messages).await?;
        let mut done = None;
        while let Some(event) = stream.next().await {
            if let StreamEvent::Done(response) = event? {
                done = Some(response);
            }
        }
        done.ok_or_else(|| ReasonerError::EmptyResponse {
            model: self.model.clone(),
        })
    }

    async fn stream_reason(&self, messages: &[Message]) -> ReasonerResult<ReasonStream> {
        self.logger.debug(&format!(
            "[GenaiReasoner] stream_reason: provider={}, model={}",
            self.provider(),
            self.model_name()
        ));

        let client = self.build_client();
        let chat_req = ChatRequest::new(to_genai_messages(messages));

        let start = Instant::now();
        let chat_stream = client
            .exec_chat_stream(self.model_name(), chat_req, None)
            .await
            .map_err(|e| self.backend_error(e))?;

        let model_id = self.model.clone();
        let backend = self.provider().to_string();

        // Accumulate chunk text so the End event can carry the assembled
        // response
        let stream = chat_stream
            .stream
            .scan(String::new(), move |acc, result| {
                let out = match result {
                    Ok(ChatStreamEvent::Chunk(chunk)) => {
                        acc.push_str(&chunk.content);
                        Some(Ok(StreamEvent::Token(chunk.content)))
                    }
                    Ok(ChatStreamEvent::End(_)) => {
                        let response = Response::new(std::mem::take(acc), &model_id)
                            .with_duration_ms(start.elapsed().as_millis() as u64);
                        Some(Ok(StreamEvent::Done(response)))
                    }
                    Ok(_) => None,
                    Err(e) => Some(Err(ReasonerError::Backend {
                        backend: backend.clone(),
                        message: e.to_string(),
                    })),
                };
                futures::future::ready(Some(out))
            })
            .filter_map(futures::future::ready);

        Ok(Box::pin(stream))
    }
}
