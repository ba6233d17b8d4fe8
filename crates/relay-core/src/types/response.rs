//! Reasoner response type

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Output of one reasoning call
///
/// `metadata` is diagnostic and unstable: it may carry token counts or
/// backend-specific fields, and its exact keys can change between backends.
/// Callers must not depend on specific metadata keys for core behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// The generated text
    pub content: String,
    /// Model that produced the content (e.g. "ollama/llama3.2")
    pub model_id: String,
    /// Unique response id
    pub id: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Wall-clock time of the backend call, when measured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Diagnostic backend metadata (token counts, latencies, ...)
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl Response {
    /// Create a new response with a generated id and current timestamp
    pub fn new(content: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model_id: model_id.into(),
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            duration_ms: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Set the measured backend duration
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Attach one metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}
