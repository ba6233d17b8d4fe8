//! Action (tool) execution result type

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

/// Whether an action run succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Ok,
    Error,
}

/// Outcome of running one tool
///
/// Created fresh per invocation and never mutated afterwards. Action-internal
/// failures (missing argument, I/O error) are results with `status = error`,
/// not raised failures; the gate passes them through unchanged after timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    /// Name of the tool that ran
    pub tool_name: String,
    /// Tool output (empty on error)
    pub output: String,
    /// Whether the run succeeded
    pub status: ActionStatus,
    /// Unique result id
    pub id: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Diagnostic metadata (`execution_time_ms`, `checked_permissions` after
    /// a gate run; `error_message` when status is error)
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl ActionResult {
    /// Create a successful result
    pub fn ok(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            output: output.into(),
            status: ActionStatus::Ok,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            metadata: BTreeMap::new(),
        }
    }

    /// Create an error result carrying `error_message` metadata
    pub fn error(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        let message: String = message.into();
        let mut metadata = BTreeMap::new();
        metadata.insert("error_message".to_string(), json!(message));
        Self {
            tool_name: tool_name.into(),
            output: String::new(),
            status: ActionStatus::Error,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            metadata,
        }
    }

    /// Attach one metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Whether the run succeeded
    pub fn is_ok(&self) -> bool {
        self.status == ActionStatus::Ok
    }

    /// The `error_message` metadata entry, if present
    pub fn error_message(&self) -> Option<&str> {
        self.metadata.get("error_message").and_then(Value::as_str)
    }
}
