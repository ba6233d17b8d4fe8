//! Portable record of one executed turn

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::decision::RoutingDecision;
use super::response::Response;
use super::result::ActionResult;

/// Artifact schema version, bumped on incompatible field changes
pub const ARTIFACT_VERSION: &str = "1";

/// Everything that happened in one conversational turn, as a JSON-portable
/// value: the prompt, the routing decision (if routing ran), the gated tool
/// result or injected skill (if any), and the reasoner's response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionArtifact {
    /// Schema version of this artifact
    pub version: String,
    /// The user prompt that started the turn
    pub prompt: String,
    /// Routing decision, when routing ran this turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<RoutingDecision>,
    /// Result of the gated tool run, when a tool was selected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_result: Option<ActionResult>,
    /// Name of the skill whose instructions were injected, when one was
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    /// The reasoner's reply
    pub response: Response,
    /// Unique artifact id
    pub id: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl ExecutionArtifact {
    /// Create an artifact for a turn that only reasoned
    pub fn new(prompt: impl Into<String>, response: Response) -> Self {
        Self {
            version: ARTIFACT_VERSION.to_string(),
            prompt: prompt.into(),
            decision: None,
            tool_result: None,
            skill: None,
            response,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Attach the routing decision
    pub fn with_decision(mut self, decision: RoutingDecision) -> Self {
        self.decision = Some(decision);
        self
    }

    /// Attach a gated tool result
    pub fn with_tool_result(mut self, result: ActionResult) -> Self {
        self.tool_result = Some(result);
        self
    }

    /// Record the injected skill name
    pub fn with_skill(mut self, name: impl Into<String>) -> Self {
        self.skill = Some(name.into());
        self
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
