//! Routing target and decision value objects

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of entity a routing outcome refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// A runnable tool
    Tool,
    /// A skill whose instructions get injected into the context
    Skill,
    /// No target selected; the reasoner handles the turn unaided
    Fallback,
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetType::Tool => write!(f, "tool"),
            TargetType::Skill => write!(f, "skill"),
            TargetType::Fallback => write!(f, "fallback"),
        }
    }
}

/// Uniform projection of a routable entity (tool or skill)
///
/// Built fresh from the live registries for every routing call; the router
/// only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingTarget {
    /// Unique target name
    pub name: String,
    /// Whether this names a tool or a skill
    pub target_type: TargetType,
    /// Human-readable description
    pub description: String,
    /// Ordered phrases matched against user prompts
    pub hints: Vec<String>,
}

impl RoutingTarget {
    /// Create a tool-typed target
    pub fn tool(
        name: impl Into<String>,
        description: impl Into<String>,
        hints: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target_type: TargetType::Tool,
            description: description.into(),
            hints,
        }
    }

    /// Create a skill-typed target
    pub fn skill(
        name: impl Into<String>,
        description: impl Into<String>,
        hints: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target_type: TargetType::Skill,
            description: description.into(),
            hints,
        }
    }
}

/// Outcome of one routing call
///
/// Immutable once constructed. Merging extracted arguments in produces a new
/// value via [`RoutingDecision::with_args`]; nothing mutates in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Selected target name, or `None` for fallback
    pub target: Option<String>,
    /// Kind of the selected target (`fallback` when none)
    pub target_type: TargetType,
    /// Match strength in [0.0, 1.0]
    pub confidence: f64,
    /// Structured arguments; always empty from the router itself
    #[serde(default)]
    pub args: BTreeMap<String, String>,
    /// Human-readable justification
    pub reasoning: String,
    /// Unique decision id
    pub id: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl RoutingDecision {
    /// Build a fallback decision (no target selected)
    pub fn fallback(confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            target: None,
            target_type: TargetType::Fallback,
            confidence,
            args: BTreeMap::new(),
            reasoning: reasoning.into(),
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Build a successful decision for a named target
    pub fn selected(
        target: impl Into<String>,
        target_type: TargetType,
        confidence: f64,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            target: Some(target.into()),
            target_type,
            confidence,
            args: BTreeMap::new(),
            reasoning: reasoning.into(),
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Derive a new decision carrying extracted arguments
    ///
    /// Same decision identity (id and timestamp), enriched args.
    pub fn with_args(self, args: BTreeMap<String, String>) -> Self {
        Self { args, ..self }
    }

    /// Whether this decision selected no target
    pub fn is_fallback(&self) -> bool {
        self.target.is_none()
    }
}
