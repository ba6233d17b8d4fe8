//! Relay Core
//!
//! Conversational orchestration around a pluggable reasoning backend. The
//! engine assembles a message list (persona + skill instructions + tool
//! output + history + user input), routes prompts to tools and skills by
//! deterministic keyword matching, and gates every tool run behind a
//! default-deny permission check.
//!
//! ```rust,ignore
//! use relay_core::{Gate, MockReasoner, NoOpLogger, Orchestrator};
//!
//! let engine = Orchestrator::new(
//!     Box::new(MockReasoner::echo()),
//!     Gate::deny_all(),
//!     Arc::new(NoOpLogger),
//! );
//!
//! // Routes "repeat this line" to the echo tool, gates it, folds its
//! // output into the context, and reasons over the result.
//! let artifact = engine.run_turn("repeat this line", None).await?;
//! ```

pub mod gate;
pub mod logging;
pub mod orchestrator;
pub mod reasoner;
pub mod router;
pub mod secrets;
pub mod session;
pub mod skills;
pub mod tools;
pub mod types;

// Re-export commonly used types
pub use types::{
    ActionResult, ActionStatus, ExecutionArtifact, Message, MessageRole, Response,
    RoutingDecision, RoutingTarget, Session, TargetType, ARTIFACT_VERSION,
};

pub use gate::{parse_grants, Gate, GateError, Permission, PermissionParseError};

pub use router::{Router, RuleRouter, DEFAULT_CONFIDENCE_THRESHOLD};

pub use tools::{EchoTool, ReadFileTool, Tool, ToolArgs, ToolRegistry};

pub use skills::{SkillError, SkillMetadata, SkillRegistry};

pub use session::{FileSessionStore, MemorySessionStore, SessionStore, StoreError};

pub use reasoner::{
    GenaiReasoner, MockReasoner, ReasonStream, Reasoner, ReasonerError, StreamEvent,
};

pub use secrets::{EnvSecretStore, MemorySecretStore, SecretStore, SecretStoreError};

pub use logging::{ConsoleLogger, Logger, NoOpLogger, SharedLogger};

pub use orchestrator::{EngineError, Orchestrator, DEFAULT_PERSONA};
