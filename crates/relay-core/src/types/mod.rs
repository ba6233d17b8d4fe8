//! Core types for conversational turns
//!
//! This module contains the shared value objects used across the engine.

mod artifact;
mod decision;
mod message;
mod response;
mod result;

pub use artifact::{ExecutionArtifact, ARTIFACT_VERSION};
pub use decision::{RoutingDecision, RoutingTarget, TargetType};
pub use message::{Message, MessageRole, Session};
pub use response::Response;
pub use result::{ActionResult, ActionStatus};
