//! Intent routing - keyword matching without an extra LLM call
//!
//! The router selects at most one target (tool or skill) from a user prompt
//! via literal, case-insensitive phrase matching. Deterministic: the same
//! prompt and target list always yield the same decision.

mod rule;

pub use rule::{Router, RuleRouter, DEFAULT_CONFIDENCE_THRESHOLD};
