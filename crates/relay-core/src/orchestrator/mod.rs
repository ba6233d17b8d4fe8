//! Turn orchestration
//!
//! Assembles the message list for the reasoner (persona + injected context +
//! history + user input), routes prompts to tools and skills, and gates tool
//! execution. At most one tool or skill runs per turn.

use std::sync::Arc;

use thiserror::Error;

use crate::gate::{Gate, GateError};
use crate::logging::Logger;
use crate::reasoner::{ReasonStream, Reasoner, ReasonerError};
use crate::router::{Router, RuleRouter};
use crate::skills::{SkillError, SkillRegistry};
use crate::tools::ToolRegistry;
use crate::types::{
    ActionResult, ExecutionArtifact, Message, Response, RoutingTarget, Session, TargetType,
};

/// Persona injected as the system message when none is configured
pub const DEFAULT_PERSONA: &str =
    "You are a careful, transparent assistant. Answer directly, note your \
     assumptions, and use any injected tool output or instructions when they \
     are relevant.";

/// Errors from a full orchestrated turn
#[derive(Debug, Error)]
pub enum EngineError {
    /// The gate denied the routed tool; the turn is aborted, not retried
    #[error(transparent)]
    PermissionDenied(#[from] GateError),

    #[error(transparent)]
    Reasoner(#[from] ReasonerError),

    #[error(transparent)]
    Skill(#[from] SkillError),

    /// The router selected a name the registry no longer has
    #[error("no tool named '{0}' in the registry")]
    UnknownTool(String),
}

/// The engine driving one conversational turn at a time
pub struct Orchestrator {
    reasoner: Box<dyn Reasoner>,
    router: RuleRouter,
    gate: Gate,
    tools: ToolRegistry,
    skills: SkillRegistry,
    persona: String,
    logger: Arc<dyn Logger>,
}

impl Orchestrator {
    /// Create an orchestrator with the built-in tools, no skills, and the
    /// default router and persona
    pub fn new(reasoner: Box<dyn Reasoner>, gate: Gate, logger: Arc<dyn Logger>) -> Self {
        Self {
            reasoner,
            router: RuleRouter::new(),
            gate,
            tools: ToolRegistry::builtin(),
            skills: SkillRegistry::empty(),
            persona: DEFAULT_PERSONA.to_string(),
            logger,
        }
    }

    /// Replace the router
    pub fn with_router(mut self, router: RuleRouter) -> Self {
        self.router = router;
        self
    }

    /// Replace the tool registry
    pub fn with_tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    /// Replace the skill registry
    pub fn with_skills(mut self, skills: SkillRegistry) -> Self {
        self.skills = skills;
        self
    }

    /// Replace the persona text
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    /// The tool registry
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// The skill registry
    pub fn skills(&self) -> &SkillRegistry {
        &self.skills
    }

    /// Project the live registries into routing targets (tools then skills)
    ///
    /// Rebuilt on every call; the router never caches it.
    pub fn routing_targets(&self) -> Vec<RoutingTarget> {
        let mut targets = self.tools.targets();
        targets.extend(self.skills.targets());
        targets
    }

    /// Assemble the reasoner's message list for one turn
    ///
    /// `[persona] + injected context + history + [user prompt]`. The session
    /// holds user/assistant history only; the persona is injected here.
    fn build_messages(
        &self,
        prompt: &str,
        context: &[Message],
        session: Option<&Session>,
    ) -> Vec<Message> {
        let mut messages = Vec::with_capacity(
            2 + context.len() + session.map(|s| s.messages.len()).unwrap_or(0),
        );
        messages.push(Message::system(&self.persona));
        messages.extend(context.iter().cloned());
        if let Some(session) = session {
            messages.extend(session.messages.iter().cloned());
        }
        messages.push(Message::user(prompt));
        messages
    }

    /// Plain reasoning turn: no routing, no tools
    ///
    /// Appends the exchange to the session when one is given.
    pub async fn execute(
        &self,
        prompt: &str,
        session: Option<&mut Session>,
    ) -> Result<Response, EngineError> {
        let messages = self.build_messages(prompt, &[], session.as_deref());
        let response = self.reasoner.reason(&messages).await?;
        if let Some(session) = session {
            session.record_exchange(prompt, &response.content);
        }
        Ok(response)
    }

    /// Plain streaming turn
    ///
    /// The caller consumes the stream and records the exchange from the
    /// final [`crate::reasoner::StreamEvent::Done`] event.
    pub async fn execute_stream(
        &self,
        prompt: &str,
        session: Option<&Session>,
    ) -> Result<ReasonStream, EngineError> {
        let messages = self.build_messages(prompt, &[], session);
        Ok(self.reasoner.stream_reason(&messages).await?)
    }

    /// One fully orchestrated turn: route, gate, fold, reason
    ///
    /// A denied tool aborts the turn with
    /// [`EngineError::PermissionDenied`]; a tool's own failure does not (its
    /// error output is folded into the context like any other result).
    pub async fn run_turn(
        &self,
        prompt: &str,
        session: Option<&mut Session>,
    ) -> Result<ExecutionArtifact, EngineError> {
        let targets = self.routing_targets();
        let mut decision = self.router.route(prompt, &targets);
        self.logger.info(&format!(
            "route: {} (confidence {:.2}) - {}",
            decision
                .target
                .as_deref()
                .unwrap_or("fallback"),
            decision.confidence,
            decision.reasoning
        ));

        let mut context: Vec<Message> = Vec::new();
        let mut tool_result: Option<ActionResult> = None;
        let mut skill_used: Option<String> = None;

        match (decision.target_type, decision.target.clone()) {
            (TargetType::Tool, Some(name)) => {
                let tool = self
                    .tools
                    .get(&name)
                    .ok_or_else(|| EngineError::UnknownTool(name.clone()))?;
                let args = tool.extract_args(prompt);
                decision = decision.with_args(args.clone());

                let result = self.gate.run(tool, &args)?;
                let folded = if result.is_ok() {
                    format!("Tool '{}' output:\n{}", name, result.output)
                } else {
                    format!(
                        "Tool '{}' failed: {}",
                        name,
                        result.error_message().unwrap_or("unknown error")
                    )
                };
                context.push(Message::system(folded));
                tool_result = Some(result);
            }
            (TargetType::Skill, Some(name)) => {
                let instructions = self.skills.load_instructions(&name)?;
                context.push(Message::system(instructions));
                skill_used = Some(name);
            }
            _ => {}
        }

        let messages = self.build_messages(prompt, &context, session.as_deref());
        let response = self.reasoner.reason(&messages).await?;
        if let Some(session) = session {
            session.record_exchange(prompt, &response.content);
        }

        let mut artifact = ExecutionArtifact::new(prompt, response).with_decision(decision);
        if let Some(result) = tool_result {
            artifact = artifact.with_tool_result(result);
        }
        if let Some(name) = skill_used {
            artifact = artifact.with_skill(name);
        }
        Ok(artifact)
    }
}
