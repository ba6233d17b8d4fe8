//! Rule-based router

use crate::types::{RoutingDecision, RoutingTarget};

/// Default threshold below which the router falls back to plain reasoning
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Prompt + targets -> decision. No LLM, no learned weights.
pub trait Router: Send + Sync {
    /// Select a target (or fallback) from the prompt. Must not mutate targets.
    fn route(&self, prompt: &str, targets: &[RoutingTarget]) -> RoutingDecision;
}

/// Keyword/phrase matching against target hints
///
/// Confidence is computed deterministically:
/// - For each target, score = (longest matching hint length) / (longest hint
///   length across the whole catalog, or 1 if no target has hints).
/// - The score is clamped to 1.0 and used as confidence.
/// - Ties break to the lexicographically smallest target name.
///
/// Matching is substring-based, not tokenized: a hint occurring inside a
/// longer word still counts. The scoring math presumes raw substring length
/// semantics, so this must not be changed to word-boundary matching.
#[derive(Debug, Clone)]
pub struct RuleRouter {
    confidence_threshold: f64,
}

impl Default for RuleRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleRouter {
    /// Create a router with the default threshold
    pub fn new() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }

    /// Create a router with an explicit threshold in [0.0, 1.0]
    ///
    /// A decision exactly at the threshold is accepted; rejection is strict
    /// less-than.
    pub fn with_threshold(confidence_threshold: f64) -> Self {
        Self {
            confidence_threshold,
        }
    }

    /// The configured threshold
    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }
}

impl Router for RuleRouter {
    fn route(&self, prompt: &str, targets: &[RoutingTarget]) -> RoutingDecision {
        if targets.is_empty() {
            return RoutingDecision::fallback(0.0, "no targets available");
        }

        let prompt_lower = prompt.trim().to_lowercase();
        if prompt_lower.is_empty() {
            return RoutingDecision::fallback(0.0, "empty prompt");
        }

        // Longest hint across the whole catalog, so confidence is comparable
        // between targets with very different hint-length profiles
        let max_hint_len = targets
            .iter()
            .flat_map(|t| t.hints.iter())
            .map(|h| h.chars().count())
            .max()
            .unwrap_or(1)
            .max(1);

        // (confidence, target, matched hint length); targets with no
        // matching hint are excluded from candidacy entirely
        let mut candidates: Vec<(f64, &RoutingTarget, usize)> = Vec::new();
        for target in targets {
            let best_len = target
                .hints
                .iter()
                .filter(|h| prompt_lower.contains(&h.to_lowercase()))
                .map(|h| h.chars().count())
                .max()
                .unwrap_or(0);
            if best_len > 0 {
                let confidence = (best_len as f64 / max_hint_len as f64).min(1.0);
                candidates.push((confidence, target, best_len));
            }
        }

        if candidates.is_empty() {
            return RoutingDecision::fallback(0.0, "no hint matched the prompt");
        }

        // Confidence desc, then name asc. Explicit sort rather than
        // first-found, so the outcome never depends on iteration order.
        candidates.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.1.name.cmp(&b.1.name))
        });

        let (top_confidence, chosen, top_len) = candidates[0];
        if top_confidence < self.confidence_threshold {
            return RoutingDecision::fallback(
                top_confidence,
                format!(
                    "best match '{}' below threshold ({:.2} < {})",
                    chosen.name, top_confidence, self.confidence_threshold
                ),
            );
        }

        let matched_hint = chosen
            .hints
            .iter()
            .find(|h| prompt_lower.contains(&h.to_lowercase()) && h.chars().count() == top_len)
            .map(String::as_str)
            .unwrap_or_default();

        RoutingDecision::selected(
            &chosen.name,
            chosen.target_type,
            top_confidence,
            format!(
                "matched hint \"{}\" for {} '{}'",
                matched_hint, chosen.target_type, chosen.name
            ),
        )
    }
}
