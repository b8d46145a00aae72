//! Guardrail type definitions: mode, enforcement action, and outcomes.

use serde::{Deserialize, Serialize};

/// When a guardrail's hooks run relative to the provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardrailMode {
    /// Runs before routing/execution; may mutate the request or block it.
    PreCall,
    /// Runs after a successful provider call; may mutate or block the response.
    PostCall,
    /// Runs both pre- and post-call.
    DuringCall,
}

/// What happens when a guardrail detects a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardrailAction {
    /// Raise a structured error and stop the pipeline.
    Block,
    /// Record a counted event and let the pipeline continue.
    Log,
}

/// Declarative guardrail configuration entry, the unit the orchestrator is
/// built from at startup (config's `guardrails` list, §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardrailSpec {
    pub name: String,
    pub mode: GuardrailMode,
    pub action: GuardrailAction,
    pub default_on: bool,
    #[serde(default)]
    pub params: std::collections::HashMap<String, serde_json::Value>,
}

/// The result of running one guardrail hook.
#[derive(Debug, Clone)]
pub enum GuardrailOutcome {
    /// No violation found.
    Pass,
    /// No violation, but the request/response was mutated in place
    /// (e.g. PII masked).
    Mutated,
    /// A violation was found. Carries a short machine-readable kind used
    /// in the structured error / log event.
    Violation { kind: String },
}

impl GuardrailOutcome {
    pub fn is_violation(&self) -> bool {
        matches!(self, GuardrailOutcome::Violation { .. })
    }
}

/// A guardrail event recorded for a `log`-mode violation, or for a
/// `block`-mode violation surfaced just before the error propagates.
#[derive(Debug, Clone, Serialize)]
pub struct GuardrailEvent {
    pub guardrail: String,
    pub violation_kind: String,
    pub action: GuardrailAction,
    pub request_id: String,
}
