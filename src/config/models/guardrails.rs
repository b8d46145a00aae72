//! Guardrail configuration
//!
//! Declares the ordered list of guardrails the gateway constructs at
//! startup from a (name -> factory) map, per `routing.strategy`-style
//! declarative config rather than decorator-based registration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// When a guardrail runs in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardrailModeConfig {
    PreCall,
    PostCall,
    DuringCall,
}

/// What happens when a guardrail's moderation query fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardrailActionConfig {
    Block,
    Log,
}

/// One entry in `guardrails:` config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardrailConfig {
    pub name: String,
    pub mode: GuardrailModeConfig,
    pub action: GuardrailActionConfig,
    #[serde(default)]
    pub default_on: bool,
    #[serde(default)]
    pub params: HashMap<String, serde_json::Value>,
}

#[allow(dead_code)]
impl GuardrailConfig {
    pub fn merge(mut self, other: Self) -> Self {
        self.default_on = other.default_on;
        self.params = other.params;
        self
    }
}
