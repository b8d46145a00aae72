//! Guardrail registration and the ordered pre/post-call runner.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::models::openai::{ChatCompletionRequest, ChatCompletionResponse};
use crate::core::principal::{GuardrailsPolicyMode, PrincipalContext};
use crate::utils::error::{GatewayError, Result};

use super::types::{GuardrailAction, GuardrailEvent, GuardrailMode, GuardrailOutcome};

/// A named, pluggable policy hook. Built-ins (PII, prompt-injection) and
/// any operator-supplied guardrail implement this the same way; the
/// orchestrator never distinguishes between them.
#[async_trait]
pub trait Guardrail: Send + Sync {
    fn name(&self) -> &str;
    fn mode(&self) -> GuardrailMode;
    fn action(&self) -> GuardrailAction;
    fn default_on(&self) -> bool;

    /// May mutate `request` in place (e.g. mask PII) or report a violation.
    /// Default: passes everything through unmodified.
    async fn pre_call(
        &self,
        _request: &mut ChatCompletionRequest,
        _principal: &PrincipalContext,
    ) -> Result<GuardrailOutcome> {
        Ok(GuardrailOutcome::Pass)
    }

    /// Runs only after a successful (HTTP 200) provider response.
    async fn post_call_success(
        &self,
        _response: &mut ChatCompletionResponse,
        _principal: &PrincipalContext,
    ) -> Result<GuardrailOutcome> {
        Ok(GuardrailOutcome::Pass)
    }

    /// Observation only — cannot block or mutate, runs on a failed provider call.
    async fn post_call_failure(&self, _error: &GatewayError, _principal: &PrincipalContext) {}

    /// A standalone pass/fail moderation query some guardrails expose for
    /// ad hoc checks outside the main pre/post hooks.
    async fn moderate(&self, _text: &str) -> Result<bool> {
        Ok(true)
    }
}

/// The ordered list of constructed guardrails, built once at startup from
/// the config's `(name -> factory)` map (Design Notes: no dynamic
/// decorator-based registration, no ambient globals).
#[derive(Clone)]
pub struct GuardrailRegistry {
    /// Registration order is preserved; pre-call guardrails must run in
    /// this order, each seeing the previous one's mutations.
    guardrails: Vec<Arc<dyn Guardrail>>,
}

impl GuardrailRegistry {
    pub fn new(guardrails: Vec<Arc<dyn Guardrail>>) -> Self {
        Self { guardrails }
    }

    /// Builds the registry once at startup from config's declarative
    /// `guardrails` list, a `(name -> factory)` map rather than runtime
    /// decorator-based registration. Unknown names are logged and skipped
    /// rather than failing startup, since a typo in one guardrail entry
    /// shouldn't take down the whole gateway.
    pub fn from_config(specs: &[crate::config::models::guardrails::GuardrailConfig]) -> Self {
        use crate::config::models::guardrails::{GuardrailActionConfig, GuardrailModeConfig};
        use super::pii::{PiiGuardrail, PiiMode};
        use super::prompt_injection::{HttpClassifier, PromptInjectionGuardrail};

        let mut guardrails: Vec<Arc<dyn Guardrail>> = Vec::with_capacity(specs.len());

        for spec in specs {
            let mode = match spec.mode {
                GuardrailModeConfig::PreCall => GuardrailMode::PreCall,
                GuardrailModeConfig::PostCall => GuardrailMode::PostCall,
                GuardrailModeConfig::DuringCall => GuardrailMode::DuringCall,
            };
            let action = match spec.action {
                GuardrailActionConfig::Block => GuardrailAction::Block,
                GuardrailActionConfig::Log => GuardrailAction::Log,
            };

            match spec.name.as_str() {
                "pii" | "pii_detector" | "pii_masker" => {
                    let pii_mode = match spec.params.get("mode").and_then(|v| v.as_str()) {
                        Some("detect") => PiiMode::Detect,
                        _ => PiiMode::Mask,
                    };
                    guardrails.push(Arc::new(PiiGuardrail::new(
                        spec.name.clone(),
                        mode,
                        action,
                        spec.default_on,
                        pii_mode,
                    )));
                }
                "prompt_injection" => {
                    let endpoint = spec
                        .params
                        .get("endpoint")
                        .and_then(|v| v.as_str())
                        .unwrap_or("http://localhost:8001/classify")
                        .to_string();
                    let threshold = spec
                        .params
                        .get("threshold")
                        .and_then(|v| v.as_f64())
                        .unwrap_or(0.8);
                    let fail_open = spec
                        .params
                        .get("fail_open")
                        .and_then(|v| v.as_bool())
                        .unwrap_or(true);
                    guardrails.push(Arc::new(PromptInjectionGuardrail::new(
                        spec.name.clone(),
                        action,
                        spec.default_on,
                        Arc::new(HttpClassifier::new(endpoint)),
                        threshold,
                        fail_open,
                    )));
                }
                other => {
                    warn!(guardrail = other, "unknown guardrail name in config, skipping");
                }
            }
        }

        info!(count = guardrails.len(), "guardrail registry constructed from config");
        Self::new(guardrails)
    }

    pub fn is_empty(&self) -> bool {
        self.guardrails.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Guardrail>> {
        self.guardrails.iter().find(|g| g.name() == name).cloned()
    }

    /// Resolve the guardrail list for one request against the principal's
    /// policy: override mode replaces the default_on list; inherit mode
    /// extends it. Exclusions always apply on top.
    pub fn resolve(&self, principal: &PrincipalContext) -> Vec<Arc<dyn Guardrail>> {
        let policy = &principal.guardrails_policy;
        let exclude: HashSet<&str> = policy.exclude.iter().map(String::as_str).collect();

        let mut selected: Vec<Arc<dyn Guardrail>> = match policy.mode {
            GuardrailsPolicyMode::Override if !policy.include.is_empty() => policy
                .include
                .iter()
                .filter_map(|name| self.get(name))
                .collect(),
            _ => self
                .guardrails
                .iter()
                .filter(|g| g.default_on())
                .cloned()
                .collect(),
        };

        if policy.mode == GuardrailsPolicyMode::Inherit {
            for name in &policy.include {
                if !selected.iter().any(|g| g.name() == name) {
                    if let Some(g) = self.get(name) {
                        selected.push(g);
                    }
                }
            }
        }

        selected.retain(|g| !exclude.contains(g.name()));

        // Keep registration order even after filtering/extending.
        selected.sort_by_key(|g| {
            self.guardrails
                .iter()
                .position(|r| r.name() == g.name())
                .unwrap_or(usize::MAX)
        });

        selected
    }
}

/// Runs the resolved guardrail list for one request, in registration
/// order, applying block/log semantics.
pub struct GuardrailRunner;

impl GuardrailRunner {
    /// Stage 4: pre-call guardrails. Each sees the (possibly mutated)
    /// request produced by the previous one.
    pub async fn run_pre_call(
        guardrails: &[Arc<dyn Guardrail>],
        request: &mut ChatCompletionRequest,
        principal: &PrincipalContext,
        request_id: &str,
    ) -> Result<Vec<GuardrailEvent>> {
        let mut events = Vec::new();

        for guardrail in guardrails {
            if !matches!(
                guardrail.mode(),
                GuardrailMode::PreCall | GuardrailMode::DuringCall
            ) {
                continue;
            }

            let outcome = guardrail.pre_call(request, principal).await?;
            if let GuardrailOutcome::Violation { kind } = outcome {
                let event = GuardrailEvent {
                    guardrail: guardrail.name().to_string(),
                    violation_kind: kind.clone(),
                    action: guardrail.action(),
                    request_id: request_id.to_string(),
                };

                match guardrail.action() {
                    GuardrailAction::Block => {
                        warn!(guardrail = %guardrail.name(), kind = %kind, "pre-call guardrail blocked request");
                        return Err(GatewayError::guardrail_violation(guardrail.name(), kind));
                    }
                    GuardrailAction::Log => {
                        info!(guardrail = %guardrail.name(), kind = %kind, "pre-call guardrail logged violation");
                        events.push(event);
                    }
                }
            }
        }

        Ok(events)
    }

    /// Stage 8: post-call guardrails, run only after a successful provider
    /// response. A block here means the client sees the guardrail error,
    /// never the provider's output.
    pub async fn run_post_call_success(
        guardrails: &[Arc<dyn Guardrail>],
        response: &mut ChatCompletionResponse,
        principal: &PrincipalContext,
        request_id: &str,
    ) -> Result<Vec<GuardrailEvent>> {
        let mut events = Vec::new();

        for guardrail in guardrails {
            if !matches!(
                guardrail.mode(),
                GuardrailMode::PostCall | GuardrailMode::DuringCall
            ) {
                continue;
            }

            let outcome = guardrail.post_call_success(response, principal).await?;
            if let GuardrailOutcome::Violation { kind } = outcome {
                let event = GuardrailEvent {
                    guardrail: guardrail.name().to_string(),
                    violation_kind: kind.clone(),
                    action: guardrail.action(),
                    request_id: request_id.to_string(),
                };

                match guardrail.action() {
                    GuardrailAction::Block => {
                        return Err(GatewayError::guardrail_violation(guardrail.name(), kind));
                    }
                    GuardrailAction::Log => {
                        events.push(event);
                    }
                }
            }
        }

        Ok(events)
    }

    pub async fn run_post_call_failure(
        guardrails: &[Arc<dyn Guardrail>],
        error: &GatewayError,
        principal: &PrincipalContext,
    ) {
        for guardrail in guardrails {
            guardrail.post_call_failure(error, principal).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::principal::GuardrailsPolicy;
    use async_trait::async_trait;

    struct AlwaysBlock;

    #[async_trait]
    impl Guardrail for AlwaysBlock {
        fn name(&self) -> &str {
            "always_block"
        }
        fn mode(&self) -> GuardrailMode {
            GuardrailMode::PreCall
        }
        fn action(&self) -> GuardrailAction {
            GuardrailAction::Block
        }
        fn default_on(&self) -> bool {
            true
        }

        async fn pre_call(
            &self,
            _request: &mut ChatCompletionRequest,
            _principal: &PrincipalContext,
        ) -> Result<GuardrailOutcome> {
            Ok(GuardrailOutcome::Violation {
                kind: "test".to_string(),
            })
        }
    }

    struct AlwaysLog;

    #[async_trait]
    impl Guardrail for AlwaysLog {
        fn name(&self) -> &str {
            "always_log"
        }
        fn mode(&self) -> GuardrailMode {
            GuardrailMode::PreCall
        }
        fn action(&self) -> GuardrailAction {
            GuardrailAction::Log
        }
        fn default_on(&self) -> bool {
            false
        }

        async fn pre_call(
            &self,
            _request: &mut ChatCompletionRequest,
            _principal: &PrincipalContext,
        ) -> Result<GuardrailOutcome> {
            Ok(GuardrailOutcome::Violation {
                kind: "noisy".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn block_action_raises_and_stops_pipeline() {
        let registry = GuardrailRegistry::new(vec![Arc::new(AlwaysBlock)]);
        let principal = PrincipalContext::for_key("k1");
        let resolved = registry.resolve(&principal);
        let mut req = ChatCompletionRequest::default();

        let err = GuardrailRunner::run_pre_call(&resolved, &mut req, &principal, "req-1")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::GuardrailViolation { .. }));
    }

    #[tokio::test]
    async fn log_action_continues_and_records_event() {
        let registry = GuardrailRegistry::new(vec![Arc::new(AlwaysLog)]);
        let mut principal = PrincipalContext::for_key("k1");
        principal.guardrails_policy = GuardrailsPolicy {
            mode: GuardrailsPolicyMode::Inherit,
            include: vec!["always_log".to_string()],
            exclude: vec![],
        };
        let resolved = registry.resolve(&principal);
        let mut req = ChatCompletionRequest::default();

        let events = GuardrailRunner::run_pre_call(&resolved, &mut req, &principal, "req-1")
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].violation_kind, "noisy");
    }

    #[test]
    fn exclude_removes_named_entry_even_when_default_on() {
        let registry = GuardrailRegistry::new(vec![Arc::new(AlwaysBlock)]);
        let mut principal = PrincipalContext::for_key("k1");
        principal.guardrails_policy.exclude = vec!["always_block".to_string()];
        assert!(registry.resolve(&principal).is_empty());
    }
}
