//! End-to-end guardrail framework tests: registry resolution feeding the
//! runner, covering the PII-masking walkthrough.

use std::sync::Arc;

use crate::core::models::openai::{ChatCompletionRequest, ChatMessage, MessageContent, MessageRole};
use crate::core::principal::PrincipalContext;

use super::pii::{PiiGuardrail, PiiMode};
use super::registry::{GuardrailRegistry, GuardrailRunner};
use super::types::{GuardrailAction, GuardrailMode};

fn request_with_text(text: &str) -> ChatCompletionRequest {
    let mut req = ChatCompletionRequest::default();
    req.messages = vec![ChatMessage {
        role: MessageRole::User,
        content: Some(MessageContent::Text(text.to_string())),
        name: None,
        function_call: None,
        tool_calls: None,
        tool_call_id: None,
        audio: None,
    }];
    req
}

#[tokio::test]
async fn default_on_pii_masker_runs_without_explicit_opt_in() {
    let masker = Arc::new(PiiGuardrail::new(
        "pii_masker",
        GuardrailMode::PreCall,
        GuardrailAction::Log,
        true,
        PiiMode::Mask,
    ));
    let registry = GuardrailRegistry::new(vec![masker]);
    let principal = PrincipalContext::for_key("k1");

    let resolved = registry.resolve(&principal);
    assert_eq!(resolved.len(), 1);

    let mut req = request_with_text("my email is alice@example.com, call me back");
    let events = GuardrailRunner::run_pre_call(&resolved, &mut req, &principal, "req-42")
        .await
        .unwrap();

    assert!(events.is_empty(), "masking produces no violation event");
    if let Some(MessageContent::Text(text)) = &req.messages[0].content {
        assert_eq!(text, "my email is <EMAIL_ADDRESS>, call me back");
    } else {
        panic!("expected text content");
    }
}

#[tokio::test]
async fn principal_exclude_disables_a_default_on_guardrail() {
    let masker = Arc::new(PiiGuardrail::new(
        "pii_masker",
        GuardrailMode::PreCall,
        GuardrailAction::Log,
        true,
        PiiMode::Mask,
    ));
    let registry = GuardrailRegistry::new(vec![masker]);

    let mut principal = PrincipalContext::for_key("k1");
    principal.guardrails_policy.exclude = vec!["pii_masker".to_string()];

    let resolved = registry.resolve(&principal);
    assert!(resolved.is_empty());

    let original = "ssn 123-45-6789 unmasked because guardrail disabled";
    let mut req = request_with_text(original);
    let events = GuardrailRunner::run_pre_call(&resolved, &mut req, &principal, "req-43")
        .await
        .unwrap();

    assert!(events.is_empty());
    if let Some(MessageContent::Text(text)) = &req.messages[0].content {
        assert_eq!(text, original);
    }
}

#[tokio::test]
async fn block_mode_detector_stops_the_pipeline_before_routing() {
    let detector = Arc::new(PiiGuardrail::new(
        "pii_detector",
        GuardrailMode::PreCall,
        GuardrailAction::Block,
        true,
        PiiMode::Detect,
    ));
    let registry = GuardrailRegistry::new(vec![detector]);
    let principal = PrincipalContext::for_key("k1");

    let resolved = registry.resolve(&principal);
    let mut req = request_with_text("card number 4111-1111-1111-1111");

    let result = GuardrailRunner::run_pre_call(&resolved, &mut req, &principal, "req-44").await;
    assert!(result.is_err());
}
