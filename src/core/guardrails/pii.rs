//! Built-in PII detection/masking guardrail.
//!
//! Scans message text for a configurable set of entity kinds and either
//! masks matches in place (`mode: mask`, the default) or reports a
//! violation outright (`mode: block`), per-entity.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::core::models::openai::{ChatCompletionRequest, ChatCompletionResponse, MessageContent};
use crate::core::principal::PrincipalContext;
use crate::core::security::patterns::{CREDIT_CARD_PATTERN, EMAIL_PATTERN, PHONE_PATTERN, SSN_PATTERN};
use crate::utils::error::Result;

use super::registry::Guardrail;
use super::types::{GuardrailAction, GuardrailMode, GuardrailOutcome};

/// The entity kinds this guardrail can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PiiEntity {
    Email,
    Phone,
    Ssn,
    CreditCard,
}

impl PiiEntity {
    fn placeholder(&self) -> &'static str {
        match self {
            PiiEntity::Email => "<EMAIL_ADDRESS>",
            PiiEntity::Phone => "<PHONE_NUMBER>",
            PiiEntity::Ssn => "<SSN>",
            PiiEntity::CreditCard => "<CREDIT_CARD>",
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            PiiEntity::Email => "pii_email",
            PiiEntity::Phone => "pii_phone",
            PiiEntity::Ssn => "pii_ssn",
            PiiEntity::CreditCard => "pii_credit_card",
        }
    }

    fn is_match(&self, text: &str) -> bool {
        match self {
            PiiEntity::Email => EMAIL_PATTERN.is_match(text),
            PiiEntity::Phone => PHONE_PATTERN.is_match(text),
            PiiEntity::Ssn => SSN_PATTERN.is_match(text),
            PiiEntity::CreditCard => CREDIT_CARD_PATTERN.is_match(text),
        }
    }

    fn mask(&self, text: &str) -> String {
        let placeholder = self.placeholder();
        match self {
            PiiEntity::Email => EMAIL_PATTERN.replace_all(text, placeholder).into_owned(),
            PiiEntity::Phone => PHONE_PATTERN.replace_all(text, placeholder).into_owned(),
            PiiEntity::Ssn => SSN_PATTERN.replace_all(text, placeholder).into_owned(),
            PiiEntity::CreditCard => CREDIT_CARD_PATTERN.replace_all(text, placeholder).into_owned(),
        }
    }
}

/// Whether the guardrail masks matches and continues, or reports a
/// violation for the caller's configured `action` to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiiMode {
    Mask,
    Detect,
}

pub struct PiiGuardrail {
    name: String,
    mode: GuardrailMode,
    action: GuardrailAction,
    default_on: bool,
    pii_mode: PiiMode,
    entities: HashSet<PiiEntity>,
}

impl PiiGuardrail {
    pub fn new(
        name: impl Into<String>,
        mode: GuardrailMode,
        action: GuardrailAction,
        default_on: bool,
        pii_mode: PiiMode,
    ) -> Self {
        Self::with_entities(
            name,
            mode,
            action,
            default_on,
            pii_mode,
            [
                PiiEntity::Email,
                PiiEntity::Phone,
                PiiEntity::Ssn,
                PiiEntity::CreditCard,
            ]
            .into_iter()
            .collect(),
        )
    }

    pub fn with_entities(
        name: impl Into<String>,
        mode: GuardrailMode,
        action: GuardrailAction,
        default_on: bool,
        pii_mode: PiiMode,
        entities: HashSet<PiiEntity>,
    ) -> Self {
        Self {
            name: name.into(),
            mode,
            action,
            default_on,
            pii_mode,
            entities,
        }
    }

    fn entities(&self) -> impl Iterator<Item = PiiEntity> + '_ {
        self.entities.iter().copied()
    }

    /// Scans and, in mask mode, rewrites a single piece of text. Reports
    /// whether a replacement actually happened, distinct from merely having
    /// run in mask mode — a clean message must report `Clean`, not `Masked`.
    fn process_text(&self, text: &mut String) -> ScanOutcome {
        let mut masked = false;
        for entity in self.entities() {
            if entity.is_match(text) {
                match self.pii_mode {
                    PiiMode::Mask => {
                        *text = entity.mask(text);
                        masked = true;
                    }
                    PiiMode::Detect => {
                        return ScanOutcome::Violation(entity.kind());
                    }
                }
            }
        }
        if masked {
            ScanOutcome::Masked
        } else {
            ScanOutcome::Clean
        }
    }

    fn process_message_content(&self, content: &mut Option<MessageContent>) -> ScanOutcome {
        match content {
            Some(MessageContent::Text(text)) => self.process_text(text),
            Some(MessageContent::Parts(parts)) => {
                let mut masked = false;
                for part in parts.iter_mut() {
                    if let crate::core::models::openai::ContentPart::Text { text } = part {
                        match self.process_text(text) {
                            ScanOutcome::Violation(kind) => return ScanOutcome::Violation(kind),
                            ScanOutcome::Masked => masked = true,
                            ScanOutcome::Clean => {}
                        }
                    }
                }
                if masked {
                    ScanOutcome::Masked
                } else {
                    ScanOutcome::Clean
                }
            }
            None => ScanOutcome::Clean,
        }
    }
}

/// Result of scanning one piece of message content.
enum ScanOutcome {
    /// No entity matched.
    Clean,
    /// An entity matched and was replaced with its placeholder (mask mode).
    Masked,
    /// An entity matched and reporting is configured to block (detect mode).
    Violation(&'static str),
}

#[async_trait]
impl Guardrail for PiiGuardrail {
    fn name(&self) -> &str {
        &self.name
    }

    fn mode(&self) -> GuardrailMode {
        self.mode
    }

    fn action(&self) -> GuardrailAction {
        self.action
    }

    fn default_on(&self) -> bool {
        self.default_on
    }

    async fn pre_call(
        &self,
        request: &mut ChatCompletionRequest,
        _principal: &PrincipalContext,
    ) -> Result<GuardrailOutcome> {
        let mut mutated = false;
        for message in request.messages.iter_mut() {
            match self.process_message_content(&mut message.content) {
                ScanOutcome::Violation(kind) => {
                    return Ok(GuardrailOutcome::Violation {
                        kind: kind.to_string(),
                    });
                }
                ScanOutcome::Masked => mutated = true,
                ScanOutcome::Clean => {}
            }
        }

        if mutated {
            Ok(GuardrailOutcome::Mutated)
        } else {
            Ok(GuardrailOutcome::Pass)
        }
    }

    async fn post_call_success(
        &self,
        response: &mut ChatCompletionResponse,
        _principal: &PrincipalContext,
    ) -> Result<GuardrailOutcome> {
        let mut mutated = false;
        for choice in response.choices.iter_mut() {
            match self.process_message_content(&mut choice.message.content) {
                ScanOutcome::Violation(kind) => {
                    return Ok(GuardrailOutcome::Violation {
                        kind: kind.to_string(),
                    });
                }
                ScanOutcome::Masked => mutated = true,
                ScanOutcome::Clean => {}
            }
        }

        if mutated {
            Ok(GuardrailOutcome::Mutated)
        } else {
            Ok(GuardrailOutcome::Pass)
        }
    }

    async fn moderate(&self, text: &str) -> Result<bool> {
        Ok(!self.entities().any(|e| e.is_match(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::openai::ChatMessage;
    use crate::core::models::openai::MessageRole;

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
    async fn masks_email_with_placeholder() {
        let guardrail = PiiGuardrail::new(
            "pii_masker",
            GuardrailMode::PreCall,
            GuardrailAction::Log,
            true,
            PiiMode::Mask,
        );
        let mut req = request_with_text("contact me at jane.doe@example.com please");
        let principal = PrincipalContext::for_key("k1");

        let outcome = guardrail.pre_call(&mut req, &principal).await.unwrap();
        assert!(matches!(outcome, GuardrailOutcome::Mutated));

        if let Some(MessageContent::Text(text)) = &req.messages[0].content {
            assert!(text.contains("<EMAIL_ADDRESS>"));
            assert!(!text.contains("jane.doe@example.com"));
        } else {
            panic!("expected text content");
        }
    }

    #[tokio::test]
    async fn detect_mode_reports_violation_without_mutating() {
        let guardrail = PiiGuardrail::new(
            "pii_detector",
            GuardrailMode::PreCall,
            GuardrailAction::Block,
            true,
            PiiMode::Detect,
        );
        let mut req = request_with_text("my ssn is 123-45-6789");
        let principal = PrincipalContext::for_key("k1");

        let outcome = guardrail.pre_call(&mut req, &principal).await.unwrap();
        assert!(matches!(outcome, GuardrailOutcome::Violation { .. }));

        if let Some(MessageContent::Text(text)) = &req.messages[0].content {
            assert!(text.contains("123-45-6789"));
        }
    }

    #[tokio::test]
    async fn clean_text_passes_through_untouched() {
        let guardrail = PiiGuardrail::new(
            "pii_masker",
            GuardrailMode::PreCall,
            GuardrailAction::Log,
            true,
            PiiMode::Mask,
        );
        let mut req = request_with_text("just a normal question about rust");
        let principal = PrincipalContext::for_key("k1");

        let outcome = guardrail.pre_call(&mut req, &principal).await.unwrap();
        assert!(matches!(outcome, GuardrailOutcome::Pass));
    }
}
