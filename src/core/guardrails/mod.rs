//! Guardrail framework: named, pluggable pre/post-call policy hooks
//! (PII masking, prompt-injection detection, and operator-supplied
//! custom guardrails), resolved per-request against the caller's policy
//! and run in registration order.

pub mod pii;
pub mod prompt_injection;
pub mod registry;
pub mod types;

#[cfg(test)]
mod tests;

pub use pii::{PiiEntity, PiiGuardrail, PiiMode};
pub use prompt_injection::{HttpClassifier, PromptInjectionClassifier, PromptInjectionGuardrail};
pub use registry::{Guardrail, GuardrailRegistry, GuardrailRunner};
pub use types::{GuardrailAction, GuardrailEvent, GuardrailMode, GuardrailOutcome, GuardrailSpec};
