//! Request execution pipeline: the orchestrator that wires auth, rate
//! limiting, budget enforcement, guardrails, caching, and routing into
//! the single sequence every gateway request flows through.

pub mod convert;
pub mod events;
pub mod metadata;
pub mod orchestrator;

pub use events::{PipelineEvent, PipelineObserver, TracingObserver};
pub use metadata::{CacheDirective, CacheMode, RequestMetadata};
pub use orchestrator::PipelineOrchestrator;
