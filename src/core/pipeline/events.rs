//! Stage 11: best-effort pipeline event emission. Observers are fanned
//! out to synchronously and must never fail the request; a slow or
//! panicking observer is the observer's problem, not the pipeline's.

use crate::core::guardrails::GuardrailEvent;

#[derive(Debug, Clone)]
pub enum PipelineEvent {
    CacheHit {
        request_id: String,
    },
    SoftBudgetAlert {
        request_id: String,
        scope: String,
        identity: String,
    },
    GuardrailLogged {
        request_id: String,
        event: GuardrailEvent,
    },
    RequestSucceeded {
        request_id: String,
        model: String,
    },
    RequestFailed {
        request_id: String,
        error: String,
    },
}

/// A sink for pipeline events. Implementations may log, export metrics,
/// or forward to an external collector; none of that is allowed to block
/// or fail the request that produced the event.
pub trait PipelineObserver: Send + Sync {
    fn on_event(&self, event: &PipelineEvent);
}

/// Logs every event via `tracing`. The default observer wired in when no
/// operator-supplied sink is configured.
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::CacheHit { request_id } => {
                tracing::debug!(request_id, "cache hit");
            }
            PipelineEvent::SoftBudgetAlert {
                request_id,
                scope,
                identity,
            } => {
                tracing::warn!(request_id, scope, identity, "soft budget exceeded");
            }
            PipelineEvent::GuardrailLogged { request_id, event } => {
                tracing::info!(
                    request_id,
                    guardrail = %event.guardrail,
                    kind = %event.violation_kind,
                    "guardrail logged a violation"
                );
            }
            PipelineEvent::RequestSucceeded { request_id, model } => {
                tracing::info!(request_id, model, "request succeeded");
            }
            PipelineEvent::RequestFailed { request_id, error } => {
                tracing::warn!(request_id, error, "request failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingObserver(Arc<AtomicUsize>);

    impl PipelineObserver for CountingObserver {
        fn on_event(&self, _event: &PipelineEvent) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn observer_receives_emitted_events() {
        let count = Arc::new(AtomicUsize::new(0));
        let observer = CountingObserver(count.clone());
        observer.on_event(&PipelineEvent::CacheHit {
            request_id: "r1".to_string(),
        });
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
