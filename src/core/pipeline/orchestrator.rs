//! The request execution pipeline: auth -> rate-limit -> budget ->
//! pre-call guardrails -> cache lookup -> route -> execute-with-failover
//! -> post-call guardrails -> cache write -> spend accounting -> events.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use crate::core::cache::{CacheEngine, CachePlan};
use crate::core::cost::{generic_cost_per_token, UsageTokens};
use crate::core::guardrails::{GuardrailRegistry, GuardrailRunner};
use crate::core::ledger::{BudgetCheck, SharedLedger, SpendRecord};
use crate::core::models::openai::{ChatCompletionRequest, ChatCompletionResponse};
use crate::core::principal::PrincipalContext;
use crate::core::rate_limit::ScopedRateLimiter;
use crate::core::router::router::Router;
use crate::core::types::context::RequestContext;
use crate::utils::error::{GatewayError, Result};

use super::convert::{from_chat_response, to_chat_request};
use super::events::{PipelineEvent, PipelineObserver};

/// Rough estimate of tokens a request will consume, used only to reserve
/// TPM headroom before the real usage is known. Proportional to message
/// text length; intentionally crude, corrected after the call completes.
fn estimate_tokens(request: &ChatCompletionRequest) -> u32 {
    use crate::core::models::openai::MessageContent;

    let chars: usize = request
        .messages
        .iter()
        .map(|m| match &m.content {
            Some(MessageContent::Text(t)) => t.len(),
            Some(MessageContent::Parts(parts)) => parts
                .iter()
                .map(|p| match p {
                    crate::core::models::openai::ContentPart::Text { text } => text.len(),
                    _ => 0,
                })
                .sum(),
            None => 0,
        })
        .sum();

    let estimate = (chars / 4) as u32;
    estimate + request.max_tokens.unwrap_or(256)
}

/// Wires every gateway subsystem together for one request. One instance
/// is shared across the whole process, like [`Router`] and [`SharedLedger`].
pub struct PipelineOrchestrator {
    router: Arc<Router>,
    rate_limiter: Arc<ScopedRateLimiter>,
    ledger: SharedLedger,
    guardrails: GuardrailRegistry,
    cache: Arc<CacheEngine>,
    default_cache_ttl: Duration,
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl PipelineOrchestrator {
    pub fn new(
        router: Arc<Router>,
        rate_limiter: Arc<ScopedRateLimiter>,
        ledger: SharedLedger,
        guardrails: GuardrailRegistry,
        cache: Arc<CacheEngine>,
    ) -> Self {
        Self {
            router,
            rate_limiter,
            ledger,
            guardrails,
            cache,
            default_cache_ttl: Duration::from_secs(300),
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn with_default_cache_ttl(mut self, ttl: Duration) -> Self {
        self.default_cache_ttl = ttl;
        self
    }

    fn emit(&self, event: PipelineEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }

    /// Runs the full 11-stage pipeline for one chat completion request.
    pub async fn handle_chat_completion(
        &self,
        request: ChatCompletionRequest,
        principal: &PrincipalContext,
    ) -> Result<ChatCompletionResponse> {
        self.handle_chat_completion_with_cache_info(request, principal)
            .await
            .map(|(response, _cache_hit)| response)
    }

    /// Same as [`Self::handle_chat_completion`], but also reports whether
    /// the response came from the cache (stage 5) or a live provider call
    /// (stages 6-7). The streaming handler needs this to decide whether to
    /// synthesize chunks immediately or after a live call completes; both
    /// paths reuse [`crate::core::cache::synthesize_stream_chunks`] since
    /// the assembled response is always available in full before any
    /// chunk is emitted to the client (see §4.3: chunks are accumulated
    /// until the terminal chunk before a cache write happens at all).
    pub async fn handle_chat_completion_with_cache_info(
        &self,
        mut request: ChatCompletionRequest,
        principal: &PrincipalContext,
    ) -> Result<(ChatCompletionResponse, bool)> {
        let request_id = Uuid::new_v4().to_string();
        info!(request_id = %request_id, model = %request.model, "pipeline start");

        if !principal.is_model_allowed(&request.model) {
            return Err(GatewayError::authorization(format!(
                "principal is not permitted to use model {}",
                request.model
            )));
        }

        // Stage 2: atomic multi-scope rate limiting.
        let estimated_tokens = estimate_tokens(&request);
        self.rate_limiter
            .check_and_increment(principal, estimated_tokens)?;
        let _parallel_guard = self.rate_limiter.acquire_parallel(principal)?;

        // Stage 3: budget check. Hard budgets block; soft budgets only alert.
        match self.ledger.check_budget(principal) {
            BudgetCheck::HardExceeded { scope, identity } => {
                return Err(GatewayError::budget_exceeded(format!("{scope}:{identity}")));
            }
            BudgetCheck::SoftExceeded { scope, identity } => {
                warn!(%scope, %identity, "soft budget exceeded");
                self.emit(PipelineEvent::SoftBudgetAlert {
                    request_id: request_id.clone(),
                    scope: scope.as_str().to_string(),
                    identity,
                });
            }
            BudgetCheck::Ok => {}
        }

        // Stage 4: pre-call guardrails (may mutate `request`, e.g. mask PII).
        let resolved_guardrails = self.guardrails.resolve(principal);
        let guardrail_events = GuardrailRunner::run_pre_call(
            &resolved_guardrails,
            &mut request,
            principal,
            &request_id,
        )
        .await?;
        for event in &guardrail_events {
            self.emit(PipelineEvent::GuardrailLogged {
                request_id: request_id.clone(),
                event: event.clone(),
            });
        }

        // Stage 5: cache lookup.
        let plan = CachePlan::resolve(&request, self.default_cache_ttl);
        if let Some(cached) = self.cache.lookup(&plan).await {
            info!(request_id = %request_id, "cache hit, skipping routing and provider call");
            self.emit(PipelineEvent::CacheHit {
                request_id: request_id.clone(),
            });
            self.record_spend(&request_id, principal, &cached.response, "cache", true, 0.0);
            return Ok((cached.response, true));
        }

        // Stages 6-7: route and execute with retry/failover.
        let result = self
            .execute_with_routing(&request_id, &request, principal)
            .await;

        let mut response = match result {
            Ok(response) => response,
            Err(err) => {
                GuardrailRunner::run_post_call_failure(&resolved_guardrails, &err, principal).await;
                self.emit(PipelineEvent::RequestFailed {
                    request_id: request_id.clone(),
                    error: err.to_string(),
                });
                return Err(err);
            }
        };

        // Stage 8: post-call guardrails on a successful response.
        let post_events = GuardrailRunner::run_post_call_success(
            &resolved_guardrails,
            &mut response,
            principal,
            &request_id,
        )
        .await?;
        for event in &post_events {
            self.emit(PipelineEvent::GuardrailLogged {
                request_id: request_id.clone(),
                event: event.clone(),
            });
        }

        // Stage 9: cache write.
        self.cache.store(&plan, response.clone()).await;

        // Stage 10: TPM correction + spend accounting.
        let (provider, cost_usd) = self.cost_for(&request.model, &response).await;
        if let Some(usage) = &response.usage {
            self.rate_limiter
                .correct_tpm(principal, estimated_tokens, usage.total_tokens);
        }
        self.record_spend(&request_id, principal, &response, &provider, false, cost_usd);

        // Stage 11: best-effort event emission.
        self.emit(PipelineEvent::RequestSucceeded {
            request_id: request_id.clone(),
            model: response.model.clone(),
        });

        Ok((response, false))
    }

    async fn execute_with_routing(
        &self,
        request_id: &str,
        request: &ChatCompletionRequest,
        principal: &PrincipalContext,
    ) -> Result<ChatCompletionResponse> {
        let core_request = to_chat_request(request)?;
        let router = self.router.clone();
        let context = RequestContext {
            request_id: request_id.to_string(),
            user_id: principal.user_id.clone(),
            ..RequestContext::default()
        };

        let router_for_closure = router.clone();
        let outcome = router
            .execute(&request.model, move |deployment_id| {
                let router = router_for_closure.clone();
                let core_request = core_request.clone();
                let context = context.clone();
                async move {
                    let deployment = router
                        .get_deployment(&deployment_id)
                        .ok_or_else(|| crate::core::providers::unified_provider::ProviderError::Other {
                            provider: "router",
                            message: "deployment disappeared mid-request".to_string(),
                        })?;
                    let provider = deployment.provider.clone();
                    let timeout = std::time::Duration::from_secs(deployment.config.timeout_secs);
                    drop(deployment);

                    // §4.6 step 3: every attempt against a deployment runs
                    // under that deployment's single-call timeout, distinct
                    // from any provider-internal HTTP client timeout.
                    let response = tokio::time::timeout(
                        timeout,
                        provider.chat_completion(core_request, context),
                    )
                    .await
                    .map_err(|_| crate::core::providers::unified_provider::ProviderError::Timeout {
                        provider: "router",
                        message: format!("deployment call exceeded {timeout:?} timeout"),
                    })??;
                    let tokens = response
                        .usage
                        .as_ref()
                        .map(|u| u.total_tokens as u64)
                        .unwrap_or(0);
                    Ok((response, tokens))
                }
            })
            .await
            .map_err(|router_err| {
                GatewayError::service_unavailable(format!("routing failed: {router_err}"))
            })?;

        Ok(from_chat_response(outcome.result))
    }

    async fn cost_for(&self, model: &str, response: &ChatCompletionResponse) -> (String, f64) {
        let provider = model.split('/').next().unwrap_or("unknown").to_string();
        let Some(usage) = &response.usage else {
            return (provider, 0.0);
        };
        let usage_tokens = UsageTokens::new(usage.prompt_tokens, usage.completion_tokens);
        match generic_cost_per_token(model, &usage_tokens, &provider) {
            Ok(breakdown) => (provider, breakdown.total_cost),
            Err(_) => (provider, 0.0),
        }
    }

    fn record_spend(
        &self,
        request_id: &str,
        principal: &PrincipalContext,
        response: &ChatCompletionResponse,
        provider: &str,
        cache_hit: bool,
        cost_usd: f64,
    ) {
        let usage = response
            .usage
            .as_ref()
            .map(|u| UsageTokens::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_else(|| UsageTokens::new(0, 0));

        self.ledger.record(
            principal,
            SpendRecord {
                request_id: request_id.to_string(),
                key_id: principal.key_id.clone(),
                user_id: principal.user_id.clone(),
                team_id: principal.team_id.clone(),
                org_id: principal.org_id.clone(),
                model: response.model.clone(),
                provider: provider.to_string(),
                usage,
                cost_usd,
                cache_hit,
                created_at: chrono::Utc::now(),
            },
        );
    }
}
