//! Deployment selection logic
//!
//! This module contains the core routing logic for selecting
//! the best deployment for a given model.

use super::config::RoutingStrategy;
use super::deployment::{Deployment, DeploymentId};
use super::error::RouterError;
use super::router::Router;
use super::strategy_impl;
use std::sync::atomic::Ordering::Relaxed;

/// Utilization threshold above which a deployment is dropped from
/// selection when pre-call checks are enabled (spec: "≥90% utilization").
const UTILIZATION_SOFT_LIMIT: f64 = 0.9;

/// Extra context a caller can supply to narrow deployment selection beyond
/// plain health/cooldown filtering: requested tags and an estimate of the
/// input token count (used by context-window fallback decisions upstream).
#[derive(Debug, Clone, Default)]
pub struct SelectionContext {
    /// Tags the selected deployment must all carry. Empty means no filter.
    pub tags: Vec<String>,
}

impl Router {
    /// Check if deployment is within parallel request limit
    pub(crate) fn check_parallel_limit(&self, deployment: &Deployment) -> bool {
        match deployment.config.max_parallel_requests {
            Some(limit) => deployment.state.active_requests.load(Relaxed) < limit,
            None => true,
        }
    }

    /// Check if deployment is within rate limits (TPM/RPM), using the
    /// spec's soft ≥90%-utilization threshold rather than the hard limit.
    pub(crate) fn check_rate_limit(&self, deployment: &Deployment) -> bool {
        deployment.rpm_utilization() < UTILIZATION_SOFT_LIMIT
            && deployment.tpm_utilization() < UTILIZATION_SOFT_LIMIT
    }

    /// Select the best deployment for a given model (core routing method)
    ///
    /// # Flow
    ///
    /// 1. Resolve model_name (handle aliases)
    /// 2. Get all deployment IDs for this model
    /// 3. Filter: healthy + not in cooldown
    /// 4. Filter: tags (all requested tags must be present)
    /// 5. Bucket by priority, smallest first, descending only if a bucket is empty
    /// 6. Filter: not over the soft rate-limit utilization threshold
    /// 7. Select based on routing strategy
    /// 8. Increment active_requests counter
    pub fn select_deployment(&self, model_name: &str) -> Result<DeploymentId, RouterError> {
        self.select_deployment_with_context(model_name, &SelectionContext::default())
    }

    /// Select a deployment, narrowed by an explicit [`SelectionContext`].
    pub fn select_deployment_with_context(
        &self,
        model_name: &str,
        ctx: &SelectionContext,
    ) -> Result<DeploymentId, RouterError> {
        // 1. Resolve model name (handle aliases)
        let resolved_name = self.resolve_model_name(model_name);

        // 2. Get all deployment IDs for this model
        let deployment_ids = self
            .model_index
            .get(&resolved_name)
            .ok_or_else(|| RouterError::ModelNotFound(model_name.to_string()))?
            .clone();

        if deployment_ids.is_empty() {
            return Err(RouterError::ModelNotFound(model_name.to_string()));
        }

        // 3. Filter: healthy + not in cooldown
        let mut candidate_ids: Vec<DeploymentId> = deployment_ids
            .iter()
            .filter(|id| {
                self.deployments
                    .get(id.as_str())
                    .map(|d| d.is_healthy() && !d.is_in_cooldown())
                    .unwrap_or(false)
            })
            .cloned()
            .collect();

        if candidate_ids.is_empty() {
            return Err(RouterError::NoAvailableDeployment(model_name.to_string()));
        }

        // 4. Tag filter: a requested tag set that matches nothing never
        // silently falls back to untagged deployments.
        if !ctx.tags.is_empty() {
            candidate_ids.retain(|id| {
                self.deployments
                    .get(id.as_str())
                    .map(|d| ctx.tags.iter().all(|t| d.tags.contains(t)))
                    .unwrap_or(false)
            });

            if candidate_ids.is_empty() {
                return Err(RouterError::NoAvailableDeployment(model_name.to_string()));
            }
        }

        // 5. Priority-bucket descent: try the lowest-numbered (highest
        // priority) bucket first, only descending if it is empty after the
        // remaining filters.
        let mut priorities: Vec<u32> = candidate_ids
            .iter()
            .filter_map(|id| self.deployments.get(id.as_str()).map(|d| d.config.priority))
            .collect();
        priorities.sort_unstable();
        priorities.dedup();

        let mut bucket: Vec<DeploymentId> = Vec::new();
        for priority in priorities {
            let this_bucket: Vec<DeploymentId> = candidate_ids
                .iter()
                .filter(|id| {
                    self.deployments
                        .get(id.as_str())
                        .map(|d| d.config.priority == priority)
                        .unwrap_or(false)
                })
                .cloned()
                .collect();

            // 6. Soft rate-limit filter, applied within the bucket.
            let filtered: Vec<DeploymentId> = if self.config.enable_pre_call_checks {
                this_bucket
                    .iter()
                    .filter(|id| {
                        self.deployments
                            .get(id.as_str())
                            .map(|d| self.check_rate_limit(&d) && self.check_parallel_limit(&d))
                            .unwrap_or(false)
                    })
                    .cloned()
                    .collect()
            } else {
                this_bucket
            };

            if !filtered.is_empty() {
                bucket = filtered;
                break;
            }
        }

        if bucket.is_empty() {
            return Err(RouterError::NoAvailableDeployment(model_name.to_string()));
        }

        // 7. Select based on routing strategy
        let selected_id = match self.config.routing_strategy {
            RoutingStrategy::SimpleShuffle => {
                strategy_impl::weighted_random(&bucket, &self.deployments)
            }
            RoutingStrategy::LeastBusy => strategy_impl::least_busy(&bucket, &self.deployments),
            RoutingStrategy::UsageBased => strategy_impl::lowest_usage(&bucket, &self.deployments),
            RoutingStrategy::LatencyBased => {
                strategy_impl::lowest_latency(&bucket, &self.deployments)
            }
            RoutingStrategy::CostBased => strategy_impl::lowest_cost(&bucket, &self.deployments),
            RoutingStrategy::RateLimitAware => {
                strategy_impl::rate_limit_aware(&bucket, &self.deployments)
            }
            RoutingStrategy::RoundRobin => {
                strategy_impl::round_robin(&resolved_name, &bucket, &self.round_robin_counters)
            }
        };

        // 8. Increment active_requests counter
        if let Some(deployment) = self.deployments.get(&selected_id) {
            deployment.state.active_requests.fetch_add(1, Relaxed);
        }

        Ok(selected_id)
    }

    /// Release a deployment after request completion
    ///
    /// Decrements the active_requests counter for the deployment. Prefer
    /// [`super::guard::DeploymentGuard`] over calling this directly so the
    /// release happens on every exit path, including panics.
    pub fn release_deployment(&self, deployment_id: &str) {
        if let Some(deployment) = self.deployments.get(deployment_id) {
            deployment.state.active_requests.fetch_sub(1, Relaxed);
        }
    }
}
