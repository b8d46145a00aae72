//! Atomic multi-scope rate limiting: key/user/team/org RPM and TPM
//! counters, checked and incremented as a single unit, plus a
//! key-scoped parallel-request gauge.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::core::principal::{PrincipalContext, Scope, ScopeLimits};
use crate::utils::error::{GatewayError, Result};

use super::types::{CounterKey, LimitKind, LimitViolation};

/// Shared, process-wide counter store. Bucketed by (scope, identity,
/// kind, minute); old buckets are left to be overwritten on wraparound
/// of the minute key space rather than actively swept, since they carry
/// no state worth preserving once their minute has passed.
pub struct ScopedRateLimiter {
    counters: DashMap<CounterKey, AtomicU32>,
    parallel: DashMap<String, Arc<AtomicU32>>,
    /// Serializes the check-then-increment sequence across every scope
    /// in one request so the "all or nothing" commit can't interleave
    /// with another request's commit. A local single-flight lock, per
    /// the allowed implementation strategy for single-process deployments.
    commit_lock: Mutex<()>,
}

/// RAII guard for a key-scope parallel-request slot. Releases on every
/// exit path, including panics and early returns, by virtue of `Drop`.
pub struct ParallelGuard {
    counter: Arc<AtomicU32>,
}

impl Drop for ParallelGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ScopedRateLimiter {
    pub fn new() -> Self {
        Self {
            counters: DashMap::new(),
            parallel: DashMap::new(),
            commit_lock: Mutex::new(()),
        }
    }

    fn minute_bucket() -> i64 {
        Utc::now().timestamp() / 60
    }

    pub(crate) fn count(&self, scope: Scope, identity: &str, kind: LimitKind) -> u32 {
        let key = (scope, identity.to_string(), kind, Self::minute_bucket());
        self.counters
            .get(&key)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    fn add(&self, scope: Scope, identity: &str, kind: LimitKind, amount: u32) {
        let key = (scope, identity.to_string(), kind, Self::minute_bucket());
        self.counters
            .entry(key)
            .or_insert_with(|| AtomicU32::new(0))
            .fetch_add(amount, Ordering::SeqCst);
    }

    fn limit_for(limits: &ScopeLimits, kind: LimitKind) -> Option<u32> {
        match kind {
            LimitKind::Rpm => limits.rpm,
            LimitKind::Tpm => limits.tpm,
        }
    }

    fn seconds_left_in_minute() -> u64 {
        60 - (Utc::now().timestamp() % 60) as u64
    }

    /// Stage 2: atomic multi-scope rate-limit check-and-increment.
    /// `estimated_tokens` is the pre-call TPM estimate; it's corrected
    /// after the response with [`Self::correct_tpm`].
    pub fn check_and_increment(
        &self,
        principal: &PrincipalContext,
        estimated_tokens: u32,
    ) -> Result<()> {
        let _guard = self.commit_lock.lock();

        for (scope, identity) in principal.scopes() {
            let Some(limits) = principal.limits.get(&scope) else {
                continue;
            };

            if let Some(limit) = Self::limit_for(limits, LimitKind::Rpm) {
                if self.count(scope, identity, LimitKind::Rpm) + 1 > limit {
                    return Err(self.violation_error(scope, identity, LimitKind::Rpm));
                }
            }
            if let Some(limit) = Self::limit_for(limits, LimitKind::Tpm) {
                if self.count(scope, identity, LimitKind::Tpm) + estimated_tokens > limit {
                    return Err(self.violation_error(scope, identity, LimitKind::Tpm));
                }
            }
        }

        for (scope, identity) in principal.scopes() {
            if principal.limits.get(&scope).is_none() {
                continue;
            }
            self.add(scope, identity, LimitKind::Rpm, 1);
            self.add(scope, identity, LimitKind::Tpm, estimated_tokens);
        }

        Ok(())
    }

    fn violation_error(&self, scope: Scope, identity: &str, kind: LimitKind) -> GatewayError {
        let retry_after_secs = Self::seconds_left_in_minute();
        GatewayError::rate_limit_scoped(scope.as_str(), kind.as_str(), retry_after_secs)
    }

    /// Stage 10 correction: applies (actual − estimate) to the current
    /// TPM bucket once real completion tokens are known. May go negative
    /// in effect (estimate overshot); saturating to avoid underflow.
    pub fn correct_tpm(&self, principal: &PrincipalContext, estimated: u32, actual: u32) {
        if actual == estimated {
            return;
        }
        for (scope, identity) in principal.scopes() {
            if principal.limits.get(&scope).is_none() {
                continue;
            }
            let key = (scope, identity.to_string(), LimitKind::Tpm, Self::minute_bucket());
            let counter = self.counters.entry(key).or_insert_with(|| AtomicU32::new(0));
            if actual >= estimated {
                counter.fetch_add(actual - estimated, Ordering::SeqCst);
            } else {
                let delta = estimated - actual;
                counter
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                        Some(v.saturating_sub(delta))
                    })
                    .ok();
            }
        }
    }

    /// Key-scope parallel-request acquire. Held for the remainder of the
    /// pipeline via the returned guard.
    pub fn acquire_parallel(&self, principal: &PrincipalContext) -> Result<Option<ParallelGuard>> {
        let Some(limits) = principal.limits.get(&Scope::Key) else {
            return Ok(None);
        };
        let Some(max_parallel) = limits.max_parallel else {
            return Ok(None);
        };

        let counter = self
            .parallel
            .entry(principal.key_id.clone())
            .or_insert_with(|| Arc::new(AtomicU32::new(0)))
            .clone();

        let prev = counter.fetch_add(1, Ordering::SeqCst);
        if prev >= max_parallel {
            counter.fetch_sub(1, Ordering::SeqCst);
            return Err(GatewayError::rate_limit_scoped(
                Scope::Key.as_str(),
                "max_parallel",
                1,
            ));
        }

        Ok(Some(ParallelGuard { counter }))
    }
}

impl Default for ScopedRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
pub type ViolationList = Vec<LimitViolation>;
