//! In-memory spend ledger: append-only records plus per-scope cumulative
//! counters, with soft/hard budget checks and a reset sweeper.

use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

use crate::core::principal::{PrincipalContext, Scope, ScopeLimits};

use super::types::{BudgetCheck, SpendCounter, SpendRecord};

/// Key into the counters map: (scope, identity).
type CounterKey = (Scope, String);

/// Spend tracking and budget enforcement, held as a single shared
/// instance across the gateway (one per process, like the router).
pub struct SpendLedger {
    counters: DashMap<CounterKey, SpendCounter>,
    /// Bounded ring of recent records kept in memory for quick inspection
    /// endpoints; the append-only system of record is the storage layer.
    recent: RwLock<Vec<SpendRecord>>,
    recent_capacity: usize,
}

impl SpendLedger {
    pub fn new() -> Self {
        Self::with_capacity(10_000)
    }

    pub fn with_capacity(recent_capacity: usize) -> Self {
        Self {
            counters: DashMap::new(),
            recent: RwLock::new(Vec::new()),
            recent_capacity,
        }
    }

    /// Stage 3: pre-call budget check, most-restrictive-wins across every
    /// scope the principal carries an identity and limit for.
    pub fn check_budget(&self, principal: &PrincipalContext) -> BudgetCheck {
        let mut soft_hit: Option<(Scope, String)> = None;

        for (scope, identity) in principal.scopes() {
            let Some(limits) = principal.limits.get(&scope) else {
                continue;
            };
            let spend = self.current_spend(scope, identity);

            if let Some(max_budget) = limits.max_budget {
                if spend >= max_budget {
                    return BudgetCheck::HardExceeded {
                        scope,
                        identity: identity.to_string(),
                    };
                }
            }

            if soft_hit.is_none() {
                if let Some(soft_budget) = limits.soft_budget {
                    if spend >= soft_budget {
                        soft_hit = Some((scope, identity.to_string()));
                    }
                }
            }
        }

        match soft_hit {
            Some((scope, identity)) => BudgetCheck::SoftExceeded { scope, identity },
            None => BudgetCheck::Ok,
        }
    }

    fn current_spend(&self, scope: Scope, identity: &str) -> f64 {
        self.counters
            .get(&(scope, identity.to_string()))
            .map(|c| c.spend_usd)
            .unwrap_or(0.0)
    }

    /// Stage 10: commit a completed request's spend. All-or-nothing across
    /// every scope the principal is tracked at, mirroring the rate
    /// limiter's atomic multi-scope commit.
    pub fn record(&self, principal: &PrincipalContext, record: SpendRecord) {
        for (scope, identity) in principal.scopes() {
            let budget_duration = principal
                .limits
                .get(&scope)
                .and_then(|l: &ScopeLimits| l.budget_duration);

            let mut entry = self
                .counters
                .entry((scope, identity.to_string()))
                .or_default();

            if let Some(reset_at) = entry.reset_at {
                if Utc::now() >= reset_at {
                    *entry = SpendCounter::default();
                }
            }
            if entry.reset_at.is_none() {
                if let Some(duration) = budget_duration {
                    entry.reset_at = chrono::Duration::from_std(duration)
                        .ok()
                        .map(|d| Utc::now() + d);
                }
            }

            entry.spend_usd += record.cost_usd;
            entry.request_count += 1;
        }

        let mut recent = self.recent.write();
        if recent.len() >= self.recent_capacity {
            recent.remove(0);
        }
        recent.push(record);
    }

    pub fn spend_for(&self, scope: Scope, identity: &str) -> f64 {
        self.current_spend(scope, identity)
    }

    pub fn recent_records(&self) -> Vec<SpendRecord> {
        self.recent.read().clone()
    }

    /// Sweeps every tracked counter and resets any whose window has
    /// elapsed. Intended to run on a periodic background task so budgets
    /// reset even for scopes that see no traffic right at the boundary.
    pub fn sweep_resets(&self) -> usize {
        let now = Utc::now();
        let mut reset_count = 0;

        for mut entry in self.counters.iter_mut() {
            if let Some(reset_at) = entry.reset_at {
                if now >= reset_at {
                    info!(scope = %entry.key().0, identity = %entry.key().1, "resetting spend counter");
                    *entry.value_mut() = SpendCounter::default();
                    reset_count += 1;
                }
            }
        }

        reset_count
    }
}

impl Default for SpendLedger {
    fn default() -> Self {
        Self::new()
    }
}

pub type SharedLedger = Arc<SpendLedger>;
