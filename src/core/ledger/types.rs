//! Spend ledger type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::cost::types::UsageTokens;
use crate::core::principal::Scope;

/// One append-only entry recording the cost of a single completed (or
/// failed-after-execution) request. Written once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendRecord {
    pub request_id: String,
    pub key_id: String,
    pub user_id: Option<String>,
    pub team_id: Option<String>,
    pub org_id: Option<String>,
    pub model: String,
    pub provider: String,
    pub usage: UsageTokens,
    pub cost_usd: f64,
    pub cache_hit: bool,
    pub created_at: DateTime<Utc>,
}

/// Cumulative counters tracked per scope identity. Reset when
/// `reset_at` is reached (driven by the scope's configured
/// `budget_duration`).
#[derive(Debug, Clone, Default)]
pub struct SpendCounter {
    pub spend_usd: f64,
    pub request_count: u64,
    pub reset_at: Option<DateTime<Utc>>,
}

/// The outcome of a budget pre-check, performed before routing.
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetCheck {
    Ok,
    SoftExceeded { scope: Scope, identity: String },
    HardExceeded { scope: Scope, identity: String },
}

impl BudgetCheck {
    pub fn is_blocking(&self) -> bool {
        matches!(self, BudgetCheck::HardExceeded { .. })
    }
}
