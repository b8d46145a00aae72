//! Multi-scope rate limit types.

use crate::core::principal::Scope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitKind {
    Rpm,
    Tpm,
}

impl LimitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LimitKind::Rpm => "rpm",
            LimitKind::Tpm => "tpm",
        }
    }
}

impl std::fmt::Display for LimitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which (scope, identity, kind) tripped the limit, for the structured
/// 429 the orchestrator surfaces.
#[derive(Debug, Clone)]
pub struct LimitViolation {
    pub scope: Scope,
    pub identity: String,
    pub kind: LimitKind,
    pub retry_after_secs: u64,
}

pub(super) type CounterKey = (Scope, String, LimitKind, i64);
