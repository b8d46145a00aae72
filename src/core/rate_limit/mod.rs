//! Multi-scope rate limiting for the request execution pipeline (stage 2):
//! per-minute RPM/TPM counters checked and committed atomically across
//! every scope (key/user/team/org) a principal carries a limit for, plus
//! a key-scoped parallel-request gauge.
//!
//! Distinct from the provider-local [`crate::core::providers::shared::RateLimiter`],
//! which limits a single provider API key's outbound call rate rather
//! than a gateway caller's.

pub mod limiter;
pub mod types;

#[cfg(test)]
mod tests;

pub use limiter::{ParallelGuard, ScopedRateLimiter};
pub use types::{LimitKind, LimitViolation};
