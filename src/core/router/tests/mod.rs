//! Router tests module
//!
//! Contains comprehensive tests for the unified router system.

// Unified router tests
mod cooldown_tests;
mod execution_tests;
mod fallback_tests;
mod router_tests;
mod strategy_tests;

// Legacy module tests (moved from embedded tests)
mod deployment_tests;
