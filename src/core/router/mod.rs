//! Model registry and router (C5, C6) plus the failover engine (C7)
//!
//! The router holds the model-group-to-deployment registry, tracks
//! per-deployment health/cooldown state, and selects a deployment for a
//! request under the configured routing strategy. `execute_impl` builds
//! on top of it to drive the failover chain described in the pipeline
//! orchestrator.
//!
//! ## Module Structure
//!
//! - `config` - Router configuration and routing strategy definitions
//! - `error` - Error types and cooldown reasons
//! - `fallback` - Fallback configuration and execution results
//! - `deployment` - Deployment management and health tracking
//! - `guard` - RAII guard for the `activeRequests` slot
//! - `router` - Core Router struct and deployment management
//! - `selection` - Deployment selection logic
//! - `strategy_impl` - Routing strategy implementations
//! - `execution` - Execution helpers and error conversion
//! - `execute_impl` - Execute methods with retry and fallback support
//! - `gateway_config` - Gateway configuration integration

pub mod config;
pub mod deployment;
pub mod error;
pub mod execute_impl;
pub mod execution;
pub mod fallback;
pub mod gateway_config;
pub mod guard;
pub mod router;
pub mod selection;
pub mod strategy_impl;

#[cfg(test)]
mod tests;

// Re-exports from deployment module
pub use deployment::{Deployment, DeploymentConfig, DeploymentId, DeploymentState, HealthStatus};
pub use guard::DeploymentGuard;

pub use config::{RouterConfig, RoutingStrategy};
pub use error::{CooldownReason, RouterError};
pub use fallback::{ExecutionResult, FallbackConfig, FallbackType};
pub use router::Router;
