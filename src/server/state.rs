//! Application state shared across HTTP handlers
//!
//! This module provides the AppState struct and its implementations.

use crate::config::Config;
use crate::core::pipeline::PipelineOrchestrator;
use crate::services::pricing::PricingService;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// This struct contains shared resources that need to be accessed across
/// multiple request handlers. All fields are wrapped in Arc for efficient
/// sharing across threads.
#[derive(Clone)]
#[allow(dead_code)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Authentication system
    pub auth: Arc<crate::auth::AuthSystem>,
    /// Request router (legacy ProviderRegistry, kept for non-chat routes
    /// that have not yet been migrated onto the pipeline orchestrator)
    pub router: Arc<crate::core::providers::ProviderRegistry>,
    /// The request execution pipeline: auth -> rate-limit -> budget ->
    /// guardrails -> cache -> route -> failover -> spend. `None` only in
    /// configurations with no deployments (e.g. most unit tests).
    pub pipeline: Option<Arc<PipelineOrchestrator>>,
    /// Storage layer
    pub storage: Arc<crate::storage::StorageLayer>,
    /// Unified pricing service
    pub pricing: Arc<PricingService>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(
        config: Config,
        auth: crate::auth::AuthSystem,
        router: crate::core::providers::ProviderRegistry,
        storage: crate::storage::StorageLayer,
        pricing: Arc<PricingService>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            router: Arc::new(router),
            pipeline: None,
            storage: Arc::new(storage),
            pricing,
        }
    }

    /// Create a new AppState with the request execution pipeline wired in.
    pub fn new_with_pipeline(
        config: Config,
        auth: crate::auth::AuthSystem,
        router: crate::core::providers::ProviderRegistry,
        pipeline: PipelineOrchestrator,
        storage: crate::storage::StorageLayer,
        pricing: Arc<PricingService>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            router: Arc::new(router),
            pipeline: Some(Arc::new(pipeline)),
            storage: Arc::new(storage),
            pricing,
        }
    }

    /// Get gateway configuration
    #[allow(dead_code)] // May be used by handlers
    pub fn config(&self) -> &Config {
        &self.config
    }
}
