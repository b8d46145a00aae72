//! RAII guard for the per-deployment `activeRequests` slot.

use super::deployment::DeploymentId;
use super::router::Router;

/// Releases a deployment's `activeRequests` slot when dropped.
///
/// [`Router::select_deployment`] increments the counter; holding this guard
/// for the lifetime of the in-flight request guarantees the matching
/// decrement happens on every exit path, including early returns and panics:
/// unwinding drops every local in scope, this guard included, before the
/// stack frame that selected the deployment disappears.
pub struct DeploymentGuard<'a> {
    router: &'a Router,
    deployment_id: DeploymentId,
}

impl<'a> DeploymentGuard<'a> {
    pub fn new(router: &'a Router, deployment_id: DeploymentId) -> Self {
        Self {
            router,
            deployment_id,
        }
    }

    /// The deployment this guard holds a slot on.
    pub fn deployment_id(&self) -> &DeploymentId {
        &self.deployment_id
    }
}

impl<'a> Drop for DeploymentGuard<'a> {
    fn drop(&mut self) {
        self.router.release_deployment(&self.deployment_id);
    }
}
