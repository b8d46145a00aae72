//! The authenticated caller's identity and policy for one request.
//!
//! [`PrincipalContext`] is produced by the (external) auth subsystem — here
//! a thin `auth::api_key` lookup — and consumed read-only by every pipeline
//! stage downstream of authentication. The gateway never mutates it.

use std::collections::HashMap;

/// One of the four scopes at which limits, budgets, and guardrail policy
/// can be set. Checks run most-restrictive-wins across whichever of these
/// scopes are present on the principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Scope {
    Key,
    User,
    Team,
    Org,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Key => "key",
            Scope::User => "user",
            Scope::Team => "team",
            Scope::Org => "org",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Limits and budget attached to a single scope (key, user, team, or org).
#[derive(Debug, Clone, Default)]
pub struct ScopeLimits {
    /// Requests per minute. `None` means unlimited.
    pub rpm: Option<u32>,
    /// Tokens per minute. `None` means unlimited.
    pub tpm: Option<u32>,
    /// Concurrent in-flight requests. Only meaningful at [`Scope::Key`].
    pub max_parallel: Option<u32>,
    /// Hard budget in USD. Crossing it blocks every subsequent request
    /// until the scope's budget resets.
    pub max_budget: Option<f64>,
    /// Soft budget in USD. Crossing it only emits an alert.
    pub soft_budget: Option<f64>,
    /// How often the cumulative spend counter resets.
    pub budget_duration: Option<std::time::Duration>,
}

/// How the principal's guardrail list is resolved against the registry's
/// `default_on` list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GuardrailsPolicyMode {
    /// Start from the `default_on` list; `include` extends it, `exclude`
    /// removes named entries.
    #[default]
    Inherit,
    /// Replace the `default_on` list outright with `include`; `exclude`
    /// still applies on top.
    Override,
}

/// Per-request guardrail resolution policy carried on the principal.
#[derive(Debug, Clone, Default)]
pub struct GuardrailsPolicy {
    pub mode: GuardrailsPolicyMode,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// The immutable value representing the authenticated caller and their
/// resolved policy for one request. Every pipeline stage takes this by
/// shared reference; nothing downstream of authentication is allowed to
/// mutate it.
#[derive(Debug, Clone)]
pub struct PrincipalContext {
    /// SHA-256 hash (hex) of the presented API key. Never the raw key.
    pub key_id: String,
    pub user_id: Option<String>,
    pub team_id: Option<String>,
    pub org_id: Option<String>,
    /// Models this principal may request. Empty means all models allowed.
    pub allowed_models: Vec<String>,
    /// Limits per applicable scope. Only scopes the principal actually has
    /// an identity for carry an entry.
    pub limits: HashMap<Scope, ScopeLimits>,
    pub guardrails_policy: GuardrailsPolicy,
    pub end_user: Option<String>,
    pub tags: Vec<String>,
}

impl PrincipalContext {
    /// Iterate the (scope, identity) pairs this principal is checked
    /// against, in most-specific-first order. `org` is last because it is
    /// usually the broadest/most shared budget.
    pub fn scopes(&self) -> Vec<(Scope, &str)> {
        let mut out = Vec::with_capacity(4);
        out.push((Scope::Key, self.key_id.as_str()));
        if let Some(u) = &self.user_id {
            out.push((Scope::User, u.as_str()));
        }
        if let Some(t) = &self.team_id {
            out.push((Scope::Team, t.as_str()));
        }
        if let Some(o) = &self.org_id {
            out.push((Scope::Org, o.as_str()));
        }
        out
    }

    pub fn is_model_allowed(&self, model: &str) -> bool {
        self.allowed_models.is_empty() || self.allowed_models.iter().any(|m| m == model)
    }

    /// Build a minimal principal for a bare API key with no resolved
    /// scopes or limits — used when the key lookup yields no team/org/user
    /// association (anonymous-ish keys, or tests).
    pub fn for_key(key_id: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            user_id: None,
            team_id: None,
            org_id: None,
            allowed_models: Vec::new(),
            limits: HashMap::new(),
            guardrails_policy: GuardrailsPolicy::default(),
            end_user: None,
            tags: Vec::new(),
        }
    }

    pub fn with_limits(mut self, scope: Scope, limits: ScopeLimits) -> Self {
        self.limits.insert(scope, limits);
        self
    }

    /// Build a principal from the (external) auth subsystem's result.
    /// Returns `None` for unauthenticated requests; callers should turn
    /// that into a 401 before entering the pipeline.
    pub fn from_auth_result(result: &crate::auth::AuthResult) -> Option<Self> {
        if !result.success {
            return None;
        }

        let key_id = result
            .api_key
            .as_ref()
            .map(|k| k.key_hash.clone())
            .or_else(|| result.user.as_ref().map(|u| u.id().to_string()))?;

        let mut principal = Self::for_key(key_id);
        principal.user_id = result
            .user
            .as_ref()
            .map(|u| u.id().to_string())
            .or_else(|| result.api_key.as_ref().and_then(|k| k.user_id.map(|id| id.to_string())));
        principal.team_id = result.api_key.as_ref().and_then(|k| k.team_id.map(|id| id.to_string())).or_else(|| {
            result
                .user
                .as_ref()
                .and_then(|u| u.team_ids.first().map(|id| id.to_string()))
        });

        if let Some(api_key) = &result.api_key {
            if let Some(limits) = &api_key.rate_limits {
                principal.limits.insert(
                    Scope::Key,
                    ScopeLimits {
                        rpm: limits.rpm,
                        tpm: limits.tpm,
                        max_parallel: limits.concurrent,
                        max_budget: None,
                        soft_budget: None,
                        budget_duration: None,
                    },
                );
            }
        }

        Some(principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scopes_includes_only_present_identities() {
        let p = PrincipalContext::for_key("k1");
        assert_eq!(p.scopes(), vec![(Scope::Key, "k1")]);

        let mut p2 = p.clone();
        p2.team_id = Some("t1".into());
        assert_eq!(p2.scopes(), vec![(Scope::Key, "k1"), (Scope::Team, "t1")]);
    }

    #[test]
    fn model_allowlist_empty_means_all() {
        let p = PrincipalContext::for_key("k1");
        assert!(p.is_model_allowed("anything"));

        let mut p2 = p.clone();
        p2.allowed_models = vec!["gpt-4o".into()];
        assert!(p2.is_model_allowed("gpt-4o"));
        assert!(!p2.is_model_allowed("gpt-4"));
    }
}
