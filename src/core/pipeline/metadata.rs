//! Gateway-specific request metadata: the optional `metadata` object
//! clients may attach to a standard OpenAI request body.

use serde::{Deserialize, Serialize};

/// Per-request cache control, mirroring the `Cache-Control`-style header
/// alternative the gateway also accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CacheDirective {
    /// `true` / `false`: participate normally, or skip the cache engine
    /// entirely (equivalent to `bypass`).
    Bool(bool),
    /// `"no-cache"` / `"no-store"`.
    Mode(CacheMode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheMode {
    /// Skip read but still write.
    NoCache,
    /// Read as usual but do not write.
    NoStore,
    /// Skip both read and write.
    Bypass,
}

impl Default for CacheDirective {
    fn default() -> Self {
        CacheDirective::Bool(true)
    }
}

impl CacheDirective {
    pub fn should_read(&self) -> bool {
        !matches!(
            self,
            CacheDirective::Bool(false)
                | CacheDirective::Mode(CacheMode::NoCache)
                | CacheDirective::Mode(CacheMode::Bypass)
        )
    }

    pub fn should_write(&self) -> bool {
        !matches!(
            self,
            CacheDirective::Bool(false)
                | CacheDirective::Mode(CacheMode::NoStore)
                | CacheDirective::Mode(CacheMode::Bypass)
        )
    }
}

/// Gateway metadata carried alongside a standard OpenAI request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestMetadata {
    #[serde(default)]
    pub tags: Vec<String>,
    /// Overrides the configured default cache TTL, in seconds.
    #[serde(default)]
    pub cache_ttl: Option<u64>,
    /// Replaces the computed fingerprint outright.
    #[serde(default)]
    pub cache_key: Option<String>,
    #[serde(default)]
    pub cache: Option<CacheDirective>,
    /// Explicit guardrail name list for this request; resolution still
    /// goes through the principal's inherit/override policy.
    #[serde(default)]
    pub guardrails: Vec<String>,
    #[serde(default)]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub generation_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_false_skips_both_read_and_write() {
        let d = CacheDirective::Bool(false);
        assert!(!d.should_read());
        assert!(!d.should_write());
    }

    #[test]
    fn no_cache_skips_read_but_writes() {
        let d = CacheDirective::Mode(CacheMode::NoCache);
        assert!(!d.should_read());
        assert!(d.should_write());
    }

    #[test]
    fn no_store_reads_but_skips_write() {
        let d = CacheDirective::Mode(CacheMode::NoStore);
        assert!(d.should_read());
        assert!(!d.should_write());
    }

    #[test]
    fn bypass_skips_both() {
        let d = CacheDirective::Mode(CacheMode::Bypass);
        assert!(!d.should_read());
        assert!(!d.should_write());
    }

    #[test]
    fn default_participates_normally() {
        let d = CacheDirective::default();
        assert!(d.should_read());
        assert!(d.should_write());
    }
}
