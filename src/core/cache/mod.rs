//! Fingerprint-based response cache for the gateway's request execution
//! plane.

pub mod engine;
pub mod fingerprint;

#[cfg(test)]
mod tests;

pub use engine::{CacheEngine, CachePlan, CacheableEndpoint, CachedResponse, synthesize_stream_chunks};
pub use fingerprint::fingerprint as compute_fingerprint;
