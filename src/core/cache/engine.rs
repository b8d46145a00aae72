//! Fingerprint-keyed response cache with streaming reconstruction.

use std::time::{Duration, Instant};

use moka::future::Cache;
use moka::Expiry;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::models::openai::{ChatCompletionRequest, ChatCompletionResponse};

use super::fingerprint::fingerprint;

/// What's actually stored per cache entry: the assembled response plus
/// enough bookkeeping to replay it as a stream on a hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedResponse {
    pub response: ChatCompletionResponse,
}

/// Endpoints whose output is deterministic enough to cache. Image
/// generation and anything non-deterministic never reach this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheableEndpoint {
    ChatCompletions,
    Completions,
    Embeddings,
}

/// The per-request resolution of cache key + read/write policy,
/// combining the fingerprint/override with the metadata/header controls.
pub struct CachePlan {
    pub key: String,
    pub should_read: bool,
    pub should_write: bool,
    pub ttl: Duration,
}

impl CachePlan {
    pub fn resolve(
        request: &ChatCompletionRequest,
        default_ttl: Duration,
    ) -> Self {
        let metadata = request.metadata.as_ref();
        let directive = metadata
            .and_then(|m| m.cache.clone())
            .unwrap_or_default();
        let key = metadata
            .and_then(|m| m.cache_key.clone())
            .unwrap_or_else(|| fingerprint(request));
        let ttl = metadata
            .and_then(|m| m.cache_ttl)
            .map(Duration::from_secs)
            .unwrap_or(default_ttl);

        Self {
            key,
            should_read: directive.should_read(),
            should_write: directive.should_write(),
            ttl,
        }
    }
}

/// Internal cache value: the response plus the per-entry TTL it was
/// written with, so expiry can vary by request (default or `cache_ttl`
/// override) rather than being a single cache-wide constant.
#[derive(Clone)]
struct Entry {
    value: CachedResponse,
    ttl: Duration,
}

/// Per-entry expiry policy: every entry expires `ttl` after creation,
/// where `ttl` was resolved per-request by `CachePlan::resolve`. Entries
/// are never refreshed on read or update.
struct TtlExpiry;

impl Expiry<String, Entry> for TtlExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// A single shared cache instance backing every cacheable endpoint.
/// Backed by `moka`'s async cache, which handles TTL eviction and
/// bounded size internally; `expire_after` is given the per-entry TTL
/// resolved by `CachePlan` rather than a single cache-wide duration.
pub struct CacheEngine {
    store: Cache<String, Entry>,
}

impl CacheEngine {
    pub fn new(max_capacity: u64) -> Self {
        Self {
            store: Cache::builder()
                .max_capacity(max_capacity)
                .expire_after(TtlExpiry)
                .build(),
        }
    }

    /// Stage 5: cache lookup. Degrades to a miss rather than failing the
    /// request if anything goes wrong; there is no fallible path through
    /// `moka`'s in-memory store, but a future remote backend would wrap
    /// errors here the same way. `moka` evicts expired entries lazily, so
    /// a `get` past its TTL already reports a miss without extra bookkeeping.
    pub async fn lookup(&self, plan: &CachePlan) -> Option<CachedResponse> {
        if !plan.should_read {
            return None;
        }
        let hit = self.store.get(&plan.key).await.map(|entry| entry.value);
        if hit.is_some() {
            debug!(key = %plan.key, "cache hit");
        }
        hit
    }

    /// Stage 9: cache write. Only called with a complete, successful
    /// response — the orchestrator never writes partial/streamed state.
    pub async fn store(&self, plan: &CachePlan, response: ChatCompletionResponse) {
        if !plan.should_write {
            return;
        }
        self.store
            .insert(
                plan.key.clone(),
                Entry {
                    value: CachedResponse { response },
                    ttl: plan.ttl,
                },
            )
            .await;
    }

    pub fn is_healthy(&self) -> bool {
        true
    }

    pub async fn invalidate(&self, key: &str) {
        self.store.invalidate(key).await;
    }

    pub fn entry_count(&self) -> u64 {
        self.store.entry_count()
    }

    /// Test-only hook to simulate TTL elapse without a real sleep.
    #[cfg(test)]
    pub(crate) async fn advance_clock_by(&self, duration: Duration) {
        self.store.advance_clock_by(duration);
        // moka's sync bookkeeping (eviction of expired entries) piggybacks
        // on subsequent `get`/`insert` calls; run a no-op pass so the
        // clock advance is reflected immediately for tests that only call
        // `lookup` afterwards.
        self.store.run_pending_tasks().await;
    }
}

/// Splits text into word-granular pieces that concatenate back to the
/// original string exactly (spaces stay attached to the word that
/// precedes them).
fn word_granular_pieces(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split_inclusive(' ').map(str::to_string).collect()
}

/// Synthesizes streaming chunk deltas from a cached, fully-assembled
/// response. Used on a cache hit for a `stream: true` request: the stored
/// text is split into word-granular pieces (one `delta.content` per
/// chunk) and the stream always terminates with a sentinel chunk carrying
/// the finish reason. Timing between chunks is not preserved.
pub fn synthesize_stream_chunks(cached: &CachedResponse) -> Vec<crate::core::models::openai::ChatCompletionChunk> {
    use crate::core::models::openai::{ChatChoiceDelta, ChatCompletionChunk, ChatMessageDelta};

    let response = &cached.response;
    let mut chunks = Vec::new();

    for choice in &response.choices {
        let text = match &choice.message.content {
            Some(crate::core::models::openai::MessageContent::Text(t)) => t.as_str(),
            _ => "",
        };
        let pieces = word_granular_pieces(text);
        let piece_count = pieces.len().max(1);

        for (i, piece) in (0..piece_count).map(|i| (i, pieces.get(i))) {
            chunks.push(ChatCompletionChunk {
                id: response.id.clone(),
                object: "chat.completion.chunk".to_string(),
                created: response.created,
                model: response.model.clone(),
                system_fingerprint: response.system_fingerprint.clone(),
                choices: vec![ChatChoiceDelta {
                    index: choice.index,
                    delta: ChatMessageDelta {
                        role: if i == 0 {
                            Some(choice.message.role.clone())
                        } else {
                            None
                        },
                        content: piece.cloned(),
                        function_call: None,
                        tool_calls: None,
                        audio: None,
                    },
                    logprobs: None,
                    finish_reason: None,
                }],
                usage: None,
            });
        }
    }

    chunks.push(terminal_chunk(response));
    chunks
}

fn terminal_chunk(response: &ChatCompletionResponse) -> crate::core::models::openai::ChatCompletionChunk {
    use crate::core::models::openai::{ChatChoiceDelta, ChatCompletionChunk, ChatMessageDelta};

    ChatCompletionChunk {
        id: response.id.clone(),
        object: "chat.completion.chunk".to_string(),
        created: response.created,
        model: response.model.clone(),
        system_fingerprint: response.system_fingerprint.clone(),
        choices: response
            .choices
            .iter()
            .map(|choice| ChatChoiceDelta {
                index: choice.index,
                delta: ChatMessageDelta {
                    role: None,
                    content: None,
                    function_call: None,
                    tool_calls: None,
                    audio: None,
                },
                logprobs: None,
                finish_reason: Some(
                    choice
                        .finish_reason
                        .clone()
                        .unwrap_or_else(|| "stop".to_string()),
                ),
            })
            .collect(),
        usage: response.usage.clone(),
    }
}
