use std::time::Duration;

use crate::core::models::openai::{ChatCompletionRequest, ChatCompletionResponse, ChatChoice, ChatMessage, MessageContent, MessageRole, Usage};
use crate::core::pipeline::metadata::{CacheDirective, CacheMode, RequestMetadata};

use super::engine::{CacheEngine, CachePlan};

fn sample_request() -> ChatCompletionRequest {
    let mut req = ChatCompletionRequest::default();
    req.model = "gpt-4o".to_string();
    req.messages = vec![ChatMessage {
        role: MessageRole::User,
        content: Some(MessageContent::Text("hi".to_string())),
        name: None,
        function_call: None,
        tool_calls: None,
        tool_call_id: None,
        audio: None,
    }];
    req
}

fn sample_response() -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "chatcmpl-1".to_string(),
        object: "chat.completion".to_string(),
        created: 0,
        model: "gpt-4o".to_string(),
        system_fingerprint: None,
        choices: vec![ChatChoice {
            index: 0,
            message: ChatMessage {
                role: MessageRole::Assistant,
                content: Some(MessageContent::Text("hello there".to_string())),
                name: None,
                function_call: None,
                tool_calls: None,
                tool_call_id: None,
                audio: None,
            },
            logprobs: None,
            finish_reason: Some("stop".to_string()),
        }],
        usage: Some(Usage {
            prompt_tokens: 5,
            completion_tokens: 3,
            total_tokens: 8,
            prompt_tokens_details: None,
            completion_tokens_details: None,
        }),
    }
}

#[tokio::test]
async fn lookup_misses_before_any_write() {
    let engine = CacheEngine::new(100);
    let plan = CachePlan::resolve(&sample_request(), Duration::from_secs(60));
    assert!(engine.lookup(&plan).await.is_none());
}

#[tokio::test]
async fn write_then_lookup_hits_on_the_same_fingerprint() {
    let engine = CacheEngine::new(100);
    let request = sample_request();
    let plan = CachePlan::resolve(&request, Duration::from_secs(60));

    engine.store(&plan, sample_response()).await;

    let second_plan = CachePlan::resolve(&sample_request(), Duration::from_secs(60));
    assert_eq!(plan.key, second_plan.key);

    let hit = engine.lookup(&second_plan).await;
    assert!(hit.is_some());
}

#[tokio::test]
async fn no_store_reads_existing_entries_but_skips_writing_new_ones() {
    let engine = CacheEngine::new(100);
    let mut request = sample_request();
    request.metadata = Some(RequestMetadata {
        cache: Some(CacheDirective::Mode(CacheMode::NoStore)),
        ..Default::default()
    });

    let plan = CachePlan::resolve(&request, Duration::from_secs(60));
    assert!(plan.should_read);
    assert!(!plan.should_write);

    engine.store(&plan, sample_response()).await;
    assert!(engine.lookup(&plan).await.is_none());
}

#[tokio::test]
async fn bypass_skips_read_and_write_entirely() {
    let engine = CacheEngine::new(100);
    let mut request = sample_request();
    request.metadata = Some(RequestMetadata {
        cache: Some(CacheDirective::Mode(CacheMode::Bypass)),
        ..Default::default()
    });
    let plan = CachePlan::resolve(&request, Duration::from_secs(60));

    engine.store(&plan, sample_response()).await;
    assert!(engine.lookup(&plan).await.is_none());
}

#[tokio::test]
async fn entry_expires_after_its_resolved_ttl() {
    let engine = CacheEngine::new(100);
    let request = sample_request();
    let plan = CachePlan::resolve(&request, Duration::from_secs(60));

    engine.store(&plan, sample_response()).await;
    assert!(engine.lookup(&plan).await.is_some());

    engine.advance_clock_by(Duration::from_secs(61)).await;
    assert!(engine.lookup(&plan).await.is_none());
}

#[tokio::test]
async fn per_request_cache_ttl_override_is_honored() {
    let engine = CacheEngine::new(100);
    let mut request = sample_request();
    request.metadata = Some(RequestMetadata {
        cache_ttl: Some(5),
        ..Default::default()
    });

    let plan = CachePlan::resolve(&request, Duration::from_secs(600));
    assert_eq!(plan.ttl, Duration::from_secs(5));

    engine.store(&plan, sample_response()).await;
    assert!(engine.lookup(&plan).await.is_some());

    engine.advance_clock_by(Duration::from_secs(6)).await;
    assert!(engine.lookup(&plan).await.is_none());
}

#[tokio::test]
async fn explicit_cache_key_overrides_the_computed_fingerprint() {
    let mut request = sample_request();
    request.metadata = Some(RequestMetadata {
        cache_key: Some("pinned-key".to_string()),
        ..Default::default()
    });

    let plan = CachePlan::resolve(&request, Duration::from_secs(60));
    assert_eq!(plan.key, "pinned-key");
}

#[test]
fn synthesized_stream_ends_with_terminal_finish_reason() {
    let cached = super::engine::CachedResponse {
        response: sample_response(),
    };
    let chunks = super::synthesize_stream_chunks(&cached);
    // "hello there" -> ["hello ", "there"] plus one terminal chunk.
    assert_eq!(chunks.len(), 3);
    assert!(chunks[0].choices[0].finish_reason.is_none());
    assert!(chunks[1].choices[0].finish_reason.is_none());
    assert_eq!(
        chunks[2].choices[0].finish_reason.as_deref(),
        Some("stop")
    );
}

#[test]
fn synthesized_stream_content_reconstructs_the_original_message() {
    let cached = super::engine::CachedResponse {
        response: sample_response(),
    };
    let chunks = super::synthesize_stream_chunks(&cached);

    let reconstructed: String = chunks
        .iter()
        .flat_map(|c| c.choices.iter())
        .filter_map(|c| c.delta.content.clone())
        .collect();

    assert_eq!(reconstructed, "hello there");
}

#[test]
fn synthesized_stream_sets_role_only_on_first_chunk() {
    let cached = super::engine::CachedResponse {
        response: sample_response(),
    };
    let chunks = super::synthesize_stream_chunks(&cached);
    assert!(chunks[0].choices[0].delta.role.is_some());
    assert!(chunks[1].choices[0].delta.role.is_none());
}
