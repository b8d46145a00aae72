//! Performance benchmarks for the request execution plane.
//!
//! Covers the hot paths the pipeline orchestrator drives on every
//! request: fingerprinting, cache lookups, deployment selection, and
//! cost calculation.

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tokio::runtime::Runtime;

use litellm_rs::core::cache::engine::{CacheEngine, CachePlan};
use litellm_rs::core::cache::fingerprint::fingerprint;
use litellm_rs::core::cost::calculator::generic_cost_per_token;
use litellm_rs::core::cost::types::UsageTokens;
use litellm_rs::core::models::openai::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, MessageContent,
    MessageRole, Usage,
};
use litellm_rs::core::providers::Provider;
use litellm_rs::core::providers::openai::OpenAIProvider;
use litellm_rs::core::router::{Deployment, DeploymentConfig, Router, RouterConfig};

fn sample_request(model: &str) -> ChatCompletionRequest {
    let mut req = ChatCompletionRequest::default();
    req.model = model.to_string();
    req.messages = vec![ChatMessage {
        role: MessageRole::User,
        content: Some(MessageContent::Text(
            "What is the weather like in San Francisco today?".to_string(),
        )),
        name: None,
        function_call: None,
        tool_calls: None,
        tool_call_id: None,
        audio: None,
    }];
    req
}

fn sample_response(model: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "chatcmpl-bench".to_string(),
        object: "chat.completion".to_string(),
        created: 0,
        model: model.to_string(),
        system_fingerprint: None,
        choices: vec![ChatChoice {
            index: 0,
            message: ChatMessage {
                role: MessageRole::Assistant,
                content: Some(MessageContent::Text(
                    "It's sunny and 68 degrees in San Francisco.".to_string(),
                )),
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
            prompt_tokens: 12,
            completion_tokens: 9,
            total_tokens: 21,
            prompt_tokens_details: None,
            completion_tokens_details: None,
        }),
    }
}

/// Fingerprint computation: canonical JSON + SHA-256 over the request.
fn bench_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("fingerprint");
    let request = sample_request("gpt-4o");

    group.bench_function("compute", |b| {
        b.iter(|| black_box(fingerprint(black_box(&request))));
    });

    group.finish();
}

/// Cache engine lookup/store round trip under different pool sizes.
fn bench_cache_engine(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("cache_engine");

    for capacity in [100u64, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("lookup_miss", capacity),
            &capacity,
            |b, &capacity| {
                let engine = CacheEngine::new(capacity);
                let request = sample_request("gpt-4o");
                let plan = CachePlan::resolve(&request, Duration::from_secs(3600));

                b.iter(|| rt.block_on(async { black_box(engine.lookup(&plan).await) }));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("store_then_lookup_hit", capacity),
            &capacity,
            |b, &capacity| {
                let engine = CacheEngine::new(capacity);
                let request = sample_request("gpt-4o");
                let plan = CachePlan::resolve(&request, Duration::from_secs(3600));

                rt.block_on(async { engine.store(&plan, sample_response("gpt-4o")).await });

                b.iter(|| rt.block_on(async { black_box(engine.lookup(&plan).await) }));
            },
        );
    }

    group.finish();
}

fn create_test_provider(rt: &Runtime) -> Provider {
    rt.block_on(async {
        let openai = OpenAIProvider::with_api_key("sk-test-key-for-benchmarking")
            .await
            .expect("failed to build provider for benchmark");
        Provider::OpenAI(openai)
    })
}

fn populate_router(rt: &Runtime, num_deployments: usize, model_name: &str) -> Router {
    let router = Router::new(RouterConfig::default());
    let provider = create_test_provider(rt);

    for i in 0..num_deployments {
        let deployment = Deployment::new(
            format!("deployment-{i}"),
            provider.clone(),
            format!("{model_name}-backing-{i}"),
            model_name.to_string(),
        )
        .with_config(DeploymentConfig {
            tpm_limit: Some(100_000),
            rpm_limit: Some(1_000),
            priority: (i % 3) as u32,
            weight: 1,
            ..Default::default()
        })
        .with_tags(vec![format!("tag-{}", i % 3)]);
        router.add_deployment(deployment);
    }

    router
}

/// Deployment selection across priority buckets and pool sizes.
fn bench_router_selection(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("router_selection");

    for num_deployments in [1usize, 5, 10, 50, 100] {
        group.bench_with_input(
            BenchmarkId::new("select_deployment", num_deployments),
            &num_deployments,
            |b, &num| {
                let router = populate_router(&rt, num, "gpt-4");

                b.iter(|| black_box(router.select_deployment("gpt-4")));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("get_healthy_deployments", num_deployments),
            &num_deployments,
            |b, &num| {
                let router = populate_router(&rt, num, "gpt-4");

                b.iter(|| black_box(router.get_healthy_deployments("gpt-4")));
            },
        );
    }

    group.bench_function("alias_resolution", |b| {
        let router = populate_router(&rt, 5, "gpt-4");
        router.add_model_alias("gpt4", "gpt-4");

        b.iter(|| black_box(router.resolve_model_name("gpt4")));
    });

    group.bench_function("record_success", |b| {
        let router = populate_router(&rt, 1, "gpt-4");

        b.iter(|| {
            router.record_success("deployment-0", 100, 50_000);
            black_box(())
        });
    });

    group.bench_function("record_failure", |b| {
        let router = populate_router(&rt, 1, "gpt-4");

        b.iter(|| {
            router.record_failure("deployment-0");
            black_box(())
        });
    });

    group.finish();
}

/// Concurrent selection under contention, exercising the lock-free
/// deployment map.
fn bench_concurrent_selection(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("concurrent_router_selection");

    for num_tasks in [10usize, 50, 100] {
        group.bench_with_input(
            BenchmarkId::new("concurrent_select", num_tasks),
            &num_tasks,
            |b, &num_tasks| {
                let router = std::sync::Arc::new(populate_router(&rt, 10, "gpt-4"));

                b.iter(|| {
                    let router = router.clone();
                    rt.block_on(async move {
                        let mut handles = Vec::with_capacity(num_tasks);
                        for _ in 0..num_tasks {
                            let router = router.clone();
                            handles.push(tokio::spawn(async move {
                                let _ = router.select_deployment("gpt-4");
                            }));
                        }
                        for handle in handles {
                            let _ = handle.await;
                        }
                        black_box(())
                    })
                });
            },
        );
    }

    group.finish();
}

/// Cost calculation for a completed request.
fn bench_cost_calculation(c: &mut Criterion) {
    let mut group = c.benchmark_group("cost_calculation");

    group.bench_function("generic_cost_per_token", |b| {
        let usage = UsageTokens::new(1_200, 340);

        b.iter(|| black_box(generic_cost_per_token(black_box("gpt-4o"), &usage, "openai")));
    });

    group.finish();
}

/// Request serialization/deserialization on the HTTP boundary.
fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");
    let request = sample_request("gpt-4");

    group.bench_function("serialize_request", |b| {
        b.iter(|| black_box(serde_json::to_string(&request).unwrap()));
    });

    let json_str = serde_json::to_string(&request).unwrap();
    group.bench_function("deserialize_request", |b| {
        b.iter(|| black_box(serde_json::from_str::<ChatCompletionRequest>(&json_str).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_fingerprint,
    bench_cache_engine,
    bench_router_selection,
    bench_concurrent_selection,
    bench_cost_calculation,
    bench_serialization,
);
criterion_main!(benches);
