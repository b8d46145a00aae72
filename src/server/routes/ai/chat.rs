//! Chat completions endpoint

use crate::auth::AuthMethod;
use crate::core::cache::synthesize_stream_chunks;
use crate::core::models::RequestContext;
use crate::core::models::openai::ChatCompletionRequest;
use crate::core::principal::PrincipalContext;
use crate::core::streaming::types::Event;
use crate::server::routes::errors;
use crate::server::state::AppState;
use crate::utils::data::validation::RequestValidator;
use crate::utils::error::GatewayError;
use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::{error, info, warn};

use super::context::get_request_context;

/// Resolves the `Authorization: Bearer <api-key>` header into a
/// [`PrincipalContext`] via the (external) auth subsystem. Per the public
/// HTTP surface, the gateway's bearer token is always an API key, never a
/// session JWT — that distinction only applies to the admin/session routes.
async fn authenticate_bearer(
    state: &AppState,
    req: &HttpRequest,
    context: RequestContext,
) -> Result<PrincipalContext, GatewayError> {
    let token = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer ").or_else(|| v.strip_prefix("ApiKey ")))
        .ok_or_else(|| GatewayError::auth("missing Authorization: Bearer <api-key> header"))?;

    let result = state
        .auth
        .authenticate(AuthMethod::ApiKey(token.to_string()), context)
        .await?;

    PrincipalContext::from_auth_result(&result)
        .ok_or_else(|| GatewayError::auth(result.error.unwrap_or_else(|| "invalid API key".into())))
}

/// Chat completions endpoint
///
/// OpenAI-compatible chat completions API that supports streaming and non-streaming responses.
pub async fn chat_completions(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<ChatCompletionRequest>,
) -> ActixResult<HttpResponse> {
    info!("Chat completion request for model: {}", request.model);

    // Get request context from middleware
    let context = get_request_context(&req)?;

    // Validate request
    if let Err(e) = RequestValidator::validate_chat_completion_request(
        &request.model,
        &request.messages,
        request.max_tokens,
        request.temperature,
    ) {
        warn!("Invalid chat completion request: {}", e);
        return Ok(errors::validation_error(&e.to_string()));
    }

    // Check if streaming is requested
    if request.stream.unwrap_or(false) {
        // Handle streaming request
        handle_streaming_chat_completion(state.get_ref(), &req, request.into_inner(), context)
            .await
    } else if let Some(pipeline) = state.pipeline.clone() {
        // Full request execution pipeline: auth -> rate-limit -> budget ->
        // guardrails -> cache -> route -> failover -> spend accounting.
        let principal = match authenticate_bearer(&state, &req, context).await {
            Ok(principal) => principal,
            Err(e) => return Ok(errors::gateway_error_to_response(e)),
        };

        match pipeline
            .handle_chat_completion_with_cache_info(request.into_inner(), &principal)
            .await
        {
            Ok((response, cache_hit)) => Ok(HttpResponse::Ok()
                .insert_header(("x-cache-hit", if cache_hit { "true" } else { "false" }))
                .json(response)),
            Err(e) => {
                error!("Chat completion error: {}", e);
                Ok(errors::gateway_error_to_response(e))
            }
        }
    } else {
        // No deployments configured: the request execution pipeline has
        // nothing to route to.
        Ok(errors::gateway_error_to_response(
            GatewayError::service_unavailable(
                "no deployments configured for the request execution pipeline",
            ),
        ))
    }
}

/// Handle streaming chat completion
async fn handle_streaming_chat_completion(
    state: &AppState,
    req: &HttpRequest,
    request: ChatCompletionRequest,
    context: RequestContext,
) -> ActixResult<HttpResponse> {
    info!(
        "Handling streaming chat completion for model: {}",
        request.model
    );

    let Some(pipeline) = state.pipeline.clone() else {
        return Ok(errors::gateway_error_to_response(
            GatewayError::service_unavailable(
                "no deployments configured for the request execution pipeline",
            ),
        ));
    };

    let principal = match authenticate_bearer(state, req, context).await {
        Ok(principal) => principal,
        Err(e) => return Ok(errors::gateway_error_to_response(e)),
    };

    // Runs the same 11-stage pipeline as the non-streaming path (stage 5's
    // cache lookup, stage 6-7's route-and-execute, stage 8's post-call
    // guardrails, ...). Once the assembled response is in hand -- whether
    // it came from the cache or a live provider call -- it is split into
    // word-granular SSE chunks. Per §4.3, chunks are only ever produced
    // from a complete, successfully terminated response.
    let (response, cache_hit) = match pipeline
        .handle_chat_completion_with_cache_info(request, &principal)
        .await
    {
        Ok(pair) => pair,
        Err(e) => {
            error!("Streaming chat completion error: {}", e);
            return Ok(errors::gateway_error_to_response(e));
        }
    };

    let cached = crate::core::cache::CachedResponse { response };
    let chunks = synthesize_stream_chunks(&cached);

    let sse_stream = async_stream::stream! {
        for chunk in chunks {
            match serde_json::to_string(&chunk) {
                Ok(json) => {
                    let event = Event::default().data(&json);
                    yield Ok::<_, GatewayError>(event.to_bytes());
                }
                Err(e) => {
                    error!("Failed to serialize chunk: {}", e);
                }
            }
        }
        let done_event = Event::default().data("[DONE]");
        yield Ok::<_, GatewayError>(done_event.to_bytes());
    };

    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "text/event-stream"))
        .insert_header((CACHE_CONTROL, "no-cache"))
        .insert_header(("Connection", "keep-alive"))
        .insert_header(("x-cache-hit", if cache_hit { "true" } else { "false" }))
        .streaming(sse_stream))
}

