//! Conversions between the OpenAI-wire-shaped gateway models
//! ([`crate::core::models::openai`]) and the SDK's internal chat types
//! ([`crate::core::types`]) that [`crate::core::providers::Provider`]
//! actually speaks.
//!
//! Scalar fields and message structure are mapped directly; `tools`,
//! `tool_choice`, `response_format`, and `logit_bias` are JSON-wire
//! compatible between the two families, so those go through a
//! `serde_json` round trip rather than a hand-maintained field mirror.

use std::collections::HashMap;

use crate::core::models::openai as gw;
use crate::core::types::chat::ChatRequest;
use crate::core::types::message::{MessageContent as CoreMessageContent, MessageRole as CoreMessageRole};
use crate::core::types::requests::ChatMessage as CoreChatMessage;
use crate::core::types::responses::{ChatChoice as CoreChatChoice, ChatResponse, FinishReason, Usage as CoreUsage};
use crate::utils::error::{GatewayError, Result};

fn role_to_core(role: &gw::MessageRole) -> CoreMessageRole {
    match role {
        gw::MessageRole::System => CoreMessageRole::System,
        gw::MessageRole::User => CoreMessageRole::User,
        gw::MessageRole::Assistant => CoreMessageRole::Assistant,
        gw::MessageRole::Function => CoreMessageRole::Function,
        gw::MessageRole::Tool => CoreMessageRole::Tool,
    }
}

fn role_from_core(role: &CoreMessageRole) -> gw::MessageRole {
    match role {
        CoreMessageRole::System => gw::MessageRole::System,
        CoreMessageRole::User => gw::MessageRole::User,
        CoreMessageRole::Assistant => gw::MessageRole::Assistant,
        CoreMessageRole::Function => gw::MessageRole::Function,
        CoreMessageRole::Tool => gw::MessageRole::Tool,
    }
}

fn content_part_to_core(part: &gw::ContentPart) -> crate::core::types::content::ContentPart {
    use crate::core::types::content::ContentPart as CoreContentPart;
    match part {
        gw::ContentPart::Text { text } => CoreContentPart::Text { text: text.clone() },
        gw::ContentPart::ImageUrl { image_url } => CoreContentPart::ImageUrl {
            image_url: crate::core::types::content::ImageUrl {
                url: image_url.url.clone(),
                detail: image_url.detail.clone(),
            },
        },
        gw::ContentPart::Audio { .. } => CoreContentPart::Text {
            text: String::new(),
        },
    }
}

fn content_to_core(content: &gw::MessageContent) -> CoreMessageContent {
    match content {
        gw::MessageContent::Text(text) => CoreMessageContent::Text(text.clone()),
        gw::MessageContent::Parts(parts) => {
            CoreMessageContent::Parts(parts.iter().map(content_part_to_core).collect())
        }
    }
}

fn content_from_core(content: &CoreMessageContent) -> gw::MessageContent {
    match content {
        CoreMessageContent::Text(text) => gw::MessageContent::Text(text.clone()),
        CoreMessageContent::Parts(parts) => {
            use crate::core::types::content::ContentPart as CoreContentPart;
            let mapped = parts
                .iter()
                .map(|p| match p {
                    CoreContentPart::Text { text } => gw::ContentPart::Text { text: text.clone() },
                    CoreContentPart::ImageUrl { image_url } => gw::ContentPart::ImageUrl {
                        image_url: gw::ImageUrl {
                            url: image_url.url.clone(),
                            detail: image_url.detail.clone(),
                        },
                    },
                    _ => gw::ContentPart::Text {
                        text: String::new(),
                    },
                })
                .collect();
            gw::MessageContent::Parts(mapped)
        }
    }
}

fn message_to_core(message: &gw::ChatMessage) -> CoreChatMessage {
    CoreChatMessage {
        role: role_to_core(&message.role),
        content: message.content.as_ref().map(content_to_core),
        name: message.name.clone(),
        tool_calls: message.tool_calls.as_ref().map(|calls| {
            calls
                .iter()
                .map(|c| crate::core::types::tools::ToolCall {
                    id: c.id.clone(),
                    tool_type: c.tool_type.clone(),
                    function: crate::core::types::tools::FunctionCall {
                        name: c.function.name.clone(),
                        arguments: c.function.arguments.clone(),
                    },
                })
                .collect()
        }),
        tool_call_id: message.tool_call_id.clone(),
        function_call: message.function_call.as_ref().map(|f| {
            crate::core::types::tools::FunctionCall {
                name: f.name.clone(),
                arguments: f.arguments.clone(),
            }
        }),
    }
}

fn message_from_core(message: &CoreChatMessage) -> gw::ChatMessage {
    gw::ChatMessage {
        role: role_from_core(&message.role),
        content: message.content.as_ref().map(content_from_core),
        name: message.name.clone(),
        function_call: message.function_call.as_ref().map(|f| gw::FunctionCall {
            name: f.name.clone(),
            arguments: f.arguments.clone(),
        }),
        tool_calls: message.tool_calls.as_ref().map(|calls| {
            calls
                .iter()
                .map(|c| gw::ToolCall {
                    id: c.id.clone(),
                    tool_type: c.tool_type.clone(),
                    function: gw::FunctionCall {
                        name: c.function.name.clone(),
                        arguments: c.function.arguments.clone(),
                    },
                })
                .collect()
        }),
        tool_call_id: message.tool_call_id.clone(),
        audio: None,
    }
}

/// Round-trips a JSON-wire-compatible value from one serde type to
/// another. Used for the handful of fields whose shapes are identical
/// on the wire but live in two parallel Rust type families.
fn rewire<S: serde::Serialize, D: serde::de::DeserializeOwned>(value: &S) -> Result<D> {
    let json = serde_json::to_value(value)
        .map_err(|e| GatewayError::internal(format!("conversion serialize failed: {e}")))?;
    serde_json::from_value(json)
        .map_err(|e| GatewayError::internal(format!("conversion deserialize failed: {e}")))
}

/// Converts a gateway-facing chat completion request into the shape the
/// provider dispatch layer consumes.
pub fn to_chat_request(request: &gw::ChatCompletionRequest) -> Result<ChatRequest> {
    let tools = request
        .tools
        .as_ref()
        .map(rewire::<Vec<gw::Tool>, Vec<crate::core::types::tools::Tool>>)
        .transpose()?;
    let tool_choice = request
        .tool_choice
        .as_ref()
        .map(rewire::<gw::ToolChoice, crate::core::types::tools::ToolChoice>)
        .transpose()?;
    let response_format = request
        .response_format
        .as_ref()
        .map(rewire::<gw::ResponseFormat, crate::core::types::requests::ResponseFormat>)
        .transpose()?;
    let logit_bias: Option<HashMap<String, f32>> = request.logit_bias.clone();

    Ok(ChatRequest {
        model: request.model.clone(),
        messages: request.messages.iter().map(message_to_core).collect(),
        temperature: request.temperature,
        max_tokens: request.max_tokens,
        max_completion_tokens: request.max_completion_tokens,
        top_p: request.top_p,
        frequency_penalty: request.frequency_penalty,
        presence_penalty: request.presence_penalty,
        stop: request.stop.clone(),
        stream: request.stream.unwrap_or(false),
        tools,
        tool_choice,
        parallel_tool_calls: request.parallel_tool_calls,
        response_format,
        user: request.user.clone(),
        seed: request.seed.map(|s| s as i32),
        n: request.n,
        logit_bias,
        functions: None,
        function_call: None,
        logprobs: request.logprobs,
        top_logprobs: request.top_logprobs,
        extra_params: HashMap::new(),
    })
}

fn finish_reason_from_core(reason: &FinishReason) -> String {
    match reason {
        FinishReason::Stop => "stop",
        FinishReason::Length => "length",
        FinishReason::ToolCalls => "tool_calls",
        FinishReason::ContentFilter => "content_filter",
        FinishReason::FunctionCall => "function_call",
    }
    .to_string()
}

fn usage_from_core(usage: &CoreUsage) -> gw::Usage {
    gw::Usage {
        prompt_tokens: usage.prompt_tokens,
        completion_tokens: usage.completion_tokens,
        total_tokens: usage.total_tokens,
        prompt_tokens_details: None,
        completion_tokens_details: None,
    }
}

/// Converts a provider response back into the gateway-facing shape the
/// HTTP layer returns to clients.
pub fn from_chat_response(response: ChatResponse) -> gw::ChatCompletionResponse {
    gw::ChatCompletionResponse {
        id: response.id,
        object: response.object,
        created: response.created.max(0) as u64,
        model: response.model,
        system_fingerprint: response.system_fingerprint,
        choices: response
            .choices
            .iter()
            .map(|choice: &CoreChatChoice| gw::ChatChoice {
                index: choice.index,
                message: message_from_core(&choice.message),
                logprobs: None,
                finish_reason: choice.finish_reason.as_ref().map(finish_reason_from_core),
            })
            .collect(),
        usage: response.usage.as_ref().map(usage_from_core),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::openai::{ChatMessage, MessageContent, MessageRole};

    #[test]
    fn round_trips_model_and_single_user_message() {
        let mut request = gw::ChatCompletionRequest::default();
        request.model = "gpt-4o".to_string();
        request.messages = vec![ChatMessage {
            role: MessageRole::User,
            content: Some(MessageContent::Text("hi".to_string())),
            name: None,
            function_call: None,
            tool_calls: None,
            tool_call_id: None,
            audio: None,
        }];

        let core = to_chat_request(&request).unwrap();
        assert_eq!(core.model, "gpt-4o");
        assert_eq!(core.messages.len(), 1);
        assert_eq!(core.messages[0].role, CoreMessageRole::User);
    }
}
