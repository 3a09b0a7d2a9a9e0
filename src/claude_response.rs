use std::time::{SystemTime, UNIX_EPOCH};

use crate::consts::CHAT_COMPLETION_OBJECT;
use crate::errors::ProxyError;
use crate::models::claude::MessagesResponse;
use crate::models::response_direct::{AssistantMessage, ChatCompletion, Choice};
use crate::models::{ContentFilterResults, Role, Usage};

pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or_default()
}

/// Translates a backend stop reason into the chat-completion vocabulary.
/// Unknown reasons pass through untouched.
pub fn map_stop_reason(stop_reason: &str) -> String {
    match stop_reason {
        "end_turn" | "stop_sequence" => "stop",
        "max_tokens" => "length",
        "tool_use" => "tool_calls",
        other => other,
    }
    .to_string()
}

pub fn map_response(response: MessagesResponse, created: i64) -> ChatCompletion {
    let finish_reason = response.stop_reason.as_deref().map(map_stop_reason);

    // Index stays 0 for every block; clients only ever read the first choice.
    let choices = response
        .content
        .into_iter()
        .filter_map(|block| block.text)
        .map(|text| Choice {
            index: 0,
            message: AssistantMessage {
                role: Role::Assistant,
                content: text,
            },
            finish_reason: finish_reason.clone(),
            content_filter_results: ContentFilterResults::all_clear(),
        })
        .collect();

    ChatCompletion {
        id: response.id.clone(),
        object: CHAT_COMPLETION_OBJECT.to_string(),
        created,
        model: response.model,
        choices,
        usage: Usage::new(response.usage.input_tokens, response.usage.output_tokens),
        system_fingerprint: response.id,
    }
}

pub fn parse_and_map_response(body: &[u8]) -> Result<ChatCompletion, ProxyError> {
    let response: MessagesResponse = serde_json::from_slice(body)?;
    Ok(map_response(response, unix_timestamp()))
}
