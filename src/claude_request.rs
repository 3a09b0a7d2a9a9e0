use crate::consts::ANTHROPIC_VERSION;
use crate::errors::ProxyError;
use crate::models::claude::{BackendPayload, ClaudeMessage, ClaudeRole, MessagesBody};
use crate::models::request;
use crate::models::request::MessageRole;

pub(crate) fn validate_chat_request(
    request: &request::ChatCompletionCreate,
) -> Result<(), ProxyError> {
    if request.messages.is_empty() {
        return Err(ProxyError::ValidationError(
            "error: empty messages".to_string(),
        ));
    }
    Ok(())
}

/// Reduces a chat history to the strictly alternating user/assistant sequence
/// the backend accepts, ending on a user turn.
///
/// The list is walked from the newest message backwards. A user turn is kept
/// when one is expected and it has text; an assistant turn is kept only when
/// the message right before it is a non-empty user turn. Everything else is
/// dropped. The last system message in original order becomes the system
/// prompt. The result may be empty.
pub fn normalize_messages(messages: &[request::Message]) -> (Vec<ClaudeMessage>, Option<String>) {
    let mut accepted: Vec<ClaudeMessage> = vec![];
    let mut system: Option<String> = None;
    let mut expected = ClaudeRole::User;

    for (position, message) in messages.iter().enumerate().rev() {
        match (message.role, expected) {
            (MessageRole::User, ClaudeRole::User) if message.has_text() => {
                accepted.push(ClaudeMessage::text(ClaudeRole::User, message.text()));
                expected = ClaudeRole::Assistant;
            }
            (MessageRole::Assistant, ClaudeRole::Assistant)
                if message.has_text() && preceded_by_user_turn(messages, position) =>
            {
                accepted.push(ClaudeMessage::text(ClaudeRole::Assistant, message.text()));
                expected = ClaudeRole::User;
            }
            (MessageRole::System, _) => {
                if system.is_none() {
                    system = Some(message.text());
                }
            }
            _ => {
                log::debug!("dropping {:?} message at position {}", message.role, position);
            }
        }
    }

    accepted.reverse();
    (accepted, system)
}

fn preceded_by_user_turn(messages: &[request::Message], position: usize) -> bool {
    position
        .checked_sub(1)
        .and_then(|previous| messages.get(previous))
        .is_some_and(|previous| previous.role == MessageRole::User && previous.has_text())
}

pub(crate) fn resolve_max_tokens(max_tokens: Option<u32>, default_max_tokens: u32) -> u32 {
    match max_tokens {
        Some(max_tokens) if max_tokens > 0 => max_tokens,
        _ => default_max_tokens,
    }
}

/// Unknown request keys travel beside the body, never inside it.
pub fn build_backend_payload(
    request: &request::ChatCompletionCreate,
    default_max_tokens: u32,
) -> Result<BackendPayload, ProxyError> {
    let (messages, system) = normalize_messages(&request.messages);

    let stop_sequences = request
        .stop
        .clone()
        .map(request::StopSequences::into_vec)
        .filter(|stops| !stops.is_empty());

    let body = MessagesBody {
        anthropic_version: ANTHROPIC_VERSION.to_string(),
        messages,
        system,
        max_tokens: resolve_max_tokens(request.max_tokens, default_max_tokens),
        stop_sequences,
        temperature: request.temperature,
    };

    Ok(BackendPayload {
        model: request.model.clone(),
        body: serde_json::to_string(&body)?,
        stream: request.is_stream(),
        passthrough: request.extra.clone(),
    })
}
