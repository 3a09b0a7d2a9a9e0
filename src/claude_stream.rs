use actix_web::web::Bytes;

use crate::claude_response::map_stop_reason;
use crate::consts::{CHAT_COMPLETION_CHUNK_OBJECT, SSE_DONE};
use crate::errors::ProxyError;
use crate::models::claude::StreamEvent;
use crate::models::response_stream::{
    ChatCompletionChunk, ChunkChoice, ChunkChoiceDelta, PromptFilterResult,
};
use crate::models::{ContentFilterResults, Role, Usage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Init,
    Streaming,
    Done,
}

/// Per-request translator from backend stream events to chat-completion
/// chunks. Each call returns the SSE frames to flush for that one event.
#[derive(Debug)]
pub struct StreamRechunker {
    state: StreamState,
    id: String,
    model: String,
    created: i64,
    finish_reason: Option<String>,
    include_usage: bool,
    prompt_tokens: u32,
    completion_tokens: u32,
}

pub(crate) fn sse_frame<T: serde::Serialize>(payload: &T) -> Result<Bytes, ProxyError> {
    Ok(Bytes::from(format!(
        "data: {}\n\n",
        serde_json::to_string(payload)?
    )))
}

impl StreamRechunker {
    pub fn new(created: i64, include_usage: bool) -> Self {
        Self {
            state: StreamState::Init,
            id: String::new(),
            model: String::new(),
            created,
            finish_reason: None,
            include_usage,
            prompt_tokens: 0,
            completion_tokens: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state == StreamState::Done
    }

    /// Decodes one raw backend event chunk and processes it.
    pub fn process_chunk(&mut self, raw: &[u8]) -> Result<Vec<Bytes>, ProxyError> {
        let event: StreamEvent = serde_json::from_slice(raw)?;
        self.process_event(event)
    }

    pub fn process_event(&mut self, event: StreamEvent) -> Result<Vec<Bytes>, ProxyError> {
        match (self.state, event) {
            (StreamState::Init, StreamEvent::MessageStart { message }) => {
                self.id = message.id;
                self.model = message.model;
                if let Some(usage) = message.usage {
                    self.prompt_tokens = usage.input_tokens;
                }
                self.state = StreamState::Streaming;

                Ok(vec![
                    sse_frame(&Self::prompt_filter_scaffold())?,
                    sse_frame(&self.chunk(
                        ChunkChoiceDelta {
                            role: Some(Role::Assistant),
                            content: None,
                        },
                        None,
                        ContentFilterResults::empty(),
                    ))?,
                ])
            }
            (StreamState::Streaming, StreamEvent::ContentBlockDelta { delta, .. }) => {
                let Some(text) = delta.text else {
                    return Ok(vec![]);
                };
                Ok(vec![sse_frame(&self.chunk(
                    ChunkChoiceDelta {
                        role: None,
                        content: Some(text),
                    },
                    None,
                    ContentFilterResults::all_clear(),
                ))?])
            }
            (StreamState::Streaming, StreamEvent::MessageDelta { delta, usage }) => {
                self.finish_reason = delta.stop_reason.as_deref().map(map_stop_reason);
                if let Some(usage) = usage {
                    self.completion_tokens = usage.output_tokens;
                }
                Ok(vec![])
            }
            (StreamState::Streaming, StreamEvent::MessageStop) => {
                let mut last = self.chunk(
                    ChunkChoiceDelta::default(),
                    self.finish_reason.clone(),
                    ContentFilterResults::empty(),
                );
                if self.include_usage {
                    last.usage = Some(Usage::new(self.prompt_tokens, self.completion_tokens));
                }
                self.state = StreamState::Done;

                Ok(vec![sse_frame(&last)?, Bytes::from_static(SSE_DONE.as_bytes())])
            }
            (state, event) => {
                log::debug!("ignoring stream event in state {:?}: {:?}", state, event);
                Ok(vec![])
            }
        }
    }

    fn chunk(
        &self,
        delta: ChunkChoiceDelta,
        finish_reason: Option<String>,
        content_filter_results: ContentFilterResults,
    ) -> ChatCompletionChunk {
        ChatCompletionChunk {
            id: self.id.clone(),
            object: CHAT_COMPLETION_CHUNK_OBJECT.to_string(),
            created: self.created,
            model: self.model.clone(),
            prompt_filter_results: None,
            choices: vec![ChunkChoice {
                index: 0,
                delta,
                finish_reason,
                content_filter_results,
            }],
            system_fingerprint: Some(self.id.clone()),
            usage: None,
        }
    }

    /// Leading frame some clients expect before any choice arrives.
    fn prompt_filter_scaffold() -> ChatCompletionChunk {
        ChatCompletionChunk {
            id: String::new(),
            object: String::new(),
            created: 0,
            model: String::new(),
            prompt_filter_results: Some(vec![PromptFilterResult {
                prompt_index: 0,
                content_filter_results: ContentFilterResults::all_clear(),
            }]),
            choices: vec![],
            system_fingerprint: None,
            usage: None,
        }
    }
}
