use std::sync::Arc;

use actix_web::web::Bytes;
use tokio::sync::mpsc::Sender;
use tokio_stream::StreamExt;

use crate::backend::{BackendEventStream, ModelBackend};
use crate::claude_request::{build_backend_payload, validate_chat_request};
use crate::claude_response::{parse_and_map_response, unix_timestamp};
use crate::claude_stream::StreamRechunker;
use crate::errors::ProxyError;
use crate::models::claude::BackendPayload;
use crate::models::request;
use crate::models::response_direct::ChatCompletion;

/// Request-handling context shared by all workers: the backend handle and
/// the mapping defaults. Holds no per-request state.
#[derive(Clone)]
pub struct ProxyService {
    backend: Arc<dyn ModelBackend>,
    default_max_tokens: u32,
}

/// A backend stream that has been opened but not yet drained.
pub struct PendingStream {
    pub status: u16,
    events: BackendEventStream,
    rechunker: StreamRechunker,
}

impl ProxyService {
    pub fn new(backend: Arc<dyn ModelBackend>, default_max_tokens: u32) -> Self {
        Self {
            backend,
            default_max_tokens,
        }
    }

    pub fn prepare_payload(
        &self,
        request: &request::ChatCompletionCreate,
    ) -> Result<BackendPayload, ProxyError> {
        validate_chat_request(request)?;
        let payload = build_backend_payload(request, self.default_max_tokens)?;
        log::debug!(
            "mapped request: model={}, messages={}, stream={}",
            payload.model,
            request.messages.len(),
            payload.stream
        );
        Ok(payload)
    }

    pub async fn create_completion(
        &self,
        request: request::ChatCompletionCreate,
    ) -> Result<(u16, ChatCompletion), ProxyError> {
        let payload = self.prepare_payload(&request)?;
        let reply = self.backend.invoke(&payload).await?;
        let completion = parse_and_map_response(&reply.body)?;
        Ok((reply.status, completion))
    }

    /// Starts the backend stream. Failures here still happen before any
    /// byte is sent to the client.
    pub async fn open_stream(
        &self,
        request: request::ChatCompletionCreate,
    ) -> Result<PendingStream, ProxyError> {
        let payload = self.prepare_payload(&request)?;
        let stream = self.backend.invoke_stream(&payload).await?;
        Ok(PendingStream {
            status: stream.status,
            events: stream.events,
            rechunker: StreamRechunker::new(unix_timestamp(), request.include_usage()),
        })
    }
}

impl PendingStream {
    /// Drains the backend stream, flushing each event's frames as soon as
    /// they are produced. A backend failure is forwarded to the client stream
    /// and aborts it; no `[DONE]` follows.
    pub async fn pump(
        mut self,
        sender: Sender<Result<Bytes, ProxyError>>,
    ) -> Result<(), ProxyError> {
        while let Some(event) = self.events.next().await {
            let frames = match event.and_then(|raw| self.rechunker.process_chunk(&raw)) {
                Ok(frames) => frames,
                Err(e) => {
                    let _ = sender.send(Err(e.clone())).await;
                    return Err(e);
                }
            };

            for frame in frames {
                if sender.send(Ok(frame)).await.is_err() {
                    log::debug!("client disconnected, dropping backend stream");
                    return Ok(());
                }
            }

            if self.rechunker.is_finished() {
                return Ok(());
            }
        }

        log::warn!("backend stream ended before message_stop");
        Ok(())
    }
}
