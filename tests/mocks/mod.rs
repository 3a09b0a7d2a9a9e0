use std::sync::{Arc, Mutex};

use actix_web::web::Bytes;
use async_trait::async_trait;
use serde_json::Value;

use bedrock_chat_proxy::backend::{BackendReply, BackendStream, ModelBackend};
use bedrock_chat_proxy::errors::ProxyError;
use bedrock_chat_proxy::models::claude::BackendPayload;

/// Backend double returning canned replies and recording every payload.
pub struct MockBackend {
    status: u16,
    reply: Result<Bytes, ProxyError>,
    events: Vec<Result<Bytes, ProxyError>>,
    calls: Arc<Mutex<Vec<BackendPayload>>>,
}

impl MockBackend {
    fn new(reply: Result<Bytes, ProxyError>, events: Vec<Result<Bytes, ProxyError>>) -> Self {
        Self {
            status: 200,
            reply,
            events,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_reply(body: &Value) -> Self {
        Self::new(Ok(Bytes::from(serde_json::to_vec(body).unwrap())), vec![])
    }

    pub fn with_raw_reply(body: &'static str) -> Self {
        Self::new(Ok(Bytes::from_static(body.as_bytes())), vec![])
    }

    pub fn with_events(events: &[Value]) -> Self {
        let events = events
            .iter()
            .map(|event| Ok(Bytes::from(serde_json::to_vec(event).unwrap())))
            .collect();
        Self::new(Err(ProxyError::upstream(None, "not a unary mock")), events)
    }

    /// Yields `events`, then fails the stream with `error`.
    pub fn with_broken_stream(events: &[Value], error: ProxyError) -> Self {
        let mut mock = Self::with_events(events);
        mock.events.push(Err(error));
        mock
    }

    pub fn failing(error: ProxyError) -> Self {
        Self::new(Err(error), vec![])
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn get_calls(&self) -> Vec<BackendPayload> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelBackend for MockBackend {
    async fn invoke(&self, payload: &BackendPayload) -> Result<BackendReply, ProxyError> {
        self.calls.lock().unwrap().push(payload.clone());

        let body = self.reply.clone()?;
        Ok(BackendReply {
            status: self.status,
            body,
        })
    }

    async fn invoke_stream(&self, payload: &BackendPayload) -> Result<BackendStream, ProxyError> {
        self.calls.lock().unwrap().push(payload.clone());

        if self.events.is_empty() {
            self.reply.clone()?;
        }
        Ok(BackendStream {
            status: self.status,
            events: Box::pin(tokio_stream::iter(self.events.clone())),
        })
    }
}
