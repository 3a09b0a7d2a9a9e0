use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};

use actix_web::web::Bytes;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::retry::RetryConfig;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::config::http::HttpResponse;
use aws_sdk_bedrockruntime::config::interceptors::BeforeDeserializationInterceptorContextRef;
use aws_sdk_bedrockruntime::config::{ConfigBag, Credentials, Intercept, Region, RuntimeComponents};
use aws_sdk_bedrockruntime::error::{BoxError, DisplayErrorContext, SdkError};
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::types::{ResponseStream, Trace};
use futures_core::Stream;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::errors::ProxyError;
use crate::models::claude::BackendPayload;

const JSON_CONTENT_TYPE: &str = "application/json";

pub type BackendEventStream = Pin<Box<dyn Stream<Item = Result<Bytes, ProxyError>> + Send>>;

#[derive(Debug, Clone, PartialEq)]
pub struct BackendReply {
    pub status: u16,
    pub body: Bytes,
}

/// A started streaming invocation; `events` yields the raw JSON of each
/// backend event in arrival order.
pub struct BackendStream {
    pub status: u16,
    pub events: BackendEventStream,
}

#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn invoke(&self, payload: &BackendPayload) -> Result<BackendReply, ProxyError>;

    async fn invoke_stream(&self, payload: &BackendPayload) -> Result<BackendStream, ProxyError>;
}

/// Invocation options Bedrock understands, lifted from passthrough keys.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct InvokeOptions {
    pub(crate) guardrail_identifier: Option<String>,
    pub(crate) guardrail_version: Option<String>,
    pub(crate) trace: Option<Trace>,
}

impl InvokeOptions {
    pub(crate) fn from_passthrough(passthrough: &Map<String, Value>) -> Self {
        let mut options = InvokeOptions::default();
        for (key, value) in passthrough {
            match (key.as_str(), value.as_str()) {
                ("guardrail_identifier", Some(value)) => {
                    options.guardrail_identifier = Some(value.to_string())
                }
                ("guardrail_version", Some(value)) => {
                    options.guardrail_version = Some(value.to_string())
                }
                ("trace", Some(value)) => options.trace = Some(Trace::from(value)),
                _ => log::debug!("passthrough key not used by the backend: {}", key),
            }
        }
        options
    }
}

/// Remembers the HTTP status of the backend response so successful replies
/// can forward it; the SDK output types do not carry it.
#[derive(Debug, Clone)]
struct StatusRecorder {
    status: Arc<AtomicU16>,
}

impl StatusRecorder {
    fn new() -> Self {
        Self {
            status: Arc::new(AtomicU16::new(200)),
        }
    }

    fn status(&self) -> u16 {
        self.status.load(Ordering::Relaxed)
    }
}

impl Intercept for StatusRecorder {
    fn name(&self) -> &'static str {
        "StatusRecorder"
    }

    fn read_before_deserialization(
        &self,
        context: &BeforeDeserializationInterceptorContextRef<'_>,
        _runtime_components: &RuntimeComponents,
        _cfg: &mut ConfigBag,
    ) -> Result<(), BoxError> {
        self.status
            .store(context.response().status().as_u16(), Ordering::Relaxed);
        Ok(())
    }
}

pub struct BedrockBackend {
    client: Client,
}

impl BedrockBackend {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn from_config(config: &Config) -> Result<Self, ProxyError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .retry_config(RetryConfig::disabled());

        config.validate()?;
        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.aws_access_key_id, &config.aws_secret_access_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                config.aws_session_token.clone(),
                None,
                "proxy-config",
            ));
        } else {
            log::info!("no static AWS keys configured, using the default credential chain");
        }

        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        let sdk_config = loader.load().await;
        Ok(Self::new(Client::new(&sdk_config)))
    }
}

fn sdk_error<E>(err: SdkError<E, HttpResponse>) -> ProxyError
where
    E: std::error::Error + 'static,
{
    let message = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            ProxyError::NetworkError(message)
        }
        _ => ProxyError::upstream(
            err.raw_response().map(|response| response.status().as_u16()),
            message,
        ),
    }
}

#[async_trait]
impl ModelBackend for BedrockBackend {
    async fn invoke(&self, payload: &BackendPayload) -> Result<BackendReply, ProxyError> {
        let options = InvokeOptions::from_passthrough(&payload.passthrough);
        let recorder = StatusRecorder::new();

        let output = self
            .client
            .invoke_model()
            .model_id(&payload.model)
            .content_type(JSON_CONTENT_TYPE)
            .accept(JSON_CONTENT_TYPE)
            .body(Blob::new(payload.body.as_bytes()))
            .set_guardrail_identifier(options.guardrail_identifier)
            .set_guardrail_version(options.guardrail_version)
            .set_trace(options.trace)
            .customize()
            .interceptor(recorder.clone())
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(BackendReply {
            status: recorder.status(),
            body: Bytes::from(output.body.into_inner()),
        })
    }

    async fn invoke_stream(&self, payload: &BackendPayload) -> Result<BackendStream, ProxyError> {
        let options = InvokeOptions::from_passthrough(&payload.passthrough);
        let recorder = StatusRecorder::new();

        let output = self
            .client
            .invoke_model_with_response_stream()
            .model_id(&payload.model)
            .content_type(JSON_CONTENT_TYPE)
            .accept(JSON_CONTENT_TYPE)
            .body(Blob::new(payload.body.as_bytes()))
            .set_guardrail_identifier(options.guardrail_identifier)
            .set_guardrail_version(options.guardrail_version)
            .set_trace(options.trace)
            .customize()
            .interceptor(recorder.clone())
            .send()
            .await
            .map_err(sdk_error)?;

        let mut receiver = output.body;
        let events = async_stream::try_stream! {
            while let Some(event) = receiver
                .recv()
                .await
                .map_err(|err| ProxyError::upstream(None, DisplayErrorContext(&err).to_string()))?
            {
                match event {
                    ResponseStream::Chunk(part) => {
                        if let Some(blob) = part.bytes {
                            yield Bytes::from(blob.into_inner());
                        }
                    }
                    other => log::debug!("skipping non-chunk stream event: {:?}", other),
                }
            }
        };

        Ok(BackendStream {
            status: recorder.status(),
            events: Box::pin(events),
        })
    }
}
