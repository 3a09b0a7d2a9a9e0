use actix_web::http::StatusCode;
use actix_web::web::{Bytes, Data, Json};
use actix_web::{HttpRequest, HttpResponse, mime};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::auth::authorize;
use crate::config::Config;
use crate::consts::CHANNEL_BUFFER_SIZE;
use crate::errors::ProxyError;
use crate::models::request;
use crate::service::ProxyService;

fn forwarded_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::OK)
}

pub async fn chat_completion(
    http_request: HttpRequest,
    service: Data<ProxyService>,
    config: Data<Config>,
    request: Json<request::ChatCompletionCreate>,
) -> Result<HttpResponse, ProxyError> {
    authorize(&http_request, config.api_key())?;

    let request = request.into_inner();
    log::debug!("request: {:?}", request);

    if request.is_stream() {
        let pending = service.open_stream(request).await.map_err(|e| {
            log::error!("stream_chat_completion error: {:?}", e);
            e
        })?;
        let status = forwarded_status(pending.status);

        let (sender, receiver) = mpsc::channel::<Result<Bytes, ProxyError>>(CHANNEL_BUFFER_SIZE);
        actix_web::rt::spawn(async move {
            if let Err(e) = pending.pump(sender).await {
                log::error!("stream_chat_completion error: {:?}", e);
            }
        });

        return Ok(HttpResponse::build(status)
            .content_type(mime::TEXT_EVENT_STREAM)
            .streaming(ReceiverStream::new(receiver)));
    }

    let (status, completion) = service.create_completion(request).await.map_err(|e| {
        log::error!("create_chat_completion error: {:?}", e);
        e
    })?;

    Ok(HttpResponse::build(forwarded_status(status)).json(completion))
}
