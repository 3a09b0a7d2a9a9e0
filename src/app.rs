use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, Error, web};

use crate::consts::JSON_BODY_LIMIT;
use crate::errors::ProxyError;
use crate::{config, handlers, service};

/// Malformed or schema-violating bodies get the same error envelope as
/// every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .content_type_required(false)
        .error_handler(|err, _request| {
            log::info!("rejected request body: {}", err);
            ProxyError::ValidationError(err.to_string()).into()
        })
}

pub fn create_app(
    proxy_service: Arc<service::ProxyService>,
    config: Arc<config::Config>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Logger::default())
        .app_data(Data::from(proxy_service))
        .app_data(Data::from(config))
        .app_data(json_config())
        .service(web::scope("/v1").route(
            "/chat/completions",
            web::post().to(handlers::chat_completion),
        ))
}
