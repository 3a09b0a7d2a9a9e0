use std::sync::Arc;

use bedrock_chat_proxy::app::create_app;
use bedrock_chat_proxy::backend::BedrockBackend;
use bedrock_chat_proxy::config;
use bedrock_chat_proxy::service::ProxyService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = config::load_config().map_err(std::io::Error::other)?;

    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .init();
    log::info!("Initializing Bedrock chat proxy...");

    if config.api_key().is_none() {
        log::warn!("API_KEY is not set, incoming requests are not authenticated");
    }

    let backend = BedrockBackend::from_config(&config)
        .await
        .map_err(std::io::Error::other)?;
    log::info!("Bedrock backend ready in region {}", config.region);

    let proxy_service = Arc::new(ProxyService::new(
        Arc::new(backend),
        config.default_max_tokens,
    ));
    let bind_address = (config.host.clone(), config.port);
    let config = Arc::new(config);

    let server = actix_web::HttpServer::new(move || {
        create_app(proxy_service.clone(), config.clone())
    });

    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);
    server.bind(bind_address)?.run().await
}
