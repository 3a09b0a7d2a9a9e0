use std::sync::Arc;

use bedrock_chat_proxy::backend::ModelBackend;
use bedrock_chat_proxy::config::Config;
use bedrock_chat_proxy::consts::DEFAULT_MAX_TOKENS;
use bedrock_chat_proxy::service::ProxyService;

pub const TEST_API_KEY: &str = "this-key-can-be-customized";

pub fn create_test_config(api_key: Option<&str>) -> Config {
    Config {
        api_key: api_key.map(str::to_string),
        ..Default::default()
    }
}

pub fn create_test_app_components(
    backend: Arc<dyn ModelBackend>,
    api_key: Option<&str>,
) -> (Arc<Config>, Arc<ProxyService>) {
    let config = Arc::new(create_test_config(api_key));
    let proxy_service = Arc::new(ProxyService::new(backend, DEFAULT_MAX_TOKENS));

    (config, proxy_service)
}
