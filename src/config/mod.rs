use clap::Parser;
use clap::error::ErrorKind;

use crate::consts::{DEFAULT_HOST, DEFAULT_MAX_TOKENS, DEFAULT_PORT, DEFAULT_REGION};
use crate::errors::ProxyError;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "bedrock-chat-proxy",
    about = "OpenAI-compatible chat completions in front of Claude on Bedrock",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Config {
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Key clients must present as a bearer token. Unset disables the check.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "REGION_NAME", default_value = DEFAULT_REGION)]
    pub region: String,

    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub aws_access_key_id: Option<String>,

    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub aws_secret_access_key: Option<String>,

    #[arg(long, env = "AWS_SESSION_TOKEN", hide_env_values = true)]
    pub aws_session_token: Option<String>,

    /// Overrides the Bedrock runtime endpoint.
    #[arg(long, env = "BEDROCK_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    #[arg(
        long,
        env = "DEFAULT_MAX_TOKENS",
        default_value_t = DEFAULT_MAX_TOKENS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub default_max_tokens: u32,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_key: None,
            region: DEFAULT_REGION.to_string(),
            aws_access_key_id: None,
            aws_secret_access_key: None,
            aws_session_token: None,
            endpoint_url: None,
            default_max_tokens: DEFAULT_MAX_TOKENS,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// The configured client key, with an empty value treated as unset.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    pub fn validate(&self) -> Result<(), ProxyError> {
        if self.aws_access_key_id.is_some() != self.aws_secret_access_key.is_some() {
            return Err(ProxyError::ConfigError(
                "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together".to_string(),
            ));
        }
        if self.region.trim().is_empty() {
            return Err(ProxyError::ConfigError("region must not be empty".to_string()));
        }
        Ok(())
    }
}

pub fn load_config() -> Result<Config, ProxyError> {
    dotenv::dotenv().ok();

    let config = Config::try_parse().or_else(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => Err(err),
    })?;
    config.validate()?;

    Ok(config)
}
