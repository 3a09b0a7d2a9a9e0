pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

pub const DEFAULT_MAX_TOKENS: u32 = 1000;

pub const CHAT_COMPLETION_OBJECT: &str = "chat.completion";
pub const CHAT_COMPLETION_CHUNK_OBJECT: &str = "chat.completion.chunk";

pub const SSE_DONE: &str = "data: [DONE]\n\n";

pub const CHANNEL_BUFFER_SIZE: usize = 100;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_REGION: &str = "us-east-1";

pub const JSON_BODY_LIMIT: usize = 16 * 1024 * 1024;
