use serde::{self, Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role of an inbound turn. Roles the backend has no counterpart for, such as
/// `tool`, deserialize as `Other` and are dropped during normalization.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    #[serde(alias = "developer")]
    System,
    User,
    Assistant,
    #[serde(other)]
    Other,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContentPart {
    Text {
        text: String,
    },
    ImageUrl {
        image_url: Value,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    String(String),
    Array(Vec<MessageContentPart>),
}

impl MessageContent {
    /// Plain-text view of the content. Non-text parts are dropped.
    pub fn text(&self) -> String {
        match self {
            MessageContent::String(text) => text.clone(),
            MessageContent::Array(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    MessageContentPart::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Message {
    pub role: MessageRole,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub content: Option<MessageContent>,
}

impl Message {
    pub fn new(role: MessageRole, content: &str) -> Self {
        Self {
            role,
            content: Some(MessageContent::String(content.to_string())),
        }
    }

    pub fn text(&self) -> String {
        self.content
            .as_ref()
            .map(MessageContent::text)
            .unwrap_or_default()
    }

    /// True when the turn carries something other than whitespace.
    pub fn has_text(&self) -> bool {
        !self.text().trim().is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum StopSequences {
    Single(String),
    Multiple(Vec<String>),
}

impl StopSequences {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            StopSequences::Single(stop) => vec![stop],
            StopSequences::Multiple(stops) => stops,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct StreamOptions {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub include_usage: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatCompletionCreate {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stop: Option<StopSequences>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stream: Option<bool>,
    /// Every key outside the recognized set, kept verbatim.
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl ChatCompletionCreate {
    pub fn is_stream(&self) -> bool {
        self.stream.unwrap_or(false)
    }

    /// `stream_options` is not part of the recognized set, so it lives in
    /// `extra` and is read from there.
    pub fn include_usage(&self) -> bool {
        self.extra
            .get("stream_options")
            .cloned()
            .and_then(|value| serde_json::from_value::<StreamOptions>(value).ok())
            .and_then(|options| options.include_usage)
            .unwrap_or(false)
    }
}
