pub mod claude;
pub mod request;
pub mod response_direct;
pub mod response_stream;

use serde::{self, Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Safe,
    Low,
    Medium,
    High,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct FilterVerdict {
    pub filtered: bool,
    pub severity: Severity,
}

impl FilterVerdict {
    pub const SAFE: FilterVerdict = FilterVerdict {
        filtered: false,
        severity: Severity::Safe,
    };
}

/// Content-safety annotations expected by Azure-flavoured clients. The backend
/// never filters, so the populated form is always "all clear".
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ContentFilterResults {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hate: Option<FilterVerdict>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub self_harm: Option<FilterVerdict>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sexual: Option<FilterVerdict>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub violence: Option<FilterVerdict>,
}

impl ContentFilterResults {
    pub fn all_clear() -> Self {
        Self {
            hate: Some(FilterVerdict::SAFE),
            self_harm: Some(FilterVerdict::SAFE),
            sexual: Some(FilterVerdict::SAFE),
            violence: Some(FilterVerdict::SAFE),
        }
    }

    /// Serializes as `{}`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.hate.is_none()
            && self.self_harm.is_none()
            && self.sexual.is_none()
            && self.violence.is_none()
    }
}
