use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

const DEFAULT_TOP_P: f32 = 0.9;
const DEFAULT_MAX_TOKENS: u32 = 500;

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// A single conversation turn with its text content blocks
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: Vec<String>,
}

impl Message {
    /// A user turn carrying one text block
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![text.into()],
        }
    }
}

/// Generation parameters sent alongside the messages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Nucleus-sampling probability
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Maximum number of tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

fn default_top_p() -> f32 {
    DEFAULT_TOP_P
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            top_p: default_top_p(),
            max_tokens: default_max_tokens(),
            temperature: None,
        }
    }
}

/// Request to send to a converse-capable provider
///
/// Built once and shared by reference across every model call.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverseRequest {
    pub messages: Vec<Message>,
    pub inference_config: InferenceConfig,
}

impl ConverseRequest {
    /// A single-turn request with one user message
    pub fn user(prompt: impl Into<String>, inference_config: InferenceConfig) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
            inference_config,
        }
    }
}

/// Response from a converse call
#[derive(Debug, Clone)]
pub struct ConverseResponse {
    /// First text content block of the output message
    pub text: String,
    pub model_id: String,
    pub usage: Option<TokenUsage>,
}

/// Token usage information
#[derive(Debug, Clone, Copy)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Trait for providers that serve the converse operation
#[async_trait]
pub trait ConverseProvider: Send + Sync {
    /// Send the request to the given model and return its reply
    async fn converse(&self, model_id: &str, request: &ConverseRequest)
    -> Result<ConverseResponse>;

    /// Get the provider name for display
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inference_config() {
        let config = InferenceConfig::default();
        assert_eq!(config.top_p, 0.9);
        assert_eq!(config.max_tokens, 500);
        assert!(config.temperature.is_none());
    }

    #[test]
    fn test_user_request_has_single_message() {
        let request = ConverseRequest::user("Summarize this", InferenceConfig::default());
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
        assert_eq!(request.messages[0].content, vec!["Summarize this".to_string()]);
    }

    #[test]
    fn test_inference_config_partial_toml() {
        let config: InferenceConfig = toml::from_str("max_tokens = 200").unwrap();
        assert_eq!(config.max_tokens, 200);
        assert_eq!(config.top_p, 0.9);
    }
}
