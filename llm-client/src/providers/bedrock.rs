//! Amazon Bedrock runtime provider
//!
//! Calls the Converse operation through the AWS SDK. Credentials, retries and
//! timeouts come from the ambient AWS configuration.

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::config::http::HttpResponse;
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_bedrockruntime::operation::converse::ConverseError;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message as BedrockMessage,
};
use log::debug;

use crate::error::{LlmError, Result};
use crate::provider::{
    ConverseProvider, ConverseRequest, ConverseResponse, InferenceConfig, Message, Role,
    TokenUsage,
};

pub const DEFAULT_REGION: &str = "us-east-1";

/// Provider backed by the Bedrock runtime Converse API
pub struct BedrockProvider {
    client: Client,
    region: String,
}

impl BedrockProvider {
    /// Build a client from the ambient AWS configuration
    ///
    /// An explicit region wins; otherwise the standard provider chain is
    /// consulted, falling back to `us-east-1`.
    pub async fn from_env(region: Option<String>) -> Self {
        let region_provider = RegionProviderChain::first_try(region.map(Region::new))
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        let region = sdk_config
            .region()
            .map(ToString::to_string)
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        debug!("Bedrock runtime region: {}", region);

        Self {
            client: Client::new(&sdk_config),
            region,
        }
    }

    /// The region the client was resolved to
    pub fn region(&self) -> &str {
        &self.region
    }
}

#[async_trait]
impl ConverseProvider for BedrockProvider {
    async fn converse(
        &self,
        model_id: &str,
        request: &ConverseRequest,
    ) -> Result<ConverseResponse> {
        let messages = request
            .messages
            .iter()
            .map(to_bedrock_message)
            .collect::<Result<Vec<_>>>()?;

        debug!("Converse request to {}", model_id);

        let output = self
            .client
            .converse()
            .model_id(model_id)
            .set_messages(Some(messages))
            .inference_config(to_inference_configuration(&request.inference_config)?)
            .send()
            .await
            .map_err(map_converse_error)?;

        let text = output
            .output()
            .and_then(|o| o.as_message().ok())
            .and_then(|m| m.content().first())
            .and_then(|block| block.as_text().ok())
            .cloned()
            .ok_or_else(|| LlmError::EmptyResponse {
                model: model_id.to_string(),
            })?;

        let usage = output.usage().map(|u| TokenUsage {
            input_tokens: u.input_tokens().max(0) as u32,
            output_tokens: u.output_tokens().max(0) as u32,
        });
        if let Some(usage) = &usage {
            debug!(
                "{}: {} tokens in, {} out",
                model_id, usage.input_tokens, usage.output_tokens
            );
        }

        Ok(ConverseResponse {
            text,
            model_id: model_id.to_string(),
            usage,
        })
    }

    fn name(&self) -> &'static str {
        "Amazon Bedrock"
    }
}

fn to_bedrock_message(message: &Message) -> Result<BedrockMessage> {
    let role = match message.role {
        Role::User => ConversationRole::User,
        Role::Assistant => ConversationRole::Assistant,
    };
    let content = message
        .content
        .iter()
        .cloned()
        .map(ContentBlock::Text)
        .collect();

    BedrockMessage::builder()
        .role(role)
        .set_content(Some(content))
        .build()
        .map_err(|e| LlmError::InvalidRequest(e.to_string()))
}

fn to_inference_configuration(config: &InferenceConfig) -> Result<InferenceConfiguration> {
    let max_tokens = i32::try_from(config.max_tokens).map_err(|_| {
        LlmError::InvalidRequest(format!("max_tokens out of range: {}", config.max_tokens))
    })?;

    Ok(InferenceConfiguration::builder()
        .top_p(config.top_p)
        .max_tokens(max_tokens)
        .set_temperature(config.temperature)
        .build())
}

fn map_converse_error(err: SdkError<ConverseError, HttpResponse>) -> LlmError {
    match err {
        SdkError::TimeoutError(_) => LlmError::Timeout,
        SdkError::ServiceError(context) => map_service_error(context.into_err()),
        other => LlmError::Transport(DisplayErrorContext(&other).to_string()),
    }
}

fn map_service_error(err: ConverseError) -> LlmError {
    match err {
        ConverseError::AccessDeniedException(inner) => LlmError::AccessDenied {
            code: "AccessDeniedException".to_string(),
            message: inner.message().unwrap_or_default().to_string(),
        },
        other => LlmError::ApiError {
            code: other.code().unwrap_or("Unknown").to_string(),
            message: other.message().unwrap_or_default().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_bedrockruntime::error::ErrorMetadata;
    use aws_sdk_bedrockruntime::types::error::AccessDeniedException;

    #[test]
    fn test_access_denied_is_classified() {
        let err = ConverseError::AccessDeniedException(
            AccessDeniedException::builder()
                .message("You don't have access to the model with the specified model ID.")
                .build(),
        );

        match map_service_error(err) {
            LlmError::AccessDenied { code, message } => {
                assert_eq!(code, "AccessDeniedException");
                assert!(message.starts_with("You don't have access"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_generic_service_error_keeps_code() {
        let err = ConverseError::generic(
            ErrorMetadata::builder()
                .code("ValidationException")
                .message("The provided model identifier is invalid.")
                .build(),
        );

        let mapped = map_service_error(err);
        assert!(!mapped.is_access_denied());
        assert_eq!(
            mapped.to_string(),
            "ValidationException: The provided model identifier is invalid."
        );
    }

    #[test]
    fn test_user_message_conversion() {
        let message = to_bedrock_message(&Message::user("hello")).unwrap();
        assert_eq!(message.role(), &ConversationRole::User);
        assert_eq!(message.content().len(), 1);
        assert_eq!(message.content()[0].as_text().unwrap(), "hello");
    }

    #[test]
    fn test_inference_configuration() {
        let config = to_inference_configuration(&InferenceConfig::default()).unwrap();
        assert_eq!(config.top_p(), Some(0.9));
        assert_eq!(config.max_tokens(), Some(500));
        assert_eq!(config.temperature(), None);
    }

    #[test]
    fn test_max_tokens_out_of_range() {
        let config = InferenceConfig {
            max_tokens: u32::MAX,
            ..InferenceConfig::default()
        };
        assert!(matches!(
            to_inference_configuration(&config),
            Err(LlmError::InvalidRequest(_))
        ));
    }
}
