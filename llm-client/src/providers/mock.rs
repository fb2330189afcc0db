//! Mock converse provider for testing
//!
//! Scripts a reply or a failure per model identifier and records which
//! models were called, in order.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{LlmError, Result};
use crate::provider::{ConverseProvider, ConverseRequest, ConverseResponse};

enum Outcome {
    Reply(String),
    Fail(LlmError),
}

/// A mock provider with per-model scripted outcomes
pub struct MockProvider {
    outcomes: HashMap<String, Outcome>,
    /// Reply for models without a scripted outcome (None = EmptyResponse)
    fallback: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            fallback: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider that answers every model with the same text
    pub fn always_succeeds(response: &str) -> Self {
        Self {
            fallback: Some(response.to_string()),
            ..Self::new()
        }
    }

    /// Script a successful reply for a model
    pub fn reply(mut self, model_id: &str, response: &str) -> Self {
        self.outcomes
            .insert(model_id.to_string(), Outcome::Reply(response.to_string()));
        self
    }

    /// Script a failure for a model
    pub fn fail(mut self, model_id: &str, error: LlmError) -> Self {
        self.outcomes
            .insert(model_id.to_string(), Outcome::Fail(error));
        self
    }

    /// Model identifiers passed to converse(), in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConverseProvider for MockProvider {
    async fn converse(
        &self,
        model_id: &str,
        _request: &ConverseRequest,
    ) -> Result<ConverseResponse> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(model_id.to_string());
        }

        let text = match self.outcomes.get(model_id) {
            Some(Outcome::Reply(text)) => text.clone(),
            Some(Outcome::Fail(err)) => return Err(clone_error(err)),
            None => self
                .fallback
                .clone()
                .ok_or_else(|| LlmError::EmptyResponse {
                    model: model_id.to_string(),
                })?,
        };

        Ok(ConverseResponse {
            text,
            model_id: model_id.to_string(),
            usage: None,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Clone an LlmError (needed because LlmError doesn't implement Clone)
fn clone_error(err: &LlmError) -> LlmError {
    match err {
        LlmError::AccessDenied { code, message } => LlmError::AccessDenied {
            code: code.clone(),
            message: message.clone(),
        },
        LlmError::Timeout => LlmError::Timeout,
        LlmError::ApiError { code, message } => LlmError::ApiError {
            code: code.clone(),
            message: message.clone(),
        },
        LlmError::Transport(s) => LlmError::Transport(s.clone()),
        LlmError::EmptyResponse { model } => LlmError::EmptyResponse {
            model: model.clone(),
        },
        LlmError::InvalidRequest(s) => LlmError::InvalidRequest(s.clone()),
        LlmError::ConfigError(s) => LlmError::ConfigError(s.clone()),
        // For Io and Toml errors, we create a generic error since they can't be cloned
        LlmError::Io(_) => LlmError::ConfigError("IO error (mock)".to_string()),
        LlmError::TomlParse(_) => LlmError::ConfigError("TOML parse error (mock)".to_string()),
        LlmError::TomlSerialize(_) => {
            LlmError::ConfigError("TOML serialize error (mock)".to_string())
        }
    }
}
