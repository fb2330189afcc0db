//! Shared LLM client library for the converse-demo workspace
//!
//! Provides a provider-neutral converse request shape and:
//! - Amazon Bedrock runtime (Converse API)
//! - A scripted mock provider for tests
//! - The named model registry and TOML configuration

pub mod config;
pub mod error;
pub mod provider;
pub mod providers;
pub mod registry;

pub use config::Config;
pub use error::{LlmError, Result};
pub use provider::{
    ConverseProvider, ConverseRequest, ConverseResponse, InferenceConfig, Message, Role,
    TokenUsage,
};
pub use providers::{BedrockProvider, DEFAULT_REGION, MockProvider};
pub use registry::{ModelEntry, ModelRegistry};
