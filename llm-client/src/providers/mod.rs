//! Converse provider implementations

mod bedrock;
pub mod mock;

pub use bedrock::{BedrockProvider, DEFAULT_REGION};
pub use mock::MockProvider;
