use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("{code}: {message}")]
    AccessDenied { code: String, message: String },

    #[error("timeout")]
    Timeout,

    #[error("{code}: {message}")]
    ApiError { code: String, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("No text content in response from {model}")]
    EmptyResponse { model: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl LlmError {
    /// Whether the caller lacks access to the requested model
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }
}

pub type Result<T> = std::result::Result<T, LlmError>;
