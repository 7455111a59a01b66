use thiserror::Error;

/// Failure of a call to the AI backend. Call sites turn these into fixed
/// terminal or transcript messages; nothing here is ever fatal.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("backend answered with HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("backend returned no text")]
    EmptyResponse,
    #[error("AI backend is not configured")]
    Unavailable,
}

impl From<serde_json::Error> for AiError {
    fn from(err: serde_json::Error) -> Self {
        AiError::MalformedResponse(err.to_string())
    }
}

/// Malformed initial file tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("duplicate file id '{0}'")]
    DuplicateId(String),
    #[error("file '{0}' cannot have children")]
    FileWithChildren(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
