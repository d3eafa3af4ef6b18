use std::time::Duration;

/// Failures of the claim-checking pipeline and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no input text")]
    EmptyInput,

    #[error("empty model output")]
    EmptyOutput,

    #[error("malformed model output: {0}")]
    MalformedOutput(#[source] serde_json::Error),

    #[error("invalid model output: {0}")]
    InvalidOutput(String),

    #[error("completion service error: {0}")]
    Completion(String),

    #[error("completion call timed out after {0:?}")]
    Timeout(Duration),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<async_openai::error::OpenAIError> for Error {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        Error::Completion(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
