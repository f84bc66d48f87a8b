use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server responded with status {status}")]
    Server { status: u16 },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("title must not be blank")]
    ValidationRejected,
    #[error("storage unavailable: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for TodoError {
    fn from(err: serde_json::Error) -> Self {
        TodoError::Decode(err.to_string())
    }
}

pub type Result<T, E = TodoError> = std::result::Result<T, E>;
