use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body the prediction service returns when it refuses a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{error}")]
pub struct ServiceError {
    pub error: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// A reply body that is neither a score nor a readable rejection.
#[derive(Debug, Error)]
pub enum ReplyDecodeError {
    #[error("malformed reply: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("reply carries a non-text error field: {0}")]
    UnreadableError(String),
}
