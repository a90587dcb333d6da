use thiserror::Error;

/// Failure reported by a [`CommentServiceRemote`](super::remote::CommentServiceRemote)
/// implementation. Callers are free to treat it as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Remote API error ({status}) {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl RemoteError {
    pub fn missing_comment_id(operation: &str) -> Self {
        Self::Validation(format!("{} requires an existing comment id", operation))
    }
}
