use thiserror::Error;

/// Decoding failure of a legacy serialized payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("SerializedError: {message}\n  at byte {position}")]
pub struct SerializedError {
    pub message: String,
    pub position: usize,
}

impl SerializedError {
    pub fn new(message: &str, position: usize) -> Self {
        Self {
            message: message.to_string(),
            position,
        }
    }

    pub fn err<T>(self) -> Result<T, SerializedError> {
        Err(self)
    }
}

/// A decoded value that has no JSON representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("string at '{path}' is not valid UTF-8")]
    InvalidUtf8 { path: String },
    #[error("float at '{path}' is INF or NAN and cannot be JSON encoded")]
    NonFiniteFloat { path: String },
}
