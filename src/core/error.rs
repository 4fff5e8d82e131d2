//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error while opening or writing a sink target
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Logger already closed; the worker has drained and terminated
    #[error("Logger already closed")]
    Closed,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
