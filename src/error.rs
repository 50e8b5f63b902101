pub type FloorplayResult<T> = Result<T, FloorplayError>;

#[derive(thiserror::Error, Debug)]
pub enum FloorplayError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("trace error: {0}")]
    Trace(String),

    #[error("playback error: {0}")]
    Playback(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FloorplayError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn trace(msg: impl Into<String>) -> Self {
        Self::Trace(msg.into())
    }

    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }
}
