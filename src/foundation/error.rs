pub type KenBurnsResult<T> = Result<T, KenBurnsError>;

#[derive(thiserror::Error, Debug)]
pub enum KenBurnsError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("source unreadable: {0}")]
    SourceUnreadable(String),

    #[error("out of range: {0}")]
    OutOfRange(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KenBurnsError {
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn source_unreadable(msg: impl Into<String>) -> Self {
        Self::SourceUnreadable(msg.into())
    }

    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}
