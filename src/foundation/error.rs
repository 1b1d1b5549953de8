pub type AcquisitionResult<T> = Result<T, AcquisitionError>;

#[derive(thiserror::Error, Debug)]
pub enum AcquisitionError {
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AcquisitionError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::ResourceNotFound(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn empty(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for AcquisitionError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}
