use thiserror::Error;

#[derive(Debug, Error)]
pub enum SketchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("{message}")]
    ServiceError { status: u16, message: String },
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SketchError {
    /// HTTP status reported by the image service, if the failure came from it.
    pub fn status(&self) -> Option<u16> {
        match self {
            SketchError::ServiceError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SketchError>;
