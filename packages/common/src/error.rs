use thiserror::Error;

/// Common error type for the block model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommonError {
    #[error("Invalid block: id {id} already exists in the document")]
    InvalidBlock { id: String },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Generic error: {0}")]
    Generic(String),
}

impl From<String> for CommonError {
    fn from(s: String) -> Self {
        CommonError::Generic(s)
    }
}

impl From<&str> for CommonError {
    fn from(s: &str) -> Self {
        CommonError::Generic(s.to_string())
    }
}

impl From<serde_json::Error> for CommonError {
    fn from(e: serde_json::Error) -> Self {
        CommonError::MalformedInput(e.to_string())
    }
}

/// Common Result type alias
pub type CommonResult<T> = Result<T, CommonError>;
