use crate::http_status::HttpStatus;
use thiserror::Error;

/// Failures of the status code registry and the status line mapping.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusError {
    #[error("status code {0} is outside the valid range 100-599")]
    InvalidCode(u16),
    #[error("status code {0} is not registered")]
    UnknownCode(u16),
    #[error("status code {0} cannot be written on a status line")]
    UnsupportedByTransport(u16),
    #[error("status code {0} is registered more than once")]
    DuplicateCode(u16),
}

/// Everything a request can fail with before a response is synthesized.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Status(#[from] StatusError),
    #[error("{0}")]
    BadRequest(String),
    #[error("no endpoint at {0}")]
    NotFound(String),
    #[error("method {method} is not allowed for {path}")]
    MethodNotAllowed { method: String, path: String },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> HttpStatus {
        match self {
            ApiError::Status(StatusError::InvalidCode(_)) => HttpStatus::BAD_REQUEST,
            ApiError::Status(StatusError::UnknownCode(_)) => HttpStatus::NOT_FOUND,
            ApiError::Status(_) => HttpStatus::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => HttpStatus::BAD_REQUEST,
            ApiError::NotFound(_) => HttpStatus::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => HttpStatus::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => HttpStatus::INTERNAL_SERVER_ERROR,
        }
    }
}
