use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use doable_shared::ApiMessage;
use thiserror::Error;

use crate::store::StoreError;

/// Request-level error taxonomy. Every variant renders as the
/// `{"message": ...}` envelope; internal causes are logged, never echoed.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required input was absent or empty. Checked before the store is
    /// touched, so a rejected request persists nothing.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A value violates a schema constraint (e.g. a status outside the
    /// enumeration).
    #[error("{0}")]
    Validation(String),

    /// The id does not exist, or belongs to a different owner. The two cases
    /// are deliberately indistinguishable.
    #[error("todo not found")]
    NotFound,

    /// The caller owns zero todos. Reportable, not fatal.
    #[error("no todo found")]
    Empty,

    /// No resolvable caller identity on the request.
    #[error("Unauthorized - no valid session")]
    Unauthorized,

    /// Unexpected persistence or infrastructure fault.
    #[error("Internal server error")]
    Internal(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(message) => ServiceError::Validation(message),
            StoreError::Poisoned => ServiceError::Internal(err.to_string()),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::MissingField(_)
            | ServiceError::Validation(_)
            | ServiceError::NotFound => StatusCode::BAD_REQUEST,
            ServiceError::Empty => StatusCode::NOT_FOUND,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ServiceError::Internal(cause) = self {
            log::error!("internal error: {cause}");
        }
        HttpResponse::build(self.status_code()).json(ApiMessage::new(self.to_string()))
    }
}
