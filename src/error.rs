use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

use crate::models::MessageResponse;
use crate::services::{KeyError, RegistrationError, TweetError};
use crate::store::StoreError;

/// HTTP-facing failure. Every handler returns this; the `ResponseError`
/// impl turns it into a status code and a `{"message": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Auth(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::InvalidUsername | RegistrationError::InvalidEmail => {
                ApiError::Validation(err.to_string())
            }
            RegistrationError::UsernameTaken | RegistrationError::EmailTaken => {
                ApiError::Conflict(err.to_string())
            }
            RegistrationError::Store(err) => ApiError::Storage(err),
        }
    }
}

impl From<KeyError> for ApiError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::MissingUsername => ApiError::Validation(err.to_string()),
            KeyError::UnknownUser => ApiError::NotFound(err.to_string()),
            KeyError::Store(err) => ApiError::Storage(err),
        }
    }
}

impl From<TweetError> for ApiError {
    fn from(err: TweetError) -> Self {
        match err {
            TweetError::Unauthorized => ApiError::Auth(err.to_string()),
            TweetError::Store(err) => ApiError::Storage(err),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            // Key issuance for an unregistered user answers 401 on the wire.
            ApiError::NotFound(_) | ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::Storage(err) => {
                // Do not leak persistence details to clients.
                error!("Storage failure: {err}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(MessageResponse { message })
    }
}
