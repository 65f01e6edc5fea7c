use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    constants, functional::validation_rules::ValidationResult, repository::RepositoryError,
};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Serialize)]
pub struct ResponseBody<T> {
    pub message: String,
    pub data: T,
}

impl<T> ResponseBody<T> {
    pub fn new(message: &str, data: T) -> ResponseBody<T> {
        ResponseBody {
            message: message.to_string(),
            data,
        }
    }
}

/// Terminal failures raised at the service boundary.
///
/// Rule violations are never raised on their own: a non-valid
/// [`ValidationResult`] is carried whole by [`ServiceError::ValidationFailed`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{} validation error(s)", .0.errors().len())]
    ValidationFailed(ValidationResult),

    #[error("billing {id} not found")]
    NotFound { id: Uuid },

    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    InternalServerError { message: String },
}

impl ServiceError {
    pub fn validation_failed(result: ValidationResult) -> Self {
        ServiceError::ValidationFailed(result)
    }

    pub fn not_found(id: Uuid) -> Self {
        ServiceError::NotFound { id }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ServiceError::BadRequest {
            message: message.into(),
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ServiceError::InternalServerError {
            message: message.into(),
        }
    }

    pub fn validation_result(&self) -> Option<&ValidationResult> {
        match self {
            ServiceError::ValidationFailed(result) => Some(result),
            _ => None,
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(id) => ServiceError::not_found(id),
            RepositoryError::MissingId => ServiceError::bad_request(constants::MESSAGE_INVALID_BILLING_ID),
            RepositoryError::Poisoned => {
                ServiceError::internal_server_error(constants::MESSAGE_INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ServiceError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::ValidationFailed(result) => {
                HttpResponse::build(self.status_code()).json(result.errors())
            }
            ServiceError::NotFound { .. } => HttpResponse::build(self.status_code()).finish(),
            ServiceError::BadRequest { message } | ServiceError::InternalServerError { message } => {
                HttpResponse::build(self.status_code())
                    .json(ResponseBody::new(message, constants::EMPTY))
            }
        }
    }
}
