use axum::extract::rejection::JsonRejection;
use axum::{response::{IntoResponse, Response}, http::StatusCode};
use serde::Serialize;

use crate::util::object_id::InvalidIdentifier;

pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno do servidor.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerErrorKind {
    NotFound,
    Validation,
    BadRequest,
    Conflict,
    MethodNotAllowed,
    Internal,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::NotFound => "NotFound",
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::Conflict => "Conflict",
            HandlerErrorKind::MethodNotAllowed => "MethodNotAllowed",
            HandlerErrorKind::Internal => "Internal",
        };
        write!(f, "{}", s)
    }
}

impl HandlerErrorKind {
    /// Conflicts are reported as 400: clients already treat them as plain input errors.
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::Validation
            | HandlerErrorKind::BadRequest
            | HandlerErrorKind::Conflict => StatusCode::BAD_REQUEST,
            HandlerErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error returned by every handler; the body is always `{"message": ...}`.
#[derive(Debug, Serialize)]
pub struct HandlerError {
    #[serde(skip)]
    pub error: HandlerErrorKind,
    pub message: String,
}

impl HandlerError {
    pub fn new<T: Into<String>>(error: HandlerErrorKind, message: T) -> Self {
        HandlerError { error, message: message.into() }
    }

    pub fn not_found<T: Into<String>>(message: T) -> Self {
        Self::new(HandlerErrorKind::NotFound, message)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(
            HandlerErrorKind::MethodNotAllowed,
            "Método não permitido para este endpoint.",
        )
    }

    /// Like `From<ServiceError>`, but a store failure is reported with
    /// `internal_message`. The store's own text only goes to the log.
    pub fn from_service(err: ServiceError, internal_message: &str) -> Self {
        match err {
            ServiceError::InternalError(detail) => {
                tracing::error!("{}: {}", internal_message, detail);
                Self::new(HandlerErrorKind::Internal, internal_message)
            }
            other => Self::from(other),
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let body = axum::Json(self);
        (status, body).into_response()
    }
}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => HandlerError::new(HandlerErrorKind::NotFound, msg),
            ServiceError::InvalidInput(msg) => HandlerError::new(HandlerErrorKind::Validation, msg),
            ServiceError::InvalidIdentifier(_) => {
                HandlerError::new(HandlerErrorKind::BadRequest, "ID inválido.")
            }
            ServiceError::Conflict(msg) => HandlerError::new(HandlerErrorKind::Conflict, msg),
            ServiceError::InternalError(_) => {
                HandlerError::new(HandlerErrorKind::Internal, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

impl From<JsonRejection> for HandlerError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        HandlerError::new(
            HandlerErrorKind::BadRequest,
            format!("Corpo da requisição inválido: {}", rejection.body_text()),
        )
    }
}


#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    NotFound(String),
    InvalidInput(String),
    InvalidIdentifier(String),
    Conflict(String),
    InternalError(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ServiceError::InvalidInput(msg) => write!(f, "Invalid Input: {}", msg),
            ServiceError::InvalidIdentifier(raw) => write!(f, "Invalid Identifier: {}", raw),
            ServiceError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ServiceError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<InvalidIdentifier> for ServiceError {
    fn from(err: InvalidIdentifier) -> Self {
        ServiceError::InvalidIdentifier(err.0)
    }
}

// Allow conversion from RepositoryError to ServiceError
impl From<crate::repository::repository_error::RepositoryError> for ServiceError {
    fn from(err: crate::repository::repository_error::RepositoryError) -> Self {
        use crate::repository::repository_error::RepositoryError;
        match err {
            RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => ServiceError::InvalidInput(msg),
            other => ServiceError::InternalError(other.to_string()),
        }
    }
}
