//! Error types for Bookshelf server

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes exposed in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    DbFailure = 3,
    NoSuchData = 4,
    Duplicate = 8,
    BadValue = 18,
    InvalidReference = 22,
    StillReferenced = 23,
}

/// Kind of failure reported by the store.
///
/// This is the only shape of store failure the services and handlers look at;
/// driver-specific codes stop at the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// A unique constraint (author email, book isbn) was violated
    UniqueViolation,
    /// The target row of a read, update or delete does not exist
    NotFound,
    /// A foreign key was violated (unknown author, or author still referenced)
    ForeignKeyViolation,
    /// Anything else: connectivity, decoding, syntax
    Other,
}

/// Failure of a store operation
#[derive(Error, Debug)]
#[error("{kind:?}: {message}")]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
    #[source]
    pub source: Option<sqlx::Error>,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::NotFound, message)
    }
}

const PG_UNIQUE_VIOLATION: &str = "23505";
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        let kind = match &e {
            sqlx::Error::RowNotFound => StoreErrorKind::NotFound,
            sqlx::Error::Database(db) => match db.code().as_deref() {
                Some(PG_UNIQUE_VIOLATION) => StoreErrorKind::UniqueViolation,
                Some(PG_FOREIGN_KEY_VIOLATION) => StoreErrorKind::ForeignKeyViolation,
                _ => StoreErrorKind::Other,
            },
            _ => StoreErrorKind::Other,
        };
        let message = match &e {
            sqlx::Error::Database(db) => db
                .constraint()
                .map(|c| format!("constraint {} violated", c))
                .unwrap_or_else(|| db.message().to_string()),
            other => other.to_string(),
        };
        Self {
            kind,
            message,
            source: Some(e),
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Still referenced: {0}")]
    StillReferenced(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e.kind {
            StoreErrorKind::NotFound => AppError::NotFound(e.message),
            StoreErrorKind::UniqueViolation => AppError::Conflict(e.message),
            StoreErrorKind::ForeignKeyViolation => AppError::InvalidReference(e.message),
            StoreErrorKind::Other => AppError::Store(e),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    fn parts(&self) -> (StatusCode, ErrorCode, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::InvalidReference(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidReference, msg.clone())
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone()),
            AppError::StillReferenced(msg) => {
                (StatusCode::CONFLICT, ErrorCode::StillReferenced, msg.clone())
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
        }
    }

    /// HTTP status this error is rendered with
    pub fn status(&self) -> StatusCode {
        self.parts().0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
