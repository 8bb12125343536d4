use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::types::ApiErrorResponse;

/// Application error codes following the pattern E{area}{sequence}
///
/// Ranges:
/// - E0xxx: Shared/infrastructure errors
/// - E1xxx: Admin auth errors
/// - E2xxx: Shelter errors
/// - E3xxx: Adopter errors
/// - E4xxx: Report errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Shared (E0xxx)
    InternalError,
    ValidationError,
    NotFound,
    Unauthorized,

    // Auth (E1xxx)
    InvalidCredentials,
    UsernameTaken,
    TokenExpired,
    TokenInvalid,

    // Shelter (E2xxx)
    ShelterNotFound,
    ShelterAlreadyApproved,
    ShelterNotPending,

    // Adopter (E3xxx)
    AdopterNotFound,
    AdopterAlreadyActive,
    AdopterNotInactive,

    // Report (E4xxx)
    ReportNotFound,
    CascadeFailed,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            // Shared
            Self::InternalError => "E0001",
            Self::ValidationError => "E0002",
            Self::NotFound => "E0003",
            Self::Unauthorized => "E0004",

            // Auth
            Self::InvalidCredentials => "E1001",
            Self::UsernameTaken => "E1002",
            Self::TokenExpired => "E1003",
            Self::TokenInvalid => "E1004",

            // Shelter
            Self::ShelterNotFound => "E2001",
            Self::ShelterAlreadyApproved => "E2002",
            Self::ShelterNotPending => "E2003",

            // Adopter
            Self::AdopterNotFound => "E3001",
            Self::AdopterAlreadyActive => "E3002",
            Self::AdopterNotInactive => "E3003",

            // Report
            Self::ReportNotFound => "E4001",
            Self::CascadeFailed => "E4002",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InternalError | Self::CascadeFailed => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ValidationError => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::ShelterNotFound | Self::AdopterNotFound
            | Self::ReportNotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized | Self::InvalidCredentials | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,
            Self::UsernameTaken | Self::ShelterAlreadyApproved | Self::ShelterNotPending
            | Self::AdopterAlreadyActive | Self::AdopterNotInactive => StatusCode::CONFLICT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Known {
        code: ErrorCode,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Known {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(code: ErrorCode, message: impl Into<String>, details: serde_json::Value) -> Self {
        Self::Known {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// The stable code this error renders with.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Known { code, .. } => *code,
            AppError::Internal(_) => ErrorCode::InternalError,
            AppError::Database(diesel::result::Error::NotFound) => ErrorCode::NotFound,
            AppError::Database(_) => ErrorCode::InternalError,
            AppError::Validation(_) => ErrorCode::ValidationError,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (message, details) = match self {
            AppError::Known { message, details, .. } => {
                if code.status_code().is_server_error() {
                    tracing::error!(code = code.code(), error = %message, "request failed");
                }
                (message, details)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                ("internal server error".to_string(), None)
            }
            AppError::Database(diesel::result::Error::NotFound) => ("resource not found".to_string(), None),
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                ("database error".to_string(), None)
            }
            AppError::Validation(msg) => (msg, None),
        };

        (code.status_code(), Json(ApiErrorResponse::new(code, message, details))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
