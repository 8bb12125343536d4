use diesel::r2d2::PoolError;

use pethub_shared::errors::{AppError, ErrorCode};

use super::engine::Rejection;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Shelter,
    ShelterInfo,
    Adopter,
    Report,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Shelter => write!(f, "shelter"),
            Entity::ShelterInfo => write!(f, "shelter info"),
            Entity::Adopter => write!(f, "adopter"),
            Entity::Report => write!(f, "report"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidValue,
    NotFound,
    Conflict,
    Store,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidValue => "invalid_value",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Store => "store_error",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("{entity} not found")]
    NotFound { entity: Entity, id: i32 },

    /// Nothing was committed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The shelter row is already committed; only the report cascade failed.
    #[error("shelter {shelter_id} updated but report cascade failed: {source}")]
    CascadeFailed {
        shelter_id: i32,
        #[source]
        source: StoreError,
    },
}

impl ModerationError {
    pub fn not_found(entity: Entity, id: i32) -> Self {
        ModerationError::NotFound { entity, id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ModerationError::Rejected(r) if r.is_conflict() => ErrorKind::Conflict,
            ModerationError::Rejected(_) => ErrorKind::InvalidValue,
            ModerationError::NotFound { .. } => ErrorKind::NotFound,
            ModerationError::Store(_) | ModerationError::CascadeFailed { .. } => ErrorKind::Store,
        }
    }
}

impl From<ModerationError> for AppError {
    fn from(err: ModerationError) -> Self {
        let message = err.to_string();
        match err {
            ModerationError::Rejected(rejection) => {
                let code = match rejection {
                    Rejection::InvalidValue { .. } => ErrorCode::ValidationError,
                    Rejection::AlreadyApproved => ErrorCode::ShelterAlreadyApproved,
                    Rejection::NotPending => ErrorCode::ShelterNotPending,
                    Rejection::AlreadyActive => ErrorCode::AdopterAlreadyActive,
                    Rejection::NotInactive => ErrorCode::AdopterNotInactive,
                };
                AppError::new(code, message)
            }
            ModerationError::NotFound { entity, .. } => {
                let code = match entity {
                    Entity::Shelter | Entity::ShelterInfo => ErrorCode::ShelterNotFound,
                    Entity::Adopter => ErrorCode::AdopterNotFound,
                    Entity::Report => ErrorCode::ReportNotFound,
                };
                AppError::new(code, message)
            }
            // Logged once, when the response is rendered.
            ModerationError::Store(source) => {
                AppError::internal(format!("failed to apply moderation change: {source}"))
            }
            ModerationError::CascadeFailed { shelter_id, source } => AppError::with_details(
                ErrorCode::CascadeFailed,
                format!("shelter {shelter_id} updated but updating its reports failed: {source}"),
                serde_json::json!({ "shelter_id": shelter_id, "primary_committed": true }),
            ),
        }
    }
}
