use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use pethub_shared::errors::{AppError, AppResult, ErrorCode};
use pethub_shared::types::ApiResponse;

use crate::models::{AdminAccount, NewAdminAccount};
use crate::schema::adminaccount;
use crate::services::auth_service;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3 to 50 characters"))]
    pub username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub admin_id: i32,
    pub username: String,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<AdminAccount>>> {
    req.validate()
        .map_err(|e| AppError::new(ErrorCode::ValidationError, e.to_string()))?;

    let username = req.username.trim().to_string();
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let exists: bool = adminaccount::table
        .filter(adminaccount::username.eq(&username))
        .count()
        .get_result::<i64>(&mut conn)
        .map(|c| c > 0)?;

    if exists {
        return Err(username_taken());
    }

    let new_admin = NewAdminAccount {
        username,
        password: auth_service::hash_password(&req.password)?,
    };

    // The count above can race with a concurrent insert; the unique index decides.
    let admin: AdminAccount = diesel::insert_into(adminaccount::table)
        .values(&new_admin)
        .get_result(&mut conn)
        .map_err(|e| match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => username_taken(),
            other => AppError::from(other),
        })?;

    tracing::info!(admin_id = admin.admin_id, username = %admin.username, "admin registered");

    Ok(Json(ApiResponse::ok_with_message(admin, "admin registered")))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let admin: AdminAccount = adminaccount::table
        .filter(adminaccount::username.eq(req.username.trim()))
        .first::<AdminAccount>(&mut conn)
        .optional()?
        .ok_or_else(invalid_credentials)?;

    if !auth_service::verify_password(&req.password, &admin.password)? {
        tracing::debug!(admin_id = admin.admin_id, "admin login with wrong password");
        return Err(invalid_credentials());
    }

    let token = auth_service::create_access_token(admin.admin_id, &state.jwt, state.config.jwt_ttl_secs)?;

    tracing::info!(admin_id = admin.admin_id, "admin logged in");

    Ok(Json(ApiResponse::ok(LoginResponse {
        token: token.token,
        token_type: token.token_type,
        expires_in: token.expires_in,
        admin_id: admin.admin_id,
        username: admin.username,
    })))
}

fn username_taken() -> AppError {
    AppError::new(ErrorCode::UsernameTaken, "username is already taken")
}

fn invalid_credentials() -> AppError {
    AppError::new(ErrorCode::InvalidCredentials, "invalid username or password")
}
