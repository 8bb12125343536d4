use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;

use pethub_shared::errors::{AppError, AppResult};
use pethub_shared::middleware::AdminUser;
use pethub_shared::types::ApiResponse;

use crate::moderation::{AccountStatus, RegStatus};
use crate::schema::{adopteraccount, shelteraccount};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub active_shelters: i64,
    pub adopters: i64,
    pub pending_shelters: i64,
    pub approved_shelters: i64,
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let active_shelters: i64 = shelteraccount::table
        .filter(shelteraccount::status.eq(AccountStatus::Active.as_str()))
        .count()
        .get_result(&mut conn)?;

    let adopters: i64 = adopteraccount::table.count().get_result(&mut conn)?;

    let pending_shelters: i64 = shelteraccount::table
        .filter(shelteraccount::reg_status.eq(RegStatus::Pending.as_str()))
        .count()
        .get_result(&mut conn)?;

    let approved_shelters: i64 = shelteraccount::table
        .filter(shelteraccount::reg_status.eq(RegStatus::Approved.as_str()))
        .count()
        .get_result(&mut conn)?;

    Ok(Json(ApiResponse::ok(DashboardStats {
        active_shelters,
        adopters,
        pending_shelters,
        approved_shelters,
    })))
}
