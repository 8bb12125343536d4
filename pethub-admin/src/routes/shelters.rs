//! Public shelter directory.

use axum::extract::{Path, State};
use axum::Json;
use diesel::prelude::*;
use std::sync::Arc;

use pethub_shared::errors::{AppError, AppResult, ErrorCode};
use pethub_shared::types::{ApiResponse, Listing};

use crate::models::ShelterInfo;
use crate::schema::shelterinfo;
use crate::AppState;

pub async fn list_shelters(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<Listing<ShelterInfo>>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let shelters = shelterinfo::table
        .order(shelterinfo::shelter_id.asc())
        .load::<ShelterInfo>(&mut conn)?;

    Ok(Json(ApiResponse::ok(Listing::new(shelters))))
}

pub async fn get_shelter(
    State(state): State<Arc<AppState>>,
    Path(shelter_id): Path<i32>,
) -> AppResult<Json<ApiResponse<ShelterInfo>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let shelter = shelterinfo::table
        .find(shelter_id)
        .first::<ShelterInfo>(&mut conn)
        .optional()?
        .ok_or_else(|| AppError::new(ErrorCode::ShelterNotFound, "shelter not found"))?;

    Ok(Json(ApiResponse::ok(shelter)))
}
