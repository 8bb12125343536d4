//! Handlers for the state-changing admin endpoints. Each one checks out a
//! store, runs a single [`ModerationService`] operation and wraps the outcome.
//!
//! [`ModerationService`]: crate::moderation::ModerationService

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use pethub_shared::errors::AppResult;
use pethub_shared::middleware::AdminUser;
use pethub_shared::types::ApiResponse;

use crate::moderation::{
    AdopterStatusOutcome, ApprovalOutcome, BlockOutcome, RegistrationOutcome, ReportOutcome,
    ShelterStatusOutcome,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegistrationRequest {
    pub shelter_id: i32,
    pub reg_status: String,
}

#[derive(Debug, Deserialize)]
pub struct ShelterStatusRequest {
    pub shelter_id: i32,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct AdopterStatusRequest {
    pub adopter_id: i32,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportStatusRequest {
    pub status: String,
    pub admin_note: Option<String>,
}

// --- Shelters ---

pub async fn decide_registration(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(req): Json<RegistrationRequest>,
) -> AppResult<Json<ApiResponse<RegistrationOutcome>>> {
    tracing::debug!(admin_id = admin.id, shelter_id = req.shelter_id, "registration decision requested");
    let outcome = state.moderation()?.decide_registration(req.shelter_id, &req.reg_status)?;
    let message = format!("shelter registration {}", outcome.reg_status);
    Ok(Json(ApiResponse::ok_with_message(outcome, message)))
}

pub async fn approve_shelter(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(shelter_id): Path<i32>,
) -> AppResult<Json<ApiResponse<ApprovalOutcome>>> {
    let outcome = state.moderation()?.approve_shelter(shelter_id)?;
    Ok(Json(ApiResponse::ok_with_message(outcome, "shelter approved")))
}

pub async fn set_shelter_status(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(req): Json<ShelterStatusRequest>,
) -> AppResult<Json<ApiResponse<ShelterStatusOutcome>>> {
    let outcome = state.moderation()?.set_shelter_status(req.shelter_id, &req.status)?;
    Ok(Json(ApiResponse::ok(outcome)))
}

pub async fn block_shelter(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(shelter_id): Path<i32>,
) -> AppResult<Json<ApiResponse<BlockOutcome>>> {
    tracing::debug!(admin_id = admin.id, shelter_id, "shelter block requested");
    let outcome = state.moderation()?.block_shelter(shelter_id)?;
    Ok(Json(ApiResponse::ok_with_message(outcome, "shelter blocked")))
}

pub async fn unblock_shelter(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(shelter_id): Path<i32>,
) -> AppResult<Json<ApiResponse<BlockOutcome>>> {
    tracing::debug!(admin_id = admin.id, shelter_id, "shelter unblock requested");
    let outcome = state.moderation()?.unblock_shelter(shelter_id)?;
    Ok(Json(ApiResponse::ok_with_message(outcome, "shelter unblocked")))
}

// --- Adopters ---

pub async fn activate_adopter(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(adopter_id): Path<i32>,
) -> AppResult<Json<ApiResponse<AdopterStatusOutcome>>> {
    let outcome = state.moderation()?.activate_adopter(adopter_id)?;
    Ok(Json(ApiResponse::ok_with_message(outcome, "adopter activated")))
}

pub async fn set_adopter_status(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(req): Json<AdopterStatusRequest>,
) -> AppResult<Json<ApiResponse<AdopterStatusOutcome>>> {
    let outcome = state.moderation()?.set_adopter_status(req.adopter_id, &req.status)?;
    Ok(Json(ApiResponse::ok(outcome)))
}

// --- Reports ---

pub async fn set_report_status(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(report_id): Path<i32>,
    Json(req): Json<ReportStatusRequest>,
) -> AppResult<Json<ApiResponse<ReportOutcome>>> {
    let outcome = state
        .moderation()?
        .set_report_status(report_id, &req.status, req.admin_note.as_deref())?;
    Ok(Json(ApiResponse::ok_with_message(outcome, "report status updated")))
}
