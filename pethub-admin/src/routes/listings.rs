use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use pethub_shared::errors::{AppError, AppResult};
use pethub_shared::middleware::AdminUser;
use pethub_shared::types::{ApiResponse, Listing};

use crate::models::{AdopterAccount, AdopterInfo, ShelterAccount, ShelterInfo, SubmittedReport};
use crate::moderation::{AccountStatus, RegStatus, ReportStatus};
use crate::schema::{
    adopteraccount, adopterinfo, shelteraccount, shelterinfo, sheltermedia, submittedreports,
};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ShelterListItem {
    #[serde(flatten)]
    pub account: ShelterAccount,
    pub info: ShelterInfo,
}

#[derive(Debug, Serialize)]
pub struct AdopterListItem {
    #[serde(flatten)]
    pub account: AdopterAccount,
    pub info: AdopterInfo,
}

#[derive(Debug, Serialize)]
pub struct ReportedBy {
    pub adopter_id: i32,
    pub adopter_name: String,
    pub adopter_email: String,
}

#[derive(Debug, Serialize)]
pub struct ReportEntry {
    pub id: i32,
    pub reason: String,
    pub description: String,
    pub status: String,
    pub created_at: String,
    pub reported_by: ReportedBy,
}

#[derive(Debug, Serialize)]
pub struct ShelterReports {
    pub shelter_id: i32,
    pub shelter_name: String,
    pub shelter_email: String,
    pub shelter_status: String,
    pub shelter_profile: Option<String>,
    pub total_reports: usize,
    pub reports: Vec<ReportEntry>,
}

/// One report joined with the shelter and adopter it refers to.
#[derive(Debug)]
pub(crate) struct ReportRow {
    report: SubmittedReport,
    shelter_name: String,
    shelter_email: String,
    shelter_status: String,
    shelter_profile: Option<String>,
    adopter_name: String,
    adopter_email: String,
}

type ReportTuple = (SubmittedReport, String, String, String, Option<String>, String, String, String);

impl From<ReportTuple> for ReportRow {
    fn from(
        (report, shelter_name, shelter_email, shelter_status, shelter_profile, first, last, adopter_email): ReportTuple,
    ) -> Self {
        Self {
            report,
            shelter_name,
            shelter_email,
            shelter_status,
            shelter_profile,
            adopter_name: format!("{first} {last}").trim().to_string(),
            adopter_email,
        }
    }
}

// --- Shelters ---

pub async fn pending_shelters(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<Listing<ShelterListItem>>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let rows = shelteraccount::table
        .inner_join(shelterinfo::table)
        .filter(shelteraccount::reg_status.eq(RegStatus::Pending.as_str()))
        .order(shelteraccount::created_at.asc())
        .load::<(ShelterAccount, ShelterInfo)>(&mut conn)?;

    Ok(Json(ApiResponse::ok(Listing::new(shelter_items(rows)))))
}

pub async fn all_shelters(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<Listing<ShelterListItem>>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let rows = shelteraccount::table
        .inner_join(shelterinfo::table)
        .order(shelteraccount::shelter_id.asc())
        .load::<(ShelterAccount, ShelterInfo)>(&mut conn)?;

    Ok(Json(ApiResponse::ok(Listing::new(shelter_items(rows)))))
}

fn shelter_items(rows: Vec<(ShelterAccount, ShelterInfo)>) -> Vec<ShelterListItem> {
    rows.into_iter()
        .map(|(account, info)| ShelterListItem { account, info })
        .collect()
}

// --- Adopters ---

pub async fn all_adopters(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<Listing<AdopterListItem>>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let rows = adopteraccount::table
        .inner_join(adopterinfo::table)
        .order(adopteraccount::adopter_id.asc())
        .load::<(AdopterAccount, AdopterInfo)>(&mut conn)?;

    Ok(Json(ApiResponse::ok(Listing::new(adopter_items(rows)))))
}

pub async fn inactive_adopters(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<Listing<AdopterListItem>>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let rows = adopteraccount::table
        .inner_join(adopterinfo::table)
        .filter(adopteraccount::status.eq(AccountStatus::Inactive.as_str()))
        .order(adopteraccount::adopter_id.asc())
        .load::<(AdopterAccount, AdopterInfo)>(&mut conn)?;

    Ok(Json(ApiResponse::ok(Listing::new(adopter_items(rows)))))
}

fn adopter_items(rows: Vec<(AdopterAccount, AdopterInfo)>) -> Vec<AdopterListItem> {
    rows.into_iter()
        .map(|(account, info)| AdopterListItem { account, info })
        .collect()
}

// --- Reports ---

/// Open reports against shelters that are still active.
pub async fn reported_shelters(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<Listing<ShelterReports>>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;
    let rows = load_reports(&mut conn, ReportStatus::Reported, AccountStatus::Active)?;
    Ok(Json(ApiResponse::ok(Listing::new(group_reports(rows)))))
}

/// Reports parked by a block, grouped by the inactive shelter.
pub async fn blocked_shelters(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<Listing<ShelterReports>>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;
    let rows = load_reports(&mut conn, ReportStatus::Blocked, AccountStatus::Inactive)?;
    Ok(Json(ApiResponse::ok(Listing::new(group_reports(rows)))))
}

// Inner joins drop reports whose shelter info or adopter info is missing.
fn load_reports(
    conn: &mut PgConnection,
    report_status: ReportStatus,
    shelter_status: AccountStatus,
) -> Result<Vec<ReportRow>, diesel::result::Error> {
    let rows = submittedreports::table
        .inner_join(shelteraccount::table.on(shelteraccount::shelter_id.eq(submittedreports::shelter_id)))
        .inner_join(shelterinfo::table.on(shelterinfo::shelter_id.eq(submittedreports::shelter_id)))
        .inner_join(adopterinfo::table.on(adopterinfo::adopter_id.eq(submittedreports::adopter_id)))
        .left_join(sheltermedia::table.on(sheltermedia::shelter_id.eq(submittedreports::shelter_id)))
        .filter(submittedreports::status.eq(report_status.as_str()))
        .filter(shelteraccount::status.eq(shelter_status.as_str()))
        .order((submittedreports::shelter_id.asc(), submittedreports::created_at.desc()))
        .select((
            submittedreports::all_columns,
            shelterinfo::shelter_name,
            shelterinfo::shelter_email,
            shelteraccount::status,
            sheltermedia::shelter_profile.nullable(),
            adopterinfo::first_name,
            adopterinfo::last_name,
            adopterinfo::email,
        ))
        .load::<ReportTuple>(conn)?;

    Ok(rows.into_iter().map(ReportRow::from).collect())
}

pub(crate) fn group_reports(rows: Vec<ReportRow>) -> Vec<ShelterReports> {
    let mut groups: BTreeMap<i32, ShelterReports> = BTreeMap::new();

    for row in rows {
        let group = groups
            .entry(row.report.shelter_id)
            .or_insert_with(|| ShelterReports {
                shelter_id: row.report.shelter_id,
                shelter_name: row.shelter_name.clone(),
                shelter_email: row.shelter_email.clone(),
                shelter_status: row.shelter_status.clone(),
                shelter_profile: row.shelter_profile.clone(),
                total_reports: 0,
                reports: Vec::new(),
            });

        group.total_reports += 1;
        group.reports.push(ReportEntry {
            id: row.report.id,
            reason: clean_string(&row.report.reason),
            description: clean_string(&row.report.description),
            status: row.report.status,
            created_at: format_created_at(row.report.created_at),
            reported_by: ReportedBy {
                adopter_id: row.report.adopter_id,
                adopter_name: row.adopter_name,
                adopter_email: row.adopter_email,
            },
        });
    }

    groups.into_values().collect()
}

/// Strip the JSON punctuation some clients leave in free-text fields.
pub(crate) fn clean_string(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '{' | '}' | '"'))
        .collect::<String>()
        .trim()
        .to_string()
}

pub(crate) fn format_created_at(at: DateTime<Utc>) -> String {
    at.format("%m-%d-%Y %I:%M %p").to_string()
}
