use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

use crate::schema::{
    adminaccount, adopteraccount, adopterinfo, shelteraccount, shelterinfo, submittedreports,
};

// --- AdminAccount ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = adminaccount, primary_key(admin_id))]
pub struct AdminAccount {
    pub admin_id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = adminaccount)]
pub struct NewAdminAccount {
    pub username: String,
    pub password: String,
}

// --- Shelter ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = shelteraccount, primary_key(shelter_id))]
pub struct ShelterAccount {
    pub shelter_id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub status: String,
    pub reg_status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = shelterinfo, primary_key(shelter_id))]
pub struct ShelterInfo {
    pub shelter_id: i32,
    pub shelter_name: String,
    pub shelter_address: String,
    pub shelter_landmark: String,
    pub shelter_contact: String,
    pub shelter_email: String,
    pub shelter_owner: String,
    pub shelter_description: String,
    pub shelter_social: String,
}

/// Partial update of a shelter account; `None` columns are left untouched.
#[derive(Debug, Default, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = shelteraccount)]
pub struct ShelterChanges {
    pub status: Option<String>,
    pub reg_status: Option<String>,
}

// --- Adopter ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = adopteraccount, primary_key(adopter_id))]
pub struct AdopterAccount {
    pub adopter_id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = adopterinfo, primary_key(adopter_id))]
pub struct AdopterInfo {
    pub adopter_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub sex: String,
    pub address: String,
    pub contact_number: String,
    pub email: String,
    pub occupation: String,
    pub civil_status: String,
    pub social_media: String,
}

#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = adopteraccount)]
pub struct AdopterChanges {
    pub status: String,
}

// --- SubmittedReport ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = submittedreports)]
pub struct SubmittedReport {
    pub id: i32,
    pub shelter_id: i32,
    pub adopter_id: i32,
    pub reason: String,
    pub description: String,
    pub status: String,
    pub admin_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = submittedreports)]
pub struct ReportChanges {
    pub status: String,
    pub admin_note: Option<String>,
}
