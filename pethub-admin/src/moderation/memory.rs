//! In-memory [`EntityStore`] for unit tests, with write counting and
//! failure injection.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::models::{
    AdopterAccount, AdopterChanges, ReportChanges, ShelterAccount, ShelterChanges, ShelterInfo,
    SubmittedReport,
};

use super::error::StoreError;
use super::status::ReportStatus;
use super::store::EntityStore;

#[derive(Debug, Clone, Default)]
struct Tables {
    shelters: BTreeMap<i32, ShelterAccount>,
    shelter_infos: BTreeMap<i32, ShelterInfo>,
    adopters: BTreeMap<i32, AdopterAccount>,
    reports: BTreeMap<i32, SubmittedReport>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Tables,
    /// Store calls of any kind.
    pub calls: usize,
    /// Update statements issued, including ones that matched no rows.
    pub writes: usize,
    pub fail_primary_writes: bool,
    pub fail_cascades: bool,
    /// Reads fail once any write has gone through.
    pub fail_reads_after_write: bool,
}

fn injected() -> StoreError {
    StoreError::Database(diesel::result::Error::QueryBuilderError("injected failure".into()))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shelter(mut self, id: i32, status: &str, reg_status: &str) -> Self {
        self.tables.shelters.insert(
            id,
            ShelterAccount {
                shelter_id: id,
                username: format!("shelter{id}"),
                password: "hash".into(),
                status: status.into(),
                reg_status: reg_status.into(),
                created_at: Utc::now(),
            },
        );
        self.tables.shelter_infos.insert(
            id,
            ShelterInfo {
                shelter_id: id,
                shelter_name: format!("Shelter {id}"),
                shelter_address: String::new(),
                shelter_landmark: String::new(),
                shelter_contact: String::new(),
                shelter_email: format!("shelter{id}@example.com"),
                shelter_owner: String::new(),
                shelter_description: String::new(),
                shelter_social: String::new(),
            },
        );
        self
    }

    pub fn without_shelter_info(mut self, id: i32) -> Self {
        self.tables.shelter_infos.remove(&id);
        self
    }

    pub fn with_adopter(mut self, id: i32, status: &str) -> Self {
        self.tables.adopters.insert(
            id,
            AdopterAccount {
                adopter_id: id,
                username: format!("adopter{id}"),
                password: "hash".into(),
                status: status.into(),
                created_at: Utc::now(),
            },
        );
        self
    }

    pub fn with_report(mut self, id: i32, shelter_id: i32, status: &str) -> Self {
        self.tables.reports.insert(
            id,
            SubmittedReport {
                id,
                shelter_id,
                adopter_id: 1,
                reason: "reason".into(),
                description: "description".into(),
                status: status.into(),
                admin_note: None,
                created_at: Utc::now(),
            },
        );
        self
    }

    pub fn shelter_row(&self, id: i32) -> &ShelterAccount {
        &self.tables.shelters[&id]
    }

    pub fn adopter_row(&self, id: i32) -> &AdopterAccount {
        &self.tables.adopters[&id]
    }

    pub fn report_row(&self, id: i32) -> &SubmittedReport {
        &self.tables.reports[&id]
    }

    pub fn report_status(&self, id: i32) -> &str {
        &self.report_row(id).status
    }

    fn read(&mut self) -> Result<(), StoreError> {
        self.calls += 1;
        if self.fail_reads_after_write && self.writes > 0 {
            return Err(injected());
        }
        Ok(())
    }

    fn write(&mut self) -> Result<(), StoreError> {
        self.calls += 1;
        if self.fail_primary_writes {
            return Err(injected());
        }
        self.writes += 1;
        Ok(())
    }
}

impl EntityStore for MemoryStore {
    fn shelter(&mut self, id: i32) -> Result<Option<ShelterAccount>, StoreError> {
        self.read()?;
        Ok(self.tables.shelters.get(&id).cloned())
    }

    fn shelter_info(&mut self, id: i32) -> Result<Option<ShelterInfo>, StoreError> {
        self.read()?;
        Ok(self.tables.shelter_infos.get(&id).cloned())
    }

    fn adopter(&mut self, id: i32) -> Result<Option<AdopterAccount>, StoreError> {
        self.read()?;
        Ok(self.tables.adopters.get(&id).cloned())
    }

    fn report(&mut self, id: i32) -> Result<Option<SubmittedReport>, StoreError> {
        self.read()?;
        Ok(self.tables.reports.get(&id).cloned())
    }

    fn update_shelter(&mut self, id: i32, changes: &ShelterChanges) -> Result<usize, StoreError> {
        self.write()?;
        let Some(row) = self.tables.shelters.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(status) = &changes.status {
            row.status = status.clone();
        }
        if let Some(reg_status) = &changes.reg_status {
            row.reg_status = reg_status.clone();
        }
        Ok(1)
    }

    fn update_adopter(&mut self, id: i32, changes: &AdopterChanges) -> Result<usize, StoreError> {
        self.write()?;
        let Some(row) = self.tables.adopters.get_mut(&id) else {
            return Ok(0);
        };
        row.status = changes.status.clone();
        Ok(1)
    }

    fn update_report(&mut self, id: i32, changes: &ReportChanges) -> Result<usize, StoreError> {
        self.write()?;
        let Some(row) = self.tables.reports.get_mut(&id) else {
            return Ok(0);
        };
        row.status = changes.status.clone();
        if changes.admin_note.is_some() {
            row.admin_note = changes.admin_note.clone();
        }
        Ok(1)
    }

    fn update_shelter_reports(
        &mut self,
        shelter_id: i32,
        from: ReportStatus,
        to: ReportStatus,
    ) -> Result<usize, StoreError> {
        self.calls += 1;
        if self.fail_cascades {
            return Err(injected());
        }
        self.writes += 1;
        let mut rows = 0;
        for report in self.tables.reports.values_mut() {
            if report.shelter_id == shelter_id && report.status == from.as_str() {
                report.status = to.as_str().to_string();
                rows += 1;
            }
        }
        Ok(rows)
    }

    fn transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<StoreError>,
    {
        let snapshot = self.tables.clone();
        let result = f(self);
        if result.is_err() {
            self.tables = snapshot;
        }
        result
    }
}
