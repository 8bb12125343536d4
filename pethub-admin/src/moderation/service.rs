use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::models::{
    AdopterAccount, AdopterChanges, ReportChanges, ShelterAccount, ShelterChanges,
};

use super::engine::{self, AdopterPlan, ReportPlan, ShelterPlan};
use super::error::{Entity, ErrorKind, ModerationError};
use super::status::{self, AccountStatus, RegStatus, ReportStatus};
use super::store::EntityStore;

/// How a shelter write and its report cascade reach the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeMode {
    /// Two separate writes; a failed cascade leaves the shelter change in place.
    #[default]
    TwoPhase,
    /// Both writes in one transaction.
    Atomic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationOutcome {
    pub shelter_id: i32,
    pub username: String,
    pub reg_status: RegStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalOutcome {
    pub shelter_id: i32,
    pub reg_status: RegStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShelterStatusOutcome {
    pub shelter_id: i32,
    pub username: String,
    pub status: AccountStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockOutcome {
    pub shelter_id: i32,
    pub shelter_name: String,
    pub shelter_email: String,
    pub shelter_status: AccountStatus,
    pub reports_updated: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdopterStatusOutcome {
    pub adopter_id: i32,
    pub username: String,
    pub status: AccountStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOutcome {
    pub id: i32,
    pub status: ReportStatus,
}

/// Rows touched by a shelter plan.
struct Applied {
    rows: usize,
    cascaded: usize,
}

impl From<&ShelterPlan> for ShelterChanges {
    fn from(plan: &ShelterPlan) -> Self {
        Self {
            status: plan.status.map(|s| s.as_str().to_string()),
            reg_status: plan.reg_status.map(|s| s.as_str().to_string()),
        }
    }
}

impl From<&AdopterPlan> for AdopterChanges {
    fn from(plan: &AdopterPlan) -> Self {
        Self {
            status: plan.status.as_str().to_string(),
        }
    }
}

impl From<&ReportPlan> for ReportChanges {
    fn from(plan: &ReportPlan) -> Self {
        Self {
            status: plan.status.as_str().to_string(),
            admin_note: plan.note.clone(),
        }
    }
}

/// Executes moderation transitions against an injected [`EntityStore`].
///
/// Input values are validated before the store is touched; guards are
/// checked against a fresh read before anything is written.
pub struct ModerationService<S> {
    store: S,
    cascade_mode: CascadeMode,
}

impl<S: EntityStore> ModerationService<S> {
    pub fn new(store: S, cascade_mode: CascadeMode) -> Self {
        Self { store, cascade_mode }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Approve or reject a registration. Approval re-activates the account too.
    pub fn decide_registration(
        &mut self,
        shelter_id: i32,
        requested: &str,
    ) -> Result<RegistrationOutcome, ModerationError> {
        let result = self.try_decide_registration(shelter_id, requested);
        observe("decide_registration", result)
    }

    /// Guarded approval: only a pending registration moves to approved.
    pub fn approve_shelter(&mut self, shelter_id: i32) -> Result<ApprovalOutcome, ModerationError> {
        let result = self.try_approve_shelter(shelter_id);
        observe("approve_shelter", result)
    }

    /// Unguarded active/inactive setter; no report cascade.
    pub fn set_shelter_status(
        &mut self,
        shelter_id: i32,
        requested: &str,
    ) -> Result<ShelterStatusOutcome, ModerationError> {
        let result = self.try_set_shelter_status(shelter_id, requested);
        observe("set_shelter_status", result)
    }

    /// Deactivate a shelter and mark its open reports as blocked.
    pub fn block_shelter(&mut self, shelter_id: i32) -> Result<BlockOutcome, ModerationError> {
        let result = self.run_shelter_cascade(shelter_id, engine::decide_shelter_block());
        observe("block_shelter", result)
    }

    /// Reactivate a shelter and resolve the reports its block had parked.
    pub fn unblock_shelter(&mut self, shelter_id: i32) -> Result<BlockOutcome, ModerationError> {
        let result = self.run_shelter_cascade(shelter_id, engine::decide_shelter_unblock());
        observe("unblock_shelter", result)
    }

    pub fn activate_adopter(&mut self, adopter_id: i32) -> Result<AdopterStatusOutcome, ModerationError> {
        let result = self.try_activate_adopter(adopter_id);
        observe("activate_adopter", result)
    }

    pub fn set_adopter_status(
        &mut self,
        adopter_id: i32,
        requested: &str,
    ) -> Result<AdopterStatusOutcome, ModerationError> {
        let result = self.try_set_adopter_status(adopter_id, requested);
        observe("set_adopter_status", result)
    }

    pub fn set_report_status(
        &mut self,
        report_id: i32,
        requested: &str,
        note: Option<&str>,
    ) -> Result<ReportOutcome, ModerationError> {
        let result = self.try_set_report_status(report_id, requested, note);
        observe("set_report_status", result)
    }

    fn try_decide_registration(
        &mut self,
        shelter_id: i32,
        requested: &str,
    ) -> Result<RegistrationOutcome, ModerationError> {
        let plan = engine::decide_shelter_registration(requested)?;
        let shelter = self.load_shelter(shelter_id)?;
        self.apply_shelter(shelter_id, &plan)?;

        let reg_status = plan.reg_status.unwrap_or(RegStatus::Approved);
        tracing::info!(shelter_id, reg_status = %reg_status, "shelter registration decided");
        Ok(RegistrationOutcome {
            shelter_id,
            username: shelter.username,
            reg_status,
        })
    }

    fn try_approve_shelter(&mut self, shelter_id: i32) -> Result<ApprovalOutcome, ModerationError> {
        let shelter = self.load_shelter(shelter_id)?;
        let plan = engine::decide_shelter_approval(status::from_stored(&shelter.reg_status))?;
        self.apply_shelter(shelter_id, &plan)?;

        tracing::info!(shelter_id, "shelter registration approved");
        Ok(ApprovalOutcome {
            shelter_id,
            reg_status: RegStatus::Approved,
        })
    }

    // Every read happens before the write, so a store error here means nothing changed.
    fn try_set_shelter_status(
        &mut self,
        shelter_id: i32,
        requested: &str,
    ) -> Result<ShelterStatusOutcome, ModerationError> {
        let plan = engine::decide_shelter_status_set(requested)?;
        let shelter = self.load_shelter(shelter_id)?;

        let applied = self.apply_shelter(shelter_id, &plan)?;
        if applied.rows == 0 {
            return Err(ModerationError::not_found(Entity::Shelter, shelter_id));
        }

        let status = plan.status.unwrap_or(AccountStatus::Active);
        tracing::info!(shelter_id, status = %status, "shelter status set");
        Ok(ShelterStatusOutcome {
            shelter_id,
            username: shelter.username,
            status,
        })
    }

    fn try_activate_adopter(&mut self, adopter_id: i32) -> Result<AdopterStatusOutcome, ModerationError> {
        let adopter = self.load_adopter(adopter_id)?;
        let plan = engine::decide_adopter_activation(status::from_stored(&adopter.status))?;
        self.store.update_adopter(adopter_id, &AdopterChanges::from(&plan))?;

        tracing::info!(adopter_id, "adopter activated");
        Ok(AdopterStatusOutcome {
            adopter_id,
            username: adopter.username,
            status: plan.status,
        })
    }

    fn try_set_adopter_status(
        &mut self,
        adopter_id: i32,
        requested: &str,
    ) -> Result<AdopterStatusOutcome, ModerationError> {
        let plan = engine::decide_adopter_status_set(requested)?;
        let adopter = self.load_adopter(adopter_id)?;
        self.store.update_adopter(adopter_id, &AdopterChanges::from(&plan))?;

        tracing::info!(adopter_id, status = %plan.status, "adopter status set");
        Ok(AdopterStatusOutcome {
            adopter_id,
            username: adopter.username,
            status: plan.status,
        })
    }

    fn try_set_report_status(
        &mut self,
        report_id: i32,
        requested: &str,
        note: Option<&str>,
    ) -> Result<ReportOutcome, ModerationError> {
        let plan = engine::decide_report_status(requested, note)?;
        if self.store.report(report_id)?.is_none() {
            return Err(ModerationError::not_found(Entity::Report, report_id));
        }
        self.store.update_report(report_id, &ReportChanges::from(&plan))?;

        tracing::info!(report_id, status = %plan.status, noted = plan.note.is_some(), "report status set");
        Ok(ReportOutcome {
            id: report_id,
            status: plan.status,
        })
    }

    fn run_shelter_cascade(
        &mut self,
        shelter_id: i32,
        plan: ShelterPlan,
    ) -> Result<BlockOutcome, ModerationError> {
        self.load_shelter(shelter_id)?;
        let info = self
            .store
            .shelter_info(shelter_id)?
            .ok_or_else(|| ModerationError::not_found(Entity::ShelterInfo, shelter_id))?;

        let applied = self.apply_shelter(shelter_id, &plan)?;
        let shelter_status = plan.status.unwrap_or(AccountStatus::Inactive);

        tracing::info!(
            shelter_id,
            status = %shelter_status,
            reports_updated = applied.cascaded,
            "shelter status changed with report cascade"
        );
        Ok(BlockOutcome {
            shelter_id,
            shelter_name: info.shelter_name,
            shelter_email: info.shelter_email,
            shelter_status,
            reports_updated: applied.cascaded,
        })
    }

    fn apply_shelter(&mut self, shelter_id: i32, plan: &ShelterPlan) -> Result<Applied, ModerationError> {
        let changes = ShelterChanges::from(plan);
        let Some(cascade) = plan.cascade else {
            let rows = self.store.update_shelter(shelter_id, &changes)?;
            return Ok(Applied { rows, cascaded: 0 });
        };

        match self.cascade_mode {
            CascadeMode::TwoPhase => {
                let rows = self.store.update_shelter(shelter_id, &changes)?;
                let cascaded = self
                    .store
                    .update_shelter_reports(shelter_id, cascade.from, cascade.to)
                    .map_err(|source| ModerationError::CascadeFailed { shelter_id, source })?;
                Ok(Applied { rows, cascaded })
            }
            CascadeMode::Atomic => self.store.transaction(|store| {
                let rows = store.update_shelter(shelter_id, &changes)?;
                let cascaded = store.update_shelter_reports(shelter_id, cascade.from, cascade.to)?;
                Ok::<_, ModerationError>(Applied { rows, cascaded })
            }),
        }
    }

    fn load_shelter(&mut self, shelter_id: i32) -> Result<ShelterAccount, ModerationError> {
        self.store
            .shelter(shelter_id)?
            .ok_or_else(|| ModerationError::not_found(Entity::Shelter, shelter_id))
    }

    fn load_adopter(&mut self, adopter_id: i32) -> Result<AdopterAccount, ModerationError> {
        self.store
            .adopter(adopter_id)?
            .ok_or_else(|| ModerationError::not_found(Entity::Adopter, adopter_id))
    }
}

fn observe<T>(operation: &'static str, result: Result<T, ModerationError>) -> Result<T, ModerationError> {
    let outcome = match &result {
        Ok(_) => "applied",
        Err(ModerationError::CascadeFailed { .. }) => "cascade_failed",
        Err(err) => err.kind().as_str(),
    };
    counter!("moderation_transitions_total", "operation" => operation, "outcome" => outcome).increment(1);

    if let Err(err) = &result {
        match err.kind() {
            ErrorKind::Store => {}
            _ => tracing::debug!(operation, error = %err, "moderation transition refused"),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderation::memory::MemoryStore;
    use crate::moderation::engine::Rejection;

    fn service(store: MemoryStore) -> ModerationService<MemoryStore> {
        ModerationService::new(store, CascadeMode::TwoPhase)
    }

    #[test]
    fn approving_a_pending_registration_activates_the_shelter() {
        let mut svc = service(MemoryStore::new().with_shelter(1, "inactive", "pending"));

        let outcome = svc.decide_registration(1, "approved").unwrap();
        assert_eq!(outcome.reg_status, RegStatus::Approved);
        assert_eq!(outcome.username, "shelter1");

        let row = svc.store().shelter_row(1);
        assert_eq!(row.reg_status, "approved");
        assert_eq!(row.status, "active");
    }

    #[test]
    fn rejecting_a_registration_keeps_account_status() {
        let mut svc = service(MemoryStore::new().with_shelter(1, "inactive", "pending"));

        svc.decide_registration(1, "rejected").unwrap();
        let row = svc.store().shelter_row(1);
        assert_eq!(row.reg_status, "rejected");
        assert_eq!(row.status, "inactive");
    }

    #[test]
    fn registration_decision_can_be_repeated() {
        let mut svc = service(MemoryStore::new().with_shelter(1, "active", "approved"));
        assert!(svc.decide_registration(1, "approved").is_ok());
        assert_eq!(svc.store().writes, 1);
    }

    #[test]
    fn invalid_registration_value_never_reaches_the_store() {
        let mut svc = service(MemoryStore::new().with_shelter(1, "active", "pending"));
        let err = svc.decide_registration(1, "maybe").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(svc.store().calls, 0);
    }

    #[test]
    fn registration_for_unknown_shelter_is_not_found() {
        let mut svc = service(MemoryStore::new());
        let err = svc.decide_registration(5, "approved").unwrap_err();
        assert!(matches!(err, ModerationError::NotFound { entity: Entity::Shelter, id: 5 }));
        assert_eq!(svc.store().writes, 0);
    }

    #[test]
    fn guarded_approval_succeeds_once_then_conflicts() {
        let mut svc = service(MemoryStore::new().with_shelter(3, "inactive", "pending"));

        svc.approve_shelter(3).unwrap();
        assert_eq!(svc.store().shelter_row(3).reg_status, "approved");
        // this path does not touch the account status
        assert_eq!(svc.store().shelter_row(3).status, "inactive");

        let err = svc.approve_shelter(3).unwrap_err();
        assert!(matches!(err, ModerationError::Rejected(Rejection::AlreadyApproved)));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(svc.store().writes, 1);
    }

    #[test]
    fn guarded_approval_of_rejected_shelter_is_not_pending() {
        let mut svc = service(MemoryStore::new().with_shelter(3, "active", "rejected"));
        let err = svc.approve_shelter(3).unwrap_err();
        assert!(matches!(err, ModerationError::Rejected(Rejection::NotPending)));
        assert_eq!(svc.store().writes, 0);
    }

    #[test]
    fn shelter_setter_is_case_insensitive() {
        let mut svc = service(MemoryStore::new().with_shelter(2, "active", "approved").with_report(10, 2, "reported"));

        let outcome = svc.set_shelter_status(2, "Inactive").unwrap();
        assert_eq!(outcome.status, AccountStatus::Inactive);
        assert_eq!(svc.store().shelter_row(2).status, "inactive");
        // no cascade, unlike block
        assert_eq!(svc.store().report_status(10), "reported");
    }

    #[test]
    fn shelter_setter_on_missing_row_is_not_found() {
        let mut svc = service(MemoryStore::new());
        let err = svc.set_shelter_status(8, "active").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn shelter_setter_succeeds_without_reading_after_the_write() {
        let mut store = MemoryStore::new().with_shelter(2, "active", "approved");
        store.fail_reads_after_write = true;
        let mut svc = service(store);

        let outcome = svc.set_shelter_status(2, "inactive").unwrap();
        assert_eq!(outcome.status, AccountStatus::Inactive);
        assert_eq!(outcome.username, "shelter2");
        assert_eq!(svc.store().shelter_row(2).status, "inactive");
        assert_eq!(svc.store().writes, 1);
    }

    #[test]
    fn shelter_setter_on_missing_row_writes_nothing() {
        let mut svc = service(MemoryStore::new());
        svc.set_shelter_status(8, "inactive").unwrap_err();
        assert_eq!(svc.store().writes, 0);
    }

    #[test]
    fn unguarded_setter_rejects_unknown_value_without_writing() {
        let mut svc = service(MemoryStore::new().with_shelter(2, "active", "approved").with_adopter(4, "active"));

        assert_eq!(svc.set_shelter_status(2, "banned").unwrap_err().kind(), ErrorKind::InvalidValue);
        assert_eq!(svc.set_adopter_status(4, "banned").unwrap_err().kind(), ErrorKind::InvalidValue);
        assert_eq!(svc.store().calls, 0);
        assert_eq!(svc.store().shelter_row(2).status, "active");
    }

    #[test]
    fn block_cascades_only_reported_reports_of_that_shelter() {
        let store = MemoryStore::new()
            .with_shelter(1, "active", "approved")
            .with_shelter(2, "active", "approved")
            .with_report(10, 1, "reported")
            .with_report(11, 1, "reported")
            .with_report(12, 1, "reviewed")
            .with_report(13, 2, "reported");
        let mut svc = service(store);

        let outcome = svc.block_shelter(1).unwrap();
        assert_eq!(outcome.shelter_status, AccountStatus::Inactive);
        assert_eq!(outcome.reports_updated, 2);
        assert_eq!(outcome.shelter_name, "Shelter 1");
        assert_eq!(outcome.shelter_email, "shelter1@example.com");

        let store = svc.store();
        assert_eq!(store.shelter_row(1).status, "inactive");
        assert_eq!(store.report_status(10), "blocked");
        assert_eq!(store.report_status(11), "blocked");
        assert_eq!(store.report_status(12), "reviewed");
        assert_eq!(store.report_status(13), "reported");
    }

    #[test]
    fn block_then_unblock_scenario() {
        let store = MemoryStore::new()
            .with_shelter(42, "active", "approved")
            .with_report(1, 42, "reported")
            .with_report(2, 42, "resolved");
        let mut svc = service(store);

        svc.block_shelter(42).unwrap();
        assert_eq!(svc.store().shelter_row(42).status, "inactive");
        assert_eq!(svc.store().report_status(1), "blocked");
        assert_eq!(svc.store().report_status(2), "resolved");

        let outcome = svc.unblock_shelter(42).unwrap();
        assert_eq!(outcome.shelter_status, AccountStatus::Active);
        assert_eq!(outcome.reports_updated, 1);
        assert_eq!(svc.store().shelter_row(42).status, "active");
        assert_eq!(svc.store().report_status(1), "resolved");
        assert_eq!(svc.store().report_status(2), "resolved");
    }

    #[test]
    fn reblocking_does_not_resurrect_resolved_reports() {
        let store = MemoryStore::new()
            .with_shelter(7, "active", "approved")
            .with_report(1, 7, "reported")
            .with_report(2, 7, "pending");
        let mut svc = service(store);

        svc.block_shelter(7).unwrap();
        svc.unblock_shelter(7).unwrap();
        // a new report arrives after the round trip
        let store = std::mem::take(svc.store_mut()).with_report(3, 7, "reported");
        *svc.store_mut() = store;

        let outcome = svc.block_shelter(7).unwrap();
        assert_eq!(outcome.reports_updated, 1);
        assert_eq!(svc.store().report_status(1), "resolved");
        assert_eq!(svc.store().report_status(2), "pending");
        assert_eq!(svc.store().report_status(3), "blocked");
    }

    #[test]
    fn block_requires_shelter_info() {
        let mut svc = service(MemoryStore::new().with_shelter(1, "active", "approved").without_shelter_info(1));
        let err = svc.block_shelter(1).unwrap_err();
        assert!(matches!(err, ModerationError::NotFound { entity: Entity::ShelterInfo, .. }));
        assert_eq!(svc.store().writes, 0);
    }

    #[test]
    fn block_unknown_shelter_is_not_found() {
        let mut svc = service(MemoryStore::new());
        assert_eq!(svc.unblock_shelter(1).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn two_phase_cascade_failure_keeps_primary_change() {
        let mut store = MemoryStore::new()
            .with_shelter(1, "active", "approved")
            .with_report(10, 1, "reported");
        store.fail_cascades = true;
        let mut svc = service(store);

        let err = svc.block_shelter(1).unwrap_err();
        assert!(matches!(err, ModerationError::CascadeFailed { shelter_id: 1, .. }));
        assert_eq!(svc.store().shelter_row(1).status, "inactive");
        assert_eq!(svc.store().report_status(10), "reported");
    }

    #[test]
    fn atomic_cascade_failure_rolls_back_everything() {
        let mut store = MemoryStore::new()
            .with_shelter(1, "active", "approved")
            .with_report(10, 1, "reported");
        store.fail_cascades = true;
        let mut svc = ModerationService::new(store, CascadeMode::Atomic);

        let err = svc.block_shelter(1).unwrap_err();
        assert!(matches!(err, ModerationError::Store(_)));
        assert_eq!(svc.store().shelter_row(1).status, "active");
        assert_eq!(svc.store().report_status(10), "reported");
    }

    #[test]
    fn atomic_mode_applies_both_writes() {
        let store = MemoryStore::new()
            .with_shelter(1, "active", "approved")
            .with_report(10, 1, "reported");
        let mut svc = ModerationService::new(store, CascadeMode::Atomic);

        assert_eq!(svc.block_shelter(1).unwrap().reports_updated, 1);
        assert_eq!(svc.store().report_status(10), "blocked");
    }

    #[test]
    fn primary_write_failure_skips_cascade() {
        let mut store = MemoryStore::new()
            .with_shelter(1, "active", "approved")
            .with_report(10, 1, "reported");
        store.fail_primary_writes = true;
        let mut svc = service(store);

        let err = svc.block_shelter(1).unwrap_err();
        assert!(matches!(err, ModerationError::Store(_)));
        assert_eq!(svc.store().report_status(10), "reported");
    }

    #[test]
    fn activating_inactive_adopter() {
        let mut svc = service(MemoryStore::new().with_adopter(4, "inactive"));
        let outcome = svc.activate_adopter(4).unwrap();
        assert_eq!(outcome.status, AccountStatus::Active);
        assert_eq!(outcome.username, "adopter4");
        assert_eq!(svc.store().adopter_row(4).status, "active");
    }

    #[test]
    fn activating_active_adopter_conflicts_without_writing() {
        let mut svc = service(MemoryStore::new().with_adopter(4, "active"));
        let err = svc.activate_adopter(4).unwrap_err();
        assert!(matches!(err, ModerationError::Rejected(Rejection::AlreadyActive)));
        assert_eq!(svc.store().writes, 0);
    }

    #[test]
    fn activating_adopter_in_unknown_state_is_not_inactive() {
        let mut svc = service(MemoryStore::new().with_adopter(4, "suspended"));
        let err = svc.activate_adopter(4).unwrap_err();
        assert!(matches!(err, ModerationError::Rejected(Rejection::NotInactive)));
    }

    // Guard asymmetry: the free-form setter accepts what activation refuses.
    #[test]
    fn adopter_setter_bypasses_activation_guard() {
        let mut svc = service(MemoryStore::new().with_adopter(4, "active"));
        assert!(svc.set_adopter_status(4, "active").is_ok());
        assert_eq!(svc.store().writes, 1);

        assert!(svc.set_adopter_status(4, "inactive").is_ok());
        assert_eq!(svc.store().adopter_row(4).status, "inactive");
    }

    #[test]
    fn adopter_setter_unknown_adopter() {
        let mut svc = service(MemoryStore::new());
        let err = svc.set_adopter_status(9, "inactive").unwrap_err();
        assert!(matches!(err, ModerationError::NotFound { entity: Entity::Adopter, id: 9 }));
    }

    #[test]
    fn report_status_ignores_current_state_and_attaches_note() {
        let mut svc = service(MemoryStore::new().with_report(5, 1, "blocked"));

        let outcome = svc.set_report_status(5, "pending", Some("reopened")).unwrap();
        assert_eq!(outcome, ReportOutcome { id: 5, status: ReportStatus::Pending });
        assert_eq!(svc.store().report_row(5).admin_note.as_deref(), Some("reopened"));

        svc.set_report_status(5, "resolved", None).unwrap();
        let row = svc.store().report_row(5);
        assert_eq!(row.status, "resolved");
        assert_eq!(row.admin_note.as_deref(), Some("reopened"));
    }

    #[test]
    fn report_status_cannot_be_set_to_cascade_states() {
        let mut svc = service(MemoryStore::new().with_report(5, 1, "reported"));
        assert_eq!(svc.set_report_status(5, "blocked", None).unwrap_err().kind(), ErrorKind::InvalidValue);
        assert_eq!(svc.store().calls, 0);
    }

    #[test]
    fn report_status_unknown_report() {
        let mut svc = service(MemoryStore::new());
        let err = svc.set_report_status(5, "reviewed", None).unwrap_err();
        assert!(matches!(err, ModerationError::NotFound { entity: Entity::Report, id: 5 }));
    }
}
