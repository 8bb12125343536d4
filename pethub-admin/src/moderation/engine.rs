//! Transition rules for shelters, adopters and reports.
//!
//! Every function here is pure: it looks at the current state (only where a
//! guard needs it) and the requested value, and either returns the plan of
//! writes to perform or the reason the transition is refused. Storage is the
//! service's business.

use super::status::{AccountStatus, RegStatus, ReportStatus};

const REG_DECISIONS: &[&str] = &["approved", "rejected"];
const REPORT_TARGETS: &[&str] = &["pending", "reviewed", "resolved"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("{field} must be one of: {}", .expected.join(", "))]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: &'static [&'static str],
    },
    #[error("shelter is already approved")]
    AlreadyApproved,
    #[error("shelter registration is not pending")]
    NotPending,
    #[error("adopter is already active")]
    AlreadyActive,
    #[error("adopter status is not inactive")]
    NotInactive,
}

impl Rejection {
    fn invalid(field: &'static str, value: &str, expected: &'static [&'static str]) -> Self {
        Rejection::InvalidValue {
            field,
            value: value.to_string(),
            expected,
        }
    }

    /// Guard violations, as opposed to malformed input.
    pub fn is_conflict(&self) -> bool {
        !matches!(self, Rejection::InvalidValue { .. })
    }
}

/// Bulk move of one shelter's reports from one status to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cascade {
    pub from: ReportStatus,
    pub to: ReportStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelterPlan {
    pub status: Option<AccountStatus>,
    pub reg_status: Option<RegStatus>,
    pub cascade: Option<Cascade>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdopterPlan {
    pub status: AccountStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPlan {
    pub status: ReportStatus,
    pub note: Option<String>,
}

/// Free-form registration decision. Approval also activates the account;
/// nothing stops approving twice.
pub fn decide_shelter_registration(requested: &str) -> Result<ShelterPlan, Rejection> {
    match requested {
        "approved" => Ok(ShelterPlan {
            status: Some(AccountStatus::Active),
            reg_status: Some(RegStatus::Approved),
            cascade: None,
        }),
        "rejected" => Ok(ShelterPlan {
            status: None,
            reg_status: Some(RegStatus::Rejected),
            cascade: None,
        }),
        other => Err(Rejection::invalid("reg_status", other, REG_DECISIONS)),
    }
}

/// Single-purpose approval. Only a pending registration can be approved and
/// the account status is left as it is.
pub fn decide_shelter_approval(current: Option<RegStatus>) -> Result<ShelterPlan, Rejection> {
    match current {
        Some(RegStatus::Approved) => Err(Rejection::AlreadyApproved),
        Some(RegStatus::Pending) => Ok(ShelterPlan {
            status: None,
            reg_status: Some(RegStatus::Approved),
            cascade: None,
        }),
        _ => Err(Rejection::NotPending),
    }
}

pub fn decide_shelter_block() -> ShelterPlan {
    ShelterPlan {
        status: Some(AccountStatus::Inactive),
        reg_status: None,
        cascade: Some(Cascade {
            from: ReportStatus::Reported,
            to: ReportStatus::Blocked,
        }),
    }
}

pub fn decide_shelter_unblock() -> ShelterPlan {
    ShelterPlan {
        status: Some(AccountStatus::Active),
        reg_status: None,
        cascade: Some(Cascade {
            from: ReportStatus::Blocked,
            to: ReportStatus::Resolved,
        }),
    }
}

/// Ad hoc activation/deactivation. Case-insensitive, never cascades.
pub fn decide_shelter_status_set(requested: &str) -> Result<ShelterPlan, Rejection> {
    let status = requested
        .to_lowercase()
        .parse::<AccountStatus>()
        .map_err(|_| Rejection::invalid("status", requested, AccountStatus::ALL))?;

    Ok(ShelterPlan {
        status: Some(status),
        reg_status: None,
        cascade: None,
    })
}

pub fn decide_adopter_activation(current: Option<AccountStatus>) -> Result<AdopterPlan, Rejection> {
    match current {
        Some(AccountStatus::Active) => Err(Rejection::AlreadyActive),
        Some(AccountStatus::Inactive) => Ok(AdopterPlan {
            status: AccountStatus::Active,
        }),
        None => Err(Rejection::NotInactive),
    }
}

/// Unguarded adopter setter. Unlike the shelter setter the value must
/// already be lowercase.
pub fn decide_adopter_status_set(requested: &str) -> Result<AdopterPlan, Rejection> {
    let status = requested
        .parse::<AccountStatus>()
        .map_err(|_| Rejection::invalid("status", requested, AccountStatus::ALL))?;

    Ok(AdopterPlan { status })
}

/// Report triage. Any report may move to any of the three targets regardless
/// of where it is now; a blank note is dropped.
pub fn decide_report_status(requested: &str, note: Option<&str>) -> Result<ReportPlan, Rejection> {
    let status = match requested {
        "pending" => ReportStatus::Pending,
        "reviewed" => ReportStatus::Reviewed,
        "resolved" => ReportStatus::Resolved,
        other => return Err(Rejection::invalid("status", other, REPORT_TARGETS)),
    };

    let note = note
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    Ok(ReportPlan { status, note })
}
