//! Account and report moderation.
//!
//! [`engine`] decides transitions without touching storage, [`service`]
//! runs them against an [`EntityStore`].

pub mod engine;
pub mod error;
pub mod service;
pub mod status;
pub mod store;

#[cfg(test)]
mod memory;

pub use error::{Entity, ErrorKind, ModerationError, StoreError};
pub use service::{
    AdopterStatusOutcome, ApprovalOutcome, BlockOutcome, CascadeMode, ModerationService,
    RegistrationOutcome, ReportOutcome, ShelterStatusOutcome,
};
pub use status::{AccountStatus, RegStatus, ReportStatus};
pub use store::{EntityStore, PgStore};
