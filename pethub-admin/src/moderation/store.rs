use diesel::connection::{Connection, TransactionManager};
use diesel::pg::PgConnection;
use diesel::prelude::*;

use pethub_shared::clients::db::{DbConnection, DbPool};

use crate::models::{
    AdopterAccount, AdopterChanges, ReportChanges, ShelterAccount, ShelterChanges, ShelterInfo,
    SubmittedReport,
};
use crate::schema::{adopteraccount, shelteraccount, shelterinfo, submittedreports};

use super::error::StoreError;
use super::status::ReportStatus;

/// Row-level access the moderation service needs.
///
/// Updates report the number of rows they touched; callers decide what zero
/// means.
pub trait EntityStore {
    fn shelter(&mut self, id: i32) -> Result<Option<ShelterAccount>, StoreError>;

    fn shelter_info(&mut self, id: i32) -> Result<Option<ShelterInfo>, StoreError>;

    fn adopter(&mut self, id: i32) -> Result<Option<AdopterAccount>, StoreError>;

    fn report(&mut self, id: i32) -> Result<Option<SubmittedReport>, StoreError>;

    fn update_shelter(&mut self, id: i32, changes: &ShelterChanges) -> Result<usize, StoreError>;

    fn update_adopter(&mut self, id: i32, changes: &AdopterChanges) -> Result<usize, StoreError>;

    fn update_report(&mut self, id: i32, changes: &ReportChanges) -> Result<usize, StoreError>;

    /// Move every report of `shelter_id` currently in `from` to `to`, in one statement.
    fn update_shelter_reports(
        &mut self,
        shelter_id: i32,
        from: ReportStatus,
        to: ReportStatus,
    ) -> Result<usize, StoreError>;

    /// Run `f` so that either all of its writes land or none do.
    fn transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<StoreError>;
}

type PgTransactionManager = <PgConnection as Connection>::TransactionManager;

/// [`EntityStore`] over one pooled PostgreSQL connection.
pub struct PgStore {
    conn: DbConnection,
}

impl PgStore {
    pub fn new(conn: DbConnection) -> Self {
        Self { conn }
    }

    pub fn checkout(pool: &DbPool) -> Result<Self, StoreError> {
        Ok(Self::new(pool.get()?))
    }
}

impl EntityStore for PgStore {
    fn shelter(&mut self, id: i32) -> Result<Option<ShelterAccount>, StoreError> {
        Ok(shelteraccount::table
            .find(id)
            .first::<ShelterAccount>(&mut self.conn)
            .optional()?)
    }

    fn shelter_info(&mut self, id: i32) -> Result<Option<ShelterInfo>, StoreError> {
        Ok(shelterinfo::table
            .find(id)
            .first::<ShelterInfo>(&mut self.conn)
            .optional()?)
    }

    fn adopter(&mut self, id: i32) -> Result<Option<AdopterAccount>, StoreError> {
        Ok(adopteraccount::table
            .find(id)
            .first::<AdopterAccount>(&mut self.conn)
            .optional()?)
    }

    fn report(&mut self, id: i32) -> Result<Option<SubmittedReport>, StoreError> {
        Ok(submittedreports::table
            .find(id)
            .first::<SubmittedReport>(&mut self.conn)
            .optional()?)
    }

    fn update_shelter(&mut self, id: i32, changes: &ShelterChanges) -> Result<usize, StoreError> {
        Ok(diesel::update(shelteraccount::table.find(id))
            .set(changes)
            .execute(&mut self.conn)?)
    }

    fn update_adopter(&mut self, id: i32, changes: &AdopterChanges) -> Result<usize, StoreError> {
        Ok(diesel::update(adopteraccount::table.find(id))
            .set(changes)
            .execute(&mut self.conn)?)
    }

    fn update_report(&mut self, id: i32, changes: &ReportChanges) -> Result<usize, StoreError> {
        // A missing note must not clear one that is already there.
        let rows = match changes.admin_note {
            Some(_) => diesel::update(submittedreports::table.find(id))
                .set(changes)
                .execute(&mut self.conn)?,
            None => diesel::update(submittedreports::table.find(id))
                .set(submittedreports::status.eq(&changes.status))
                .execute(&mut self.conn)?,
        };
        Ok(rows)
    }

    fn update_shelter_reports(
        &mut self,
        shelter_id: i32,
        from: ReportStatus,
        to: ReportStatus,
    ) -> Result<usize, StoreError> {
        Ok(diesel::update(
            submittedreports::table
                .filter(submittedreports::shelter_id.eq(shelter_id))
                .filter(submittedreports::status.eq(from.as_str())),
        )
        .set(submittedreports::status.eq(to.as_str()))
        .execute(&mut self.conn)?)
    }

    fn transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<StoreError>,
    {
        PgTransactionManager::begin_transaction(&mut *self.conn).map_err(StoreError::from)?;

        let outcome = f(self);
        settle(
            &mut *self.conn,
            outcome,
            |conn| PgTransactionManager::commit_transaction(conn),
            rollback,
        )
    }
}

/// Commit after success, roll back after failure. A failed commit has
/// already been rolled back by diesel and is only reported.
fn settle<C: ?Sized, T, E>(
    conn: &mut C,
    outcome: Result<T, E>,
    commit: impl FnOnce(&mut C) -> QueryResult<()>,
    rollback: impl FnOnce(&mut C),
) -> Result<T, E>
where
    E: From<StoreError>,
{
    match outcome {
        Ok(value) => {
            commit(conn).map_err(StoreError::from)?;
            Ok(value)
        }
        Err(err) => {
            rollback(conn);
            Err(err)
        }
    }
}

fn rollback(conn: &mut PgConnection) {
    if let Err(e) = PgTransactionManager::rollback_transaction(conn) {
        tracing::error!(error = %e, "transaction rollback failed");
    }
}
