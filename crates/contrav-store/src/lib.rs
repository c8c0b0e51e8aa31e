#![forbid(unsafe_code)]
//! Entity store: one sqlite connection behind a mutex, per-entity CRUD, and
//! the referential guard that blocks deletes of rows something still points
//! at. Uniqueness races are left to the UNIQUE constraints; the validator's
//! probes exist to turn the common case into a field error instead of a 500.

use chrono::{SecondsFormat, Utc};
use rusqlite::Connection;
use std::path::Path;
use tokio::sync::Mutex;

mod agent;
mod categorie;
mod commune;
mod decision;
mod guard;
mod infraction;
mod schema;
mod user;
mod violant;

#[derive(Debug)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        Self(e.to_string())
    }
}

/// Outcome of a guarded delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    /// Blocked; carries the id of the first referencing dependent row.
    Referenced(i64),
}

pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        schema::bootstrap(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

/// RFC 3339 UTC stamp with microseconds, the format the rows serialize with.
pub(crate) fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn row_exists(
    conn: &Connection,
    table: &'static str,
    id: i64,
) -> Result<bool, rusqlite::Error> {
    let mut stmt = conn.prepare(&format!("SELECT 1 FROM {table} WHERE id = ?1 LIMIT 1"))?;
    stmt.exists([id])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_in_memory_bootstraps_schema() {
        let store = Store::open_in_memory().expect("open");
        let agents = store.list_agents().await.expect("list");
        assert!(agents.is_empty());
    }

    #[test]
    fn now_stamp_is_rfc3339_utc() {
        let stamp = now_stamp();
        assert!(stamp.ends_with('Z'), "stamp should be UTC: {stamp}");
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[tokio::test]
    async fn file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("registry.sqlite");

        let store = Store::open(&path).expect("open");
        let agent = store
            .create_agent(contrav_model::NewAgent {
                nom: "Smith".to_string(),
                prenom: "John".to_string(),
                tel: "1234567890".to_string(),
                cin: "AB123456".to_string(),
            })
            .await
            .expect("create");
        drop(store);

        let reopened = Store::open(&path).expect("reopen");
        let fetched = reopened
            .get_agent(agent.id)
            .await
            .expect("get")
            .expect("persisted");
        assert_eq!(fetched, agent);
    }
}
