//! Persistence layer
//!
//! This module owns the SQLite store and exposes one controller per
//! record type:
//! - Pets and their owners
//! - Vaccinations
//! - Vet visits
//! - Feeding logs

pub mod feeding_logs;
pub mod pets;
pub mod schema;
pub mod vaccinations;
pub mod vet_visits;

pub use feeding_logs::FeedingLogController;
pub use pets::PetController;
pub use vaccinations::VaccinationController;
pub use vet_visits::VetVisitController;

use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Database file name inside the data directory
pub const DB_FILE: &str = "pettrackr.db";
/// Image directory inside the data directory
pub const IMAGES_DIR: &str = "images";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{action} {path:?}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("pet #{0} does not exist")]
    PetNotFound(i64),
}

impl DbError {
    fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        DbError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Row counts reported by a connection check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionReport {
    pub owners: u64,
    pub pets: u64,
    pub vaccinations: u64,
    pub vet_visits: u64,
    pub feeding_logs: u64,
}

/// Handle to the record store
pub struct Database {
    conn: Connection,
    data_dir: PathBuf,
}

impl Database {
    /// Open (or create) the database inside `data_dir`
    pub fn open(data_dir: &Path) -> Result<Self, DbError> {
        fs::create_dir_all(data_dir)
            .map_err(|e| DbError::io("Failed to create data directory", data_dir, e))?;

        let path = data_dir.join(DB_FILE);
        debug!(path = %path.display(), "Opening database");
        Self::init(Connection::open(&path)?, data_dir)
    }

    /// Fresh in-memory database; images still live under `data_dir`
    #[cfg(test)]
    pub fn open_in_memory(data_dir: &Path) -> Result<Self, DbError> {
        Self::init(Connection::open_in_memory()?, data_dir)
    }

    fn init(conn: Connection, data_dir: &Path) -> Result<Self, DbError> {
        conn.pragma_update(None, "foreign_keys", true)?;
        schema::migrate(&conn)?;

        let images = data_dir.join(IMAGES_DIR);
        fs::create_dir_all(&images)
            .map_err(|e| DbError::io("Failed to create image directory", &images, e))?;

        Ok(Self {
            conn,
            data_dir: data_dir.to_path_buf(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn pets(&self) -> PetController<'_> {
        PetController::new(self)
    }

    pub fn vaccinations(&self) -> VaccinationController<'_> {
        VaccinationController::new(self)
    }

    pub fn vet_visits(&self) -> VetVisitController<'_> {
        VetVisitController::new(self)
    }

    pub fn feeding_logs(&self) -> FeedingLogController<'_> {
        FeedingLogController::new(self)
    }

    /// Ping the store and count the rows of every table
    pub fn test_all_connections(&self) -> Result<ConnectionReport, DbError> {
        self.conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;

        let count = |table: &str| -> Result<u64, DbError> {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?;
            Ok(n.max(0) as u64)
        };

        let report = ConnectionReport {
            owners: count("owners")?,
            pets: count("pets")?,
            vaccinations: count("vaccinations")?,
            vet_visits: count("vet_visits")?,
            feeding_logs: count("feeding_logs")?,
        };

        info!(
            owners = report.owners,
            pets = report.pets,
            vaccinations = report.vaccinations,
            vet_visits = report.vet_visits,
            feeding_logs = report.feeding_logs,
            "Database connection ok"
        );
        Ok(report)
    }

    /// Fail with `PetNotFound` unless the pet row exists
    pub(crate) fn ensure_pet(&self, pet_id: i64) -> Result<(), DbError> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM pets WHERE id = ?1)",
            [pet_id],
            |row| row.get(0),
        )?;
        if exists {
            Ok(())
        } else {
            Err(DbError::PetNotFound(pet_id))
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::types::{Owner, Pet};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    /// In-memory database with a throwaway data directory
    pub fn memory_db() -> (Database, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_in_memory(dir.path()).unwrap();
        (db, dir)
    }

    pub fn buddy() -> (Pet, Owner) {
        let pet = Pet {
            id: None,
            owner_id: None,
            name: "Buddy".into(),
            breed: "Golden Retriever".into(),
            birthdate: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            image_path: None,
        };
        let owner = Owner {
            id: None,
            name: "Alice".into(),
            contact_number: "123-456-7890".into(),
            address: "123 Main St".into(),
        };
        (pet, owner)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_open_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");

        let db = Database::open(&data_dir).unwrap();
        assert!(data_dir.join(DB_FILE).is_file());
        assert!(data_dir.join(IMAGES_DIR).is_dir());
        assert_eq!(db.data_dir(), data_dir.as_path());
    }

    #[test]
    fn test_reopen_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let (pet, owner) = buddy();

        let id = {
            let db = Database::open(dir.path()).unwrap();
            db.pets().add_pet_with_owner(&pet, &owner, None).unwrap()
        };

        let db = Database::open(dir.path()).unwrap();
        let (loaded, _) = db.pets().get_pet_by_id(id).unwrap().unwrap();
        assert_eq!(loaded.name, "Buddy");
    }

    #[test]
    fn test_connection_report() {
        let (db, _dir) = memory_db();
        assert_eq!(db.test_all_connections().unwrap(), ConnectionReport::default());

        let (pet, owner) = buddy();
        db.pets().add_pet_with_owner(&pet, &owner, None).unwrap();

        let report = db.test_all_connections().unwrap();
        assert_eq!(report.pets, 1);
        assert_eq!(report.owners, 1);
        assert_eq!(report.feeding_logs, 0);
    }
}
