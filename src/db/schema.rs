//! Schema migrations
//!
//! Migrations are applied in order and tracked with `PRAGMA user_version`.
//! Dates are stored as `YYYY-MM-DD` text.

use rusqlite::Connection;
use tracing::info;

const MIGRATIONS: &[&str] = &[
    // 1: initial schema
    "CREATE TABLE owners (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        name           TEXT NOT NULL,
        contact_number TEXT NOT NULL DEFAULT '',
        address        TEXT NOT NULL DEFAULT ''
    );
    CREATE TABLE pets (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id   INTEGER REFERENCES owners(id),
        name       TEXT NOT NULL,
        breed      TEXT NOT NULL DEFAULT '',
        birthdate  TEXT NOT NULL,
        image_path TEXT
    );
    CREATE TABLE vaccinations (
        id                INTEGER PRIMARY KEY AUTOINCREMENT,
        pet_id            INTEGER NOT NULL REFERENCES pets(id),
        vaccine_name      TEXT NOT NULL,
        date_administered TEXT NOT NULL,
        next_due          TEXT NOT NULL,
        category          TEXT NOT NULL DEFAULT '',
        notes             TEXT NOT NULL DEFAULT ''
    );
    CREATE TABLE vet_visits (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        pet_id     INTEGER NOT NULL REFERENCES pets(id),
        visit_date TEXT NOT NULL,
        reason     TEXT NOT NULL DEFAULT '',
        notes      TEXT NOT NULL DEFAULT ''
    );
    CREATE TABLE feeding_logs (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        pet_id      INTEGER NOT NULL REFERENCES pets(id),
        start_date  TEXT NOT NULL,
        num_days    INTEGER NOT NULL,
        feed_once   INTEGER NOT NULL DEFAULT 0,
        feed_twice  INTEGER NOT NULL DEFAULT 0,
        feed_thrice INTEGER NOT NULL DEFAULT 0
    );",
    // 2: per-pet lookups
    "CREATE INDEX idx_vaccinations_pet ON vaccinations(pet_id);
    CREATE INDEX idx_vet_visits_pet ON vet_visits(pet_id);
    CREATE INDEX idx_feeding_logs_pet ON feeding_logs(pet_id);",
];

/// Latest schema version
pub fn latest_version() -> u32 {
    MIGRATIONS.len() as u32
}

/// Apply every migration newer than the stored version
pub fn migrate(conn: &Connection) -> rusqlite::Result<u32> {
    let current: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    for (idx, sql) in MIGRATIONS.iter().enumerate().skip(current as usize) {
        let version = idx as u32 + 1;
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
        info!(version, "Applied schema migration");
    }

    Ok(latest_version().max(current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(migrate(&conn).unwrap(), latest_version());
        assert_eq!(migrate(&conn).unwrap(), latest_version());

        let version: u32 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, latest_version());
    }
}
