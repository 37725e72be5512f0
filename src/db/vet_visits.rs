use super::{Database, DbError};
use crate::types::VetVisit;
use rusqlite::params;
use tracing::info;

pub struct VetVisitController<'a> {
    db: &'a Database,
}

impl<'a> VetVisitController<'a> {
    pub(super) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn create(&self, visit: &VetVisit) -> Result<i64, DbError> {
        self.db.ensure_pet(visit.pet_id)?;
        self.db.conn().execute(
            "INSERT INTO vet_visits (pet_id, visit_date, reason, notes)
             VALUES (?1, ?2, ?3, ?4)",
            params![visit.pet_id, visit.visit_date, visit.reason, visit.notes],
        )?;
        let id = self.db.conn().last_insert_rowid();
        info!(id, pet_id = visit.pet_id, "Saved vet visit");
        Ok(id)
    }

    pub fn get_by_pet_id(&self, pet_id: i64) -> Result<Vec<VetVisit>, DbError> {
        let mut stmt = self.db.conn().prepare(
            "SELECT id, pet_id, visit_date, reason, notes
             FROM vet_visits WHERE pet_id = ?1
             ORDER BY visit_date, id",
        )?;
        let rows = stmt
            .query_map([pet_id], |row| {
                Ok(VetVisit {
                    id: row.get(0)?,
                    pet_id: row.get(1)?,
                    visit_date: row.get(2)?,
                    reason: row.get(3)?,
                    notes: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::testing::{buddy, memory_db};
    use crate::db::DbError;
    use crate::types::VetVisit;
    use chrono::NaiveDate;

    #[test]
    fn test_visits_are_scoped_to_pet() {
        let (db, _dir) = memory_db();
        let (pet, owner) = buddy();
        let first = db.pets().add_pet_with_owner(&pet, &owner, None).unwrap();
        let second = db.pets().add_pet_with_owner(&pet, &owner, None).unwrap();

        let visit = VetVisit {
            id: None,
            pet_id: first,
            visit_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            reason: "Checkup".into(),
            notes: String::new(),
        };
        let id = db.vet_visits().create(&visit).unwrap();

        let visits = db.vet_visits().get_by_pet_id(first).unwrap();
        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].id, Some(id));
        assert_eq!(visits[0].to_string(), "2024-03-15: Checkup");
        assert!(db.vet_visits().get_by_pet_id(second).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_pet_is_rejected() {
        let (db, _dir) = memory_db();
        let visit = VetVisit {
            id: None,
            pet_id: 99,
            visit_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            reason: "Checkup".into(),
            notes: String::new(),
        };
        assert!(matches!(
            db.vet_visits().create(&visit),
            Err(DbError::PetNotFound(99))
        ));
    }
}
