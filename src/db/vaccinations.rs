use super::{Database, DbError};
use crate::types::Vaccination;
use rusqlite::params;
use tracing::info;

pub struct VaccinationController<'a> {
    db: &'a Database,
}

impl<'a> VaccinationController<'a> {
    pub(super) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn create(&self, vax: &Vaccination) -> Result<i64, DbError> {
        self.db.ensure_pet(vax.pet_id)?;
        self.db.conn().execute(
            "INSERT INTO vaccinations
                (pet_id, vaccine_name, date_administered, next_due, category, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                vax.pet_id,
                vax.vaccine_name,
                vax.date_administered,
                vax.next_due,
                vax.category,
                vax.notes
            ],
        )?;
        let id = self.db.conn().last_insert_rowid();
        info!(id, pet_id = vax.pet_id, vaccine = %vax.vaccine_name, "Saved vaccination");
        Ok(id)
    }

    pub fn get_by_pet_id(&self, pet_id: i64) -> Result<Vec<Vaccination>, DbError> {
        let mut stmt = self.db.conn().prepare(
            "SELECT id, pet_id, vaccine_name, date_administered, next_due, category, notes
             FROM vaccinations WHERE pet_id = ?1
             ORDER BY date_administered, id",
        )?;
        let rows = stmt
            .query_map([pet_id], |row| {
                Ok(Vaccination {
                    id: row.get(0)?,
                    pet_id: row.get(1)?,
                    vaccine_name: row.get(2)?,
                    date_administered: row.get(3)?,
                    next_due: row.get(4)?,
                    category: row.get(5)?,
                    notes: row.get(6)?,
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
    use crate::types::Vaccination;
    use chrono::NaiveDate;

    #[test]
    fn test_create_and_list_by_date() {
        let (db, _dir) = memory_db();
        let (pet, owner) = buddy();
        let pet_id = db.pets().add_pet_with_owner(&pet, &owner, None).unwrap();

        let later = Vaccination::new(
            pet_id,
            "Parvo",
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            "Core",
            "",
        );
        let earlier = Vaccination::new(
            pet_id,
            "Rabies",
            NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(),
            "Rabies",
            "No side effects",
        );
        db.vaccinations().create(&later).unwrap();
        db.vaccinations().create(&earlier).unwrap();

        let all = db.vaccinations().get_by_pet_id(pet_id).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].vaccine_name, "Rabies");
        assert_eq!(all[0].next_due, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(all[0].notes, "No side effects");
        assert_eq!(all[1].vaccine_name, "Parvo");
    }

    #[test]
    fn test_unknown_pet_is_rejected() {
        let (db, _dir) = memory_db();
        let vax = Vaccination::new(
            99,
            "Rabies",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "Rabies",
            "",
        );
        assert!(matches!(
            db.vaccinations().create(&vax),
            Err(DbError::PetNotFound(99))
        ));
        assert!(db.vaccinations().get_by_pet_id(99).unwrap().is_empty());
    }
}
