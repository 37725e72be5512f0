use super::{Database, DbError};
use crate::types::{FeedingLog, FeedingPlan};
use rusqlite::params;
use tracing::info;

pub struct FeedingLogController<'a> {
    db: &'a Database,
}

impl<'a> FeedingLogController<'a> {
    pub(super) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn create(&self, log: &FeedingLog) -> Result<i64, DbError> {
        self.db.ensure_pet(log.pet_id)?;
        let (once, twice, thrice) = log.plan.flags();
        self.db.conn().execute(
            "INSERT INTO feeding_logs
                (pet_id, start_date, num_days, feed_once, feed_twice, feed_thrice)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![log.pet_id, log.start_date, log.num_days, once, twice, thrice],
        )?;
        let id = self.db.conn().last_insert_rowid();
        info!(id, pet_id = log.pet_id, days = log.num_days, "Saved feeding log");
        Ok(id)
    }

    pub fn get_by_pet_id(&self, pet_id: i64) -> Result<Vec<FeedingLog>, DbError> {
        let mut stmt = self.db.conn().prepare(
            "SELECT id, pet_id, start_date, num_days, feed_once, feed_twice, feed_thrice
             FROM feeding_logs WHERE pet_id = ?1
             ORDER BY start_date, id",
        )?;
        let rows = stmt
            .query_map([pet_id], |row| {
                Ok(FeedingLog {
                    id: row.get(0)?,
                    pet_id: row.get(1)?,
                    start_date: row.get(2)?,
                    num_days: row.get(3)?,
                    plan: FeedingPlan::from_flags(row.get(4)?, row.get(5)?, row.get(6)?),
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
    use crate::types::{FeedingLog, FeedingPlan};
    use chrono::NaiveDate;

    #[test]
    fn test_plan_survives_storage() {
        let (db, _dir) = memory_db();
        let (pet, owner) = buddy();
        let pet_id = db.pets().add_pet_with_owner(&pet, &owner, None).unwrap();

        let log = FeedingLog {
            id: None,
            pet_id,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            num_days: 3,
            plan: FeedingPlan::Twice,
        };
        db.feeding_logs().create(&log).unwrap();

        let logs = db.feeding_logs().get_by_pet_id(pet_id).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].plan, FeedingPlan::Twice);
        assert_eq!(logs[0].num_days, 3);
    }

    #[test]
    fn test_conflicting_flags_resolve_to_first() {
        let (db, _dir) = memory_db();
        let (pet, owner) = buddy();
        let pet_id = db.pets().add_pet_with_owner(&pet, &owner, None).unwrap();

        db.conn()
            .execute(
                "INSERT INTO feeding_logs
                    (pet_id, start_date, num_days, feed_once, feed_twice, feed_thrice)
                 VALUES (?1, '2024-01-01', 2, 0, 1, 1)",
                [pet_id],
            )
            .unwrap();

        let logs = db.feeding_logs().get_by_pet_id(pet_id).unwrap();
        assert_eq!(logs[0].plan, FeedingPlan::Twice);
    }

    #[test]
    fn test_unknown_pet_is_rejected() {
        let (db, _dir) = memory_db();
        let log = FeedingLog {
            id: None,
            pet_id: 99,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            num_days: 3,
            plan: FeedingPlan::Once,
        };
        assert!(matches!(
            db.feeding_logs().create(&log),
            Err(DbError::PetNotFound(99))
        ));
    }
}
