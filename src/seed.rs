//! Random demo records
//!
//! Fills the database with plausible pets for trying the app out.

use crate::db::{Database, DbError};
use crate::types::{FeedingLog, FeedingPlan, Owner, Pet, Vaccination};
use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

const BREEDS: &[&str] = &["Shih Tzu", "Poodle", "Bulldog", "Aspin"];
const VACCINES: &[&str] = &["Rabies", "Distemper", "Bordetella", "Parvo"];
const CATEGORIES: &[&str] = &["Core", "Optional", "Rabies"];
const NOTES: &[&str] = &["", "No side effects", "Mild fever", "Vet: Dr. Smith"];
const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// What a call to [`add_random_pet`] created
#[derive(Debug, Clone)]
pub struct SeededPet {
    pub pet_id: i64,
    pub name: String,
    pub feeding_log: FeedingLog,
    pub vaccination: Vaccination,
}

/// Insert a random pet and owner with one feeding log and one vaccination
pub fn add_random_pet<R: Rng + ?Sized>(db: &Database, rng: &mut R) -> Result<SeededPet, DbError> {
    let pet = Pet {
        id: None,
        owner_id: None,
        name: random_string(rng, 6),
        breed: pick(rng, BREEDS).to_string(),
        birthdate: random_date(rng, 2015, 2022),
        image_path: None,
    };
    let owner = Owner {
        id: None,
        name: random_string(rng, 6),
        contact_number: random_phone(rng),
        address: format!("{} {} St.", rng.gen_range(1..=999), random_string(rng, 8)),
    };

    let pet_id = db.pets().add_pet_with_owner(&pet, &owner, None)?;

    let feeding_log = FeedingLog {
        id: None,
        pet_id,
        start_date: random_date(rng, 2023, 2025),
        num_days: rng.gen_range(1..=14),
        plan: random_plan(rng),
    };
    db.feeding_logs().create(&feeding_log)?;

    let vaccination = Vaccination::new(
        pet_id,
        pick(rng, VACCINES),
        random_date(rng, 2023, 2025),
        pick(rng, CATEGORIES),
        pick(rng, NOTES),
    );
    db.vaccinations().create(&vaccination)?;

    Ok(SeededPet {
        pet_id,
        name: pet.name,
        feeding_log,
        vaccination,
    })
}

/// Exactly one feeding plan, with "once" as likely as the other two together
fn random_plan<R: Rng + ?Sized>(rng: &mut R) -> FeedingPlan {
    if rng.gen_bool(0.5) {
        FeedingPlan::Once
    } else if rng.gen_bool(0.5) {
        FeedingPlan::Twice
    } else {
        FeedingPlan::Thrice
    }
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn random_string<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
        .collect()
}

fn random_phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    let digits: String = (0..9)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();
    format!("09{}", digits)
}

/// Uniform date between Jan 1 of `start_year` and Dec 31 of `end_year`
fn random_date<R: Rng + ?Sized>(rng: &mut R, start_year: i32, end_year: i32) -> NaiveDate {
    let start = NaiveDate::from_ymd_opt(start_year, 1, 1).unwrap_or(NaiveDate::MIN);
    let end = NaiveDate::from_ymd_opt(end_year, 12, 31).unwrap_or(start);
    let span = (end - start).num_days().max(0);
    start + Duration::days(rng.gen_range(0..=span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::memory_db;
    use chrono::Datelike;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_pet_is_persisted() {
        let (db, _dir) = memory_db();
        let mut rng = StdRng::seed_from_u64(7);

        let seeded = add_random_pet(&db, &mut rng).unwrap();

        let (pet, owner) = db.pets().get_pet_by_id(seeded.pet_id).unwrap().unwrap();
        assert_eq!(pet.name, seeded.name);
        assert!(BREEDS.contains(&pet.breed.as_str()));
        assert!((2015..=2022).contains(&pet.birthdate.year()));

        let owner = owner.unwrap();
        assert_eq!(owner.contact_number.len(), 11);
        assert!(owner.contact_number.starts_with("09"));
        assert!(owner.address.ends_with(" St."));

        let logs = db.feeding_logs().get_by_pet_id(seeded.pet_id).unwrap();
        assert_eq!(logs.len(), 1);
        assert!((1..=14).contains(&logs[0].num_days));
        assert_ne!(logs[0].plan, FeedingPlan::None);

        let vaxes = db.vaccinations().get_by_pet_id(seeded.pet_id).unwrap();
        assert_eq!(vaxes.len(), 1);
        assert!(VACCINES.contains(&vaxes[0].vaccine_name.as_str()));
    }

    #[test]
    fn test_random_values_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let d = random_date(&mut rng, 2023, 2025);
            assert!((2023..=2025).contains(&d.year()));

            let name = random_string(&mut rng, 6);
            assert_eq!(name.len(), 6);
            assert!(name.chars().all(|c| c.is_ascii_alphabetic()));

            assert_ne!(random_plan(&mut rng), FeedingPlan::None);
        }
    }
}
