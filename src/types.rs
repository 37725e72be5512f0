//! Core data types for pettrackr
//!
//! This module defines the records persisted in the database and the
//! small amount of logic that hangs off them (age, due dates, feeding plans).

use chrono::{Datelike, Local, Months, NaiveDate};
use std::fmt;

/// Default booster interval applied when a vaccination has no explicit due date
pub const DEFAULT_BOOSTER_MONTHS: u32 = 12;

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A pet owner
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Owner {
    pub id: Option<i64>,
    pub name: String,
    pub contact_number: String,
    pub address: String,
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.contact_number.is_empty() {
            write!(f, " ({})", self.contact_number)?;
        }
        if !self.address.is_empty() {
            write!(f, ", {}", self.address)?;
        }
        Ok(())
    }
}

/// A pet, owned by at most one owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    pub id: Option<i64>,
    pub owner_id: Option<i64>,
    pub name: String,
    pub breed: String,
    pub birthdate: NaiveDate,
    /// Path relative to the data directory
    pub image_path: Option<String>,
}

impl Pet {
    /// Breed for display, "Unknown" when blank
    pub fn breed_or_unknown(&self) -> &str {
        if self.breed.trim().is_empty() {
            "Unknown"
        } else {
            &self.breed
        }
    }

    /// Human readable age as of today
    pub fn age(&self) -> String {
        self.age_on(today())
    }

    /// Human readable age as of `today`
    pub fn age_on(&self, today: NaiveDate) -> String {
        if self.birthdate > today {
            return "not born yet".to_string();
        }

        let months = whole_months_between(self.birthdate, today);
        if months >= 12 {
            plural(months / 12, "year")
        } else if months >= 1 {
            plural(months, "month")
        } else {
            plural((today - self.birthdate).num_days() as u32, "day")
        }
    }
}

impl fmt::Display for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}), born {}",
            self.name,
            self.breed_or_unknown(),
            self.birthdate
        )
    }
}

/// A vaccination record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vaccination {
    pub id: Option<i64>,
    pub pet_id: i64,
    pub vaccine_name: String,
    pub date_administered: NaiveDate,
    pub next_due: NaiveDate,
    pub category: String,
    pub notes: String,
}

impl Vaccination {
    /// New record with `next_due` set from the default booster interval
    pub fn new(
        pet_id: i64,
        vaccine_name: impl Into<String>,
        date_administered: NaiveDate,
        category: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            pet_id,
            vaccine_name: vaccine_name.into(),
            date_administered,
            next_due: default_next_due(date_administered),
            category: category.into(),
            notes: notes.into(),
        }
    }

    pub fn is_due(&self) -> bool {
        self.is_due_on(today())
    }

    /// A booster is due once `next_due` has been reached
    pub fn is_due_on(&self, today: NaiveDate) -> bool {
        self.next_due <= today
    }
}

impl fmt::Display for Vaccination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on {}, next due {}",
            self.vaccine_name, self.date_administered, self.next_due
        )
    }
}

/// Due date for a booster given the administration date
pub fn default_next_due(administered: NaiveDate) -> NaiveDate {
    administered
        .checked_add_months(Months::new(DEFAULT_BOOSTER_MONTHS))
        .unwrap_or(NaiveDate::MAX)
}

/// A visit to the vet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VetVisit {
    pub id: Option<i64>,
    pub pet_id: i64,
    pub visit_date: NaiveDate,
    pub reason: String,
    pub notes: String,
}

impl fmt::Display for VetVisit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.visit_date, self.reason)
    }
}

/// How many meals per day a boarded pet receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedingPlan {
    #[default]
    None,
    Once,
    Twice,
    Thrice,
}

impl FeedingPlan {
    pub fn all() -> &'static [FeedingPlan] {
        &[
            FeedingPlan::None,
            FeedingPlan::Once,
            FeedingPlan::Twice,
            FeedingPlan::Thrice,
        ]
    }

    /// Resolve the stored flag columns. When several are set the first
    /// one wins, in the order once, twice, thrice.
    pub fn from_flags(once: bool, twice: bool, thrice: bool) -> Self {
        if once {
            FeedingPlan::Once
        } else if twice {
            FeedingPlan::Twice
        } else if thrice {
            FeedingPlan::Thrice
        } else {
            FeedingPlan::None
        }
    }

    /// (once, twice, thrice), at most one of them set
    pub fn flags(&self) -> (bool, bool, bool) {
        match self {
            FeedingPlan::None => (false, false, false),
            FeedingPlan::Once => (true, false, false),
            FeedingPlan::Twice => (false, true, false),
            FeedingPlan::Thrice => (false, false, true),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedingPlan::None => "No feeding",
            FeedingPlan::Once => "Once",
            FeedingPlan::Twice => "Twice",
            FeedingPlan::Thrice => "Thrice",
        }
    }
}

/// A daycare stay with an optional feeding plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedingLog {
    pub id: Option<i64>,
    pub pet_id: i64,
    pub start_date: NaiveDate,
    pub num_days: u32,
    pub plan: FeedingPlan,
}

impl fmt::Display for FeedingLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} day(s) | Plan: {}",
            self.start_date,
            self.num_days,
            self.plan.label()
        )
    }
}

/// Application tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Pets,
    Profile,
    Settings,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Pets, Tab::Profile, Tab::Settings]
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Pets => 0,
            Tab::Profile => 1,
            Tab::Settings => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Pets => "All Pets",
            Tab::Profile => "Profile",
            Tab::Settings => "Settings",
        }
    }
}

// Helper functions

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

/// Number of complete calendar months from `from` to `to`
fn whole_months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pet_born(birthdate: NaiveDate) -> Pet {
        Pet {
            id: Some(1),
            owner_id: None,
            name: "Buddy".into(),
            breed: "Golden Retriever".into(),
            birthdate,
            image_path: None,
        }
    }

    #[test]
    fn test_age_in_years() {
        let pet = pet_born(date(2020, 1, 1));
        assert_eq!(pet.age_on(date(2024, 6, 1)), "4 years");
        assert_eq!(pet.age_on(date(2021, 1, 1)), "1 year");
        assert_eq!(pet.age_on(date(2020, 12, 31)), "11 months");
    }

    #[test]
    fn test_age_in_months_and_days() {
        let pet = pet_born(date(2024, 1, 31));
        assert_eq!(pet.age_on(date(2024, 3, 30)), "1 month");
        assert_eq!(pet.age_on(date(2024, 2, 12)), "12 days");
        assert_eq!(pet.age_on(date(2024, 1, 31)), "0 days");
        assert_eq!(pet.age_on(date(2023, 12, 1)), "not born yet");
    }

    #[test]
    fn test_breed_fallback() {
        let mut pet = pet_born(date(2020, 1, 1));
        pet.breed = "  ".into();
        assert_eq!(pet.breed_or_unknown(), "Unknown");
        assert_eq!(pet.to_string(), "Buddy (Unknown), born 2020-01-01");
    }

    #[test]
    fn test_vaccination_default_due_date() {
        let vax = Vaccination::new(1, "Rabies", date(2024, 2, 29), "Rabies", "");
        assert_eq!(vax.next_due, date(2025, 2, 28));
        assert!(!vax.is_due_on(date(2025, 2, 27)));
        assert!(vax.is_due_on(date(2025, 2, 28)));
    }

    #[test]
    fn test_feeding_plan_flags() {
        assert_eq!(FeedingPlan::from_flags(false, true, false), FeedingPlan::Twice);
        assert_eq!(FeedingPlan::from_flags(true, true, true), FeedingPlan::Once);
        assert_eq!(FeedingPlan::from_flags(false, false, false), FeedingPlan::None);

        for plan in FeedingPlan::all() {
            let (a, b, c) = plan.flags();
            assert!([a, b, c].iter().filter(|f| **f).count() <= 1);
            assert_eq!(FeedingPlan::from_flags(a, b, c), *plan);
        }
    }

    #[test]
    fn test_owner_display() {
        let owner = Owner {
            id: None,
            name: "Alice".into(),
            contact_number: "123-456-7890".into(),
            address: "123 Main St".into(),
        };
        assert_eq!(owner.to_string(), "Alice (123-456-7890), 123 Main St");
    }
}
