//! Line-oriented menu
//!
//! A plain stdin/stdout front end over the same controllers the TUI uses.
//! Reader and writer are generic so sessions can be scripted.

use crate::billing::{FeeSchedule, Invoice};
use crate::db::Database;
use crate::seed;
use crate::types::{FeedingLog, Owner, Pet, Vaccination, VetVisit};
use crate::validate::{self, ValidationError};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

const RULE: &str = "========================================";

pub struct Cli<'a, R, W> {
    db: &'a Database,
    fees: FeeSchedule,
    input: R,
    out: W,
    rng: StdRng,
}

impl<'a, R: BufRead, W: Write> Cli<'a, R, W> {
    pub fn new(db: &'a Database, fees: FeeSchedule, input: R, out: W) -> Self {
        Self {
            db,
            fees,
            input,
            out,
            rng: StdRng::from_entropy(),
        }
    }

    /// Main menu loop; returns on Exit or end of input
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(
                self.out,
                "\n=== PetTrackr Main Menu ===\n1. Add Pet\n2. View Pets\n3. Exit\n4. Add Random Pet"
            )?;
            let Some(choice) = self.prompt("\nChoose an option: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.add_pet_from_input()?,
                "2" => self.list_pets()?,
                "3" => break,
                "4" => self.add_random_pet()?,
                _ => writeln!(self.out, "❌ Invalid choice. Please try again.")?,
            }
        }

        writeln!(self.out, "Goodbye!")?;
        Ok(())
    }

    // === INPUT ===

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("End of input");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Re-prompt until `parse` accepts the input
    fn prompt_valid<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> Result<Option<T>> {
        loop {
            let Some(line) = self.prompt(prompt)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.out, "❌ Invalid input: {}", e)?,
            }
        }
    }

    // === MAIN MENU ACTIONS ===

    fn add_pet_from_input(&mut self) -> Result<()> {
        writeln!(self.out, "\n🐾 Add a New Pet")?;
        let Some(name) = self.prompt_valid("Pet Name: ", |s| validate::require_non_empty("Name", s))? else {
            return Ok(());
        };
        let Some(breed) = self.prompt("Breed: ")? else {
            return Ok(());
        };
        let Some(birthdate) = self.prompt_valid("Birthdate (YYYY-MM-DD): ", validate::parse_date)? else {
            return Ok(());
        };
        let Some(image) = self.prompt("Path to image file (optional): ")? else {
            return Ok(());
        };

        writeln!(self.out, "\n👤 Owner Information")?;
        let Some(owner_name) =
            self.prompt_valid("Owner Name: ", |s| validate::require_non_empty("Owner name", s))?
        else {
            return Ok(());
        };
        let Some(contact_number) = self.prompt("Contact Number: ")? else {
            return Ok(());
        };
        let Some(address) = self.prompt("Address: ")? else {
            return Ok(());
        };

        let pet = Pet {
            id: None,
            owner_id: None,
            name,
            breed,
            birthdate,
            image_path: None,
        };
        let owner = Owner {
            id: None,
            name: owner_name,
            contact_number,
            address,
        };

        let mut image = (!image.is_empty()).then(|| PathBuf::from(image));
        if image.as_deref().is_some_and(|p| !p.is_file()) {
            writeln!(self.out, "❌ Image not found, saving without image.")?;
            image = None;
        }

        match self.db.pets().add_pet_with_owner(&pet, &owner, image.as_deref()) {
            Ok(pet_id) => {
                writeln!(self.out, "\n✅ Pet and owner saved successfully!")?;
                self.view_pet_profile(pet_id)
            }
            Err(e) => {
                warn!(error = %e, "Failed to save pet");
                writeln!(self.out, "❌ Error saving pet: {}", e)?;
                Ok(())
            }
        }
    }

    fn list_pets(&mut self) -> Result<()> {
        writeln!(self.out, "\n📋 All Pets with Owners:")?;
        let pets = match self.db.pets().get_pets_with_owners() {
            Ok(pets) => pets,
            Err(e) => {
                writeln!(self.out, "❌ Error retrieving pets: {}", e)?;
                return Ok(());
            }
        };

        if pets.is_empty() {
            writeln!(self.out, "No pets found in database")?;
            return Ok(());
        }

        for (i, (pet, owner)) in pets.iter().enumerate() {
            let owner = owner
                .as_ref()
                .map(|o| o.to_string())
                .unwrap_or_else(|| "No owner information".to_string());
            writeln!(self.out, "\n{}. {}\n   Owner: {}", i + 1, pet, owner)?;
        }

        self.choose_pet(&pets)
    }

    /// Ask for a listed pet's number and open its profile
    fn choose_pet(&mut self, pets: &[(Pet, Option<Owner>)]) -> Result<()> {
        loop {
            let Some(choice) =
                self.prompt("\nEnter pet number to view profile (or 'back' to return): ")?
            else {
                return Ok(());
            };
            let choice = choice.to_lowercase();
            if choice == "back" {
                return Ok(());
            }

            match choice.parse::<usize>() {
                Ok(n) if (1..=pets.len()).contains(&n) => match pets[n - 1].0.id {
                    Some(id) => return self.view_pet_profile(id),
                    None => writeln!(self.out, "❌ Invalid pet number")?,
                },
                Ok(_) => writeln!(self.out, "❌ Invalid pet number")?,
                Err(_) => writeln!(self.out, "❌ Please enter a valid number or 'back'")?,
            }
        }
    }

    fn add_random_pet(&mut self) -> Result<()> {
        match seed::add_random_pet(self.db, &mut self.rng) {
            Ok(seeded) => {
                writeln!(
                    self.out,
                    "\n✅ Random pet and owner saved! Pet ID: {}",
                    seeded.pet_id
                )?;
                writeln!(
                    self.out,
                    "✅ Random feeding log saved: {} day(s) starting {}",
                    seeded.feeding_log.num_days, seeded.feeding_log.start_date
                )?;
                writeln!(
                    self.out,
                    "✅ Random vaccination saved: {} ({})",
                    seeded.vaccination.vaccine_name, seeded.vaccination.date_administered
                )?;
            }
            Err(e) => writeln!(self.out, "❌ Error saving random pet: {}", e)?,
        }
        Ok(())
    }

    // === PROFILE ===

    fn view_pet_profile(&mut self, pet_id: i64) -> Result<()> {
        loop {
            let (pet, owner) = match self.db.pets().get_pet_by_id(pet_id) {
                Ok(Some(found)) => found,
                Ok(None) => {
                    writeln!(self.out, "❌ Pet with ID {} not found", pet_id)?;
                    return Ok(());
                }
                Err(e) => {
                    writeln!(self.out, "❌ Error accessing pet profile: {}", e)?;
                    return Ok(());
                }
            };

            self.print_profile(pet_id, &pet, owner.as_ref())?;

            writeln!(
                self.out,
                "\nOptions:\n1. Add Vet Visit\n2. Add Vaccination\n3. Add Feeding Log\n4. Back to Menu"
            )?;
            let Some(choice) = self.prompt("\nChoose an option: ")? else {
                return Ok(());
            };
            match choice.as_str() {
                "1" => self.add_vet_visit(pet_id)?,
                "2" => self.add_vaccination(pet_id)?,
                "3" => self.add_feeding_log(pet_id)?,
                "4" => return Ok(()),
                _ => writeln!(self.out, "❌ Invalid choice. Please try again.")?,
            }
        }
    }

    fn print_profile(&mut self, pet_id: i64, pet: &Pet, owner: Option<&Owner>) -> Result<()> {
        writeln!(self.out, "\n{}\n🐾 {}'s Profile\n{}", RULE, pet.name, RULE)?;
        writeln!(
            self.out,
            "Breed: {}\nBirthdate: {}\nAge: {}",
            pet.breed_or_unknown(),
            pet.birthdate,
            pet.age()
        )?;
        if self.db.pets().image_exists(pet) {
            if let Some(path) = &pet.image_path {
                writeln!(self.out, "Image: {}", path)?;
            }
        }
        if let Some(owner) = owner {
            writeln!(
                self.out,
                "\n👤 Owner Information:\nName: {}\nContact: {}\nAddress: {}",
                owner.name, owner.contact_number, owner.address
            )?;
        }

        match self.db.vet_visits().get_by_pet_id(pet_id) {
            Ok(visits) if !visits.is_empty() => {
                writeln!(self.out, "\n🩺 Vet Visits:")?;
                for v in &visits {
                    writeln!(self.out, "  - {}", v)?;
                    if !v.notes.is_empty() {
                        writeln!(self.out, "    Notes: {}", v.notes)?;
                    }
                }
            }
            Ok(_) => {}
            Err(e) => writeln!(self.out, "\n⚠️ Could not load 🩺 vet visits: {}", e)?,
        }

        match self.db.vaccinations().get_by_pet_id(pet_id) {
            Ok(vaxes) if !vaxes.is_empty() => {
                writeln!(self.out, "\n💉 Vaccinations:")?;
                for v in &vaxes {
                    let due = if v.is_due() { " [due]" } else { "" };
                    writeln!(
                        self.out,
                        "  - {} (Administered: {}, Next Due: {}){}",
                        v.vaccine_name, v.date_administered, v.next_due, due
                    )?;
                    if !v.category.is_empty() {
                        writeln!(self.out, "    Category: {}", v.category)?;
                    }
                    if !v.notes.is_empty() {
                        writeln!(self.out, "    Notes: {}", v.notes)?;
                    }
                }
            }
            Ok(_) => {}
            Err(e) => writeln!(self.out, "\n⚠️ Could not load 💉 vaccinations: {}", e)?,
        }

        let invoice = self
            .db
            .feeding_logs()
            .get_by_pet_id(pet_id)
            .map_err(anyhow::Error::from)
            .and_then(|logs| Invoice::build(&self.fees, &logs).map_err(anyhow::Error::from));
        match invoice {
            Ok(invoice) if !invoice.is_empty() => {
                writeln!(self.out, "\n🍖 Feeding Logs:")?;
                writeln!(self.out, "  --- Feeding Log Receipt ---")?;
                // Entry and breakdown pairs, then the total
                let receipt = invoice.receipt(&self.fees);
                let total_at = receipt.len().saturating_sub(1);
                for (i, text) in receipt.iter().enumerate() {
                    if i == total_at {
                        writeln!(self.out, "  --------------------------")?;
                        writeln!(self.out, "  {}", text)?;
                    } else if i % 2 == 0 {
                        writeln!(self.out, "  - {}", text)?;
                    } else {
                        writeln!(self.out, "    {}", text)?;
                    }
                }
            }
            Ok(_) => {}
            Err(e) => writeln!(self.out, "\n⚠️ Could not load 🍖 feeding logs: {}", e)?,
        }

        Ok(())
    }

    // === RECORD ENTRY ===

    fn add_vet_visit(&mut self, pet_id: i64) -> Result<()> {
        writeln!(self.out, "\n🩺 Add Vet Visit")?;
        let Some(visit_date) = self.prompt_valid("Visit Date (YYYY-MM-DD): ", validate::parse_date)? else {
            return Ok(());
        };
        let Some(reason) = self.prompt("Reason: ")? else {
            return Ok(());
        };
        let Some(notes) = self.prompt("Notes (optional): ")? else {
            return Ok(());
        };

        let visit = VetVisit {
            id: None,
            pet_id,
            visit_date,
            reason,
            notes,
        };
        match self.db.vet_visits().create(&visit) {
            Ok(_) => writeln!(self.out, "✅ Vet Visit saved.")?,
            Err(e) => writeln!(self.out, "❌ Error saving vet visit: {}", e)?,
        }
        Ok(())
    }

    fn add_vaccination(&mut self, pet_id: i64) -> Result<()> {
        writeln!(self.out, "\n💉 Add Vaccination")?;
        let Some(name) =
            self.prompt_valid("Vaccine Name: ", |s| validate::require_non_empty("Vaccine name", s))?
        else {
            return Ok(());
        };
        let Some(administered) =
            self.prompt_valid("Date Administered (YYYY-MM-DD): ", validate::parse_date)?
        else {
            return Ok(());
        };
        let Some(next_due) = self.prompt_valid(
            "Next Due Date (YYYY-MM-DD, blank for default): ",
            |s| {
                if s.trim().is_empty() {
                    Ok(None)
                } else {
                    validate::parse_date(s).map(Some)
                }
            },
        )?
        else {
            return Ok(());
        };
        let Some(category) = self.prompt("Category (e.g., Core, Optional, Rabies): ")? else {
            return Ok(());
        };
        let Some(notes) = self.prompt("Notes (optional): ")? else {
            return Ok(());
        };

        let mut vax = Vaccination::new(pet_id, name, administered, category, notes);
        if let Some(due) = next_due {
            vax.next_due = due;
        }
        match self.db.vaccinations().create(&vax) {
            Ok(_) => writeln!(self.out, "✅ Vaccination saved.")?,
            Err(e) => writeln!(self.out, "❌ Error saving vaccination: {}", e)?,
        }
        Ok(())
    }

    fn add_feeding_log(&mut self, pet_id: i64) -> Result<()> {
        writeln!(self.out, "\n🍖 Add Feeding Log")?;
        let Some(start_date) = self.prompt_valid("Start Date (YYYY-MM-DD): ", validate::parse_date)? else {
            return Ok(());
        };
        let Some(num_days) = self.prompt_valid("Number of Days: ", validate::parse_day_count)? else {
            return Ok(());
        };
        let Some(plan) = self.prompt_valid(
            "Feeding Plan (0 = none, 1 = once, 2 = twice, 3 = thrice): ",
            validate::parse_feeding_plan,
        )?
        else {
            return Ok(());
        };

        let log = FeedingLog {
            id: None,
            pet_id,
            start_date,
            num_days,
            plan,
        };
        match self.db.feeding_logs().create(&log) {
            Ok(_) => writeln!(self.out, "✅ Feeding Log saved.")?,
            Err(e) => writeln!(self.out, "❌ Error saving feeding log: {}", e)?,
        }
        Ok(())
    }
}
