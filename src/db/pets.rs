//! Pets and their owners

use super::{Database, DbError, IMAGES_DIR};
use crate::types::{Owner, Pet};
use rusqlite::{params, OptionalExtension, Row};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const SELECT_PET_WITH_OWNER: &str = "
    SELECT p.id, p.owner_id, p.name, p.breed, p.birthdate, p.image_path,
           o.id, o.name, o.contact_number, o.address
    FROM pets p
    LEFT JOIN owners o ON o.id = p.owner_id";

pub struct PetController<'a> {
    db: &'a Database,
}

impl<'a> PetController<'a> {
    pub(super) fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Root that stored image paths are relative to
    pub fn data_dir(&self) -> &Path {
        self.db.data_dir()
    }

    /// Insert an owner and their pet, copying the image (if any) into the
    /// data directory. Returns the new pet id.
    pub fn add_pet_with_owner(
        &self,
        pet: &Pet,
        owner: &Owner,
        image: Option<&Path>,
    ) -> Result<i64, DbError> {
        let tx = self.db.conn().unchecked_transaction()?;

        tx.execute(
            "INSERT INTO owners (name, contact_number, address) VALUES (?1, ?2, ?3)",
            params![owner.name, owner.contact_number, owner.address],
        )?;
        let owner_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO pets (owner_id, name, breed, birthdate, image_path)
             VALUES (?1, ?2, ?3, ?4, NULL)",
            params![owner_id, pet.name, pet.breed, pet.birthdate],
        )?;
        let pet_id = tx.last_insert_rowid();

        let stored = match image {
            Some(src) if src.is_file() => Some(self.store_image(pet_id, src)?),
            Some(src) => {
                warn!(path = %src.display(), "Image not found, saving pet without image");
                None
            }
            None => None,
        };

        // A copied image must not outlive a rolled back pet row
        let saved = match &stored {
            Some(relative) => tx
                .execute(
                    "UPDATE pets SET image_path = ?1 WHERE id = ?2",
                    params![relative, pet_id],
                )
                .map(|_| ()),
            None => Ok(()),
        }
        .and_then(|()| tx.commit());

        if let Err(e) = saved {
            if let Some(relative) = &stored {
                self.remove_image(relative);
            }
            return Err(e.into());
        }
        info!(pet_id, owner_id, name = %pet.name, "Saved pet and owner");
        Ok(pet_id)
    }

    /// Copy an image to `images/pet_<id>.<ext>`, returning the relative path
    fn store_image(&self, pet_id: i64, src: &Path) -> Result<String, DbError> {
        let ext = src
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("img")
            .to_lowercase();
        let relative = format!("{}/pet_{}.{}", IMAGES_DIR, pet_id, ext);
        let dest = self.data_dir().join(&relative);

        fs::copy(src, &dest).map_err(|e| DbError::io("Failed to copy image to", &dest, e))?;
        Ok(relative)
    }

    fn remove_image(&self, relative: &str) {
        let path = self.data_dir().join(relative);
        if let Err(e) = fs::remove_file(&path) {
            warn!(path = %path.display(), error = %e, "Failed to remove orphaned image");
        }
    }

    pub fn get_pet_by_id(&self, id: i64) -> Result<Option<(Pet, Option<Owner>)>, DbError> {
        let sql = format!("{} WHERE p.id = ?1", SELECT_PET_WITH_OWNER);
        let found = self
            .db
            .conn()
            .query_row(&sql, [id], pet_with_owner)
            .optional()?;
        Ok(found)
    }

    /// Every pet with its owner, oldest entry first
    pub fn get_pets_with_owners(&self) -> Result<Vec<(Pet, Option<Owner>)>, DbError> {
        let sql = format!("{} ORDER BY p.id", SELECT_PET_WITH_OWNER);
        let mut stmt = self.db.conn().prepare(&sql)?;
        let rows = stmt
            .query_map([], pet_with_owner)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Whether the pet's stored image is present on disk
    pub fn image_exists(&self, pet: &Pet) -> bool {
        pet.image_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| self.data_dir().join(p).is_file())
            .unwrap_or(false)
    }
}

fn pet_with_owner(row: &Row<'_>) -> rusqlite::Result<(Pet, Option<Owner>)> {
    let pet = Pet {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        breed: row.get(3)?,
        birthdate: row.get(4)?,
        image_path: row.get(5)?,
    };

    let owner = match row.get::<_, Option<i64>>(6)? {
        Some(id) => Some(Owner {
            id: Some(id),
            name: row.get(7)?,
            contact_number: row.get(8)?,
            address: row.get(9)?,
        }),
        None => None,
    };

    Ok((pet, owner))
}
