//! Animal profile model.
//!
//! # Invariants
//! - `slug` is derived from `name` and unique across live animals.
//! - `herd_id` may point at a deleted herd; reads then carry `herd_name = None`.

use crate::model::herd::HerdId;
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type AnimalId = Uuid;

/// Stored animal profile, as returned by reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub name: String,
    pub slug: String,
    pub species: String,
    pub breed: Option<String>,
    pub herd_id: Option<HerdId>,
    /// Resolved at read time; `None` when unassigned or the herd is gone.
    pub herd_name: Option<String>,
    pub bio: String,
    pub image_url: Option<String>,
    pub is_featured: bool,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds.
    pub updated_at: i64,
}

impl Animal {
    /// Checks field rules on the merged record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("species", &self.species)
    }
}

/// Input for creating an animal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnimal {
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub herd_id: Option<HerdId>,
    pub bio: String,
    pub image_url: Option<String>,
    pub is_featured: bool,
}

impl NewAnimal {
    pub fn new(name: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            breed: None,
            herd_id: None,
            bio: String::new(),
            image_url: None,
            is_featured: false,
        }
    }

    pub fn with_breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    pub fn in_herd(mut self, herd_id: HerdId) -> Self {
        self.herd_id = Some(herd_id);
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = is_featured;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("species", &self.species)
    }
}

/// Partial update for an animal.
///
/// `None` leaves a field untouched. Nullable fields use a nested `Option`
/// so `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalPatch {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<Option<String>>,
    pub herd_id: Option<Option<HerdId>>,
    pub bio: Option<String>,
    pub image_url: Option<Option<String>>,
    pub is_featured: Option<bool>,
}

impl AnimalPatch {
    /// Copies every provided field onto `animal`. Does not touch `slug`.
    pub fn apply_to(&self, animal: &mut Animal) {
        if let Some(name) = &self.name {
            animal.name = name.clone();
        }
        if let Some(species) = &self.species {
            animal.species = species.clone();
        }
        if let Some(breed) = &self.breed {
            animal.breed = breed.clone();
        }
        if let Some(herd_id) = self.herd_id {
            animal.herd_id = herd_id;
        }
        if let Some(bio) = &self.bio {
            animal.bio = bio.clone();
        }
        if let Some(image_url) = &self.image_url {
            animal.image_url = image_url.clone();
        }
        if let Some(is_featured) = self.is_featured {
            animal.is_featured = is_featured;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Animal, AnimalPatch, NewAnimal};
    use crate::model::validation::ValidationError;
    use uuid::Uuid;

    fn stored() -> Animal {
        Animal {
            id: Uuid::new_v4(),
            name: "Juniper".to_string(),
            slug: "juniper".to_string(),
            species: "Burro".to_string(),
            breed: Some("Standard".to_string()),
            herd_id: None,
            herd_name: None,
            bio: "Arrived in spring.".to_string(),
            image_url: None,
            is_featured: false,
            created_at: 1,
            updated_at: 1,
        }
    }

    #[test]
    fn draft_requires_name_and_species() {
        assert_eq!(
            NewAnimal::new("  ", "Burro").validate(),
            Err(ValidationError::BlankField("name"))
        );
        assert_eq!(
            NewAnimal::new("Juniper", "").validate(),
            Err(ValidationError::BlankField("species"))
        );
        assert!(NewAnimal::new("Juniper", "Burro").validate().is_ok());
    }

    #[test]
    fn patch_leaves_omitted_fields_untouched() {
        let mut animal = stored();
        let patch = AnimalPatch {
            bio: Some("Loves carrots.".to_string()),
            ..AnimalPatch::default()
        };
        patch.apply_to(&mut animal);
        assert_eq!(animal.bio, "Loves carrots.");
        assert_eq!(animal.name, "Juniper");
        assert_eq!(animal.breed.as_deref(), Some("Standard"));
    }

    #[test]
    fn patch_can_clear_nullable_fields() {
        let mut animal = stored();
        let patch = AnimalPatch {
            breed: Some(None),
            ..AnimalPatch::default()
        };
        patch.apply_to(&mut animal);
        assert_eq!(animal.breed, None);
    }
}
