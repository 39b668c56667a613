//! Catalog records.
//!
//! The engine only sees entries through [`CatalogEntry`]: a stable id, a fixed
//! set of named attributes and a few free-text fields. Records are plain structs
//! with known optional fields; nothing is looked up by reflection.
//!
//! Field names serialize in camelCase (`ageYears`), matching the JSON the host
//! application already produces for its listing pages.

use crate::attributes::{AttrValue, Scalar};
use serde::{Deserialize, Serialize};

/// Stable identifier of a catalog entity (pet or product).
pub type EntityId = u64;

/// Read-only view of a record the filter engine can work with.
pub trait CatalogEntry {
    fn id(&self) -> EntityId;

    /// Filterable attribute by name. `None` when absent or unknown.
    fn attr(&self, name: &str) -> Option<AttrValue<'_>>;

    /// Free-text field by name, for search.
    fn text(&self, name: &str) -> Option<&str>;
}

/// A pet listed for adoption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
    /// Age in years as received; may be a number or a string.
    #[serde(default)]
    pub age_years: Option<Scalar>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Name of the shelter or person offering the pet.
    #[serde(default)]
    pub shelter: Option<String>,
}

impl Pet {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            species: None,
            breed: None,
            age_years: None,
            gender: None,
            city: None,
            description: String::new(),
            shelter: None,
        }
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    pub fn with_age(mut self, age: impl Into<Scalar>) -> Self {
        self.age_years = Some(age.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl CatalogEntry for Pet {
    fn id(&self) -> EntityId {
        self.id
    }

    fn attr(&self, name: &str) -> Option<AttrValue<'_>> {
        match name {
            "species" => self.species.as_deref().map(AttrValue::Text),
            "city" => self.city.as_deref().map(AttrValue::Text),
            "gender" => self.gender.as_deref().map(AttrValue::Text),
            "breed" => self.breed.as_deref().map(AttrValue::Text),
            "ageYears" => self.age_years.as_ref().map(Scalar::as_attr),
            _ => None,
        }
    }

    fn text(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "description" => Some(&self.description),
            _ => None,
        }
    }
}

/// A product sold through the marketplace (food, accessories).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<Scalar>,
    #[serde(default)]
    pub seller: Option<String>,
}

impl Product {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category: None,
            price: None,
            seller: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price(mut self, price: impl Into<Scalar>) -> Self {
        self.price = Some(price.into());
        self
    }
}

impl CatalogEntry for Product {
    fn id(&self) -> EntityId {
        self.id
    }

    fn attr(&self, name: &str) -> Option<AttrValue<'_>> {
        match name {
            "category" => self.category.as_deref().map(AttrValue::Text),
            "price" => self.price.as_ref().map(Scalar::as_attr),
            "seller" => self.seller.as_deref().map(AttrValue::Text),
            _ => None,
        }
    }

    fn text(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "description" => Some(&self.description),
            _ => None,
        }
    }
}
