use crate::favorites::FavoriteSet;
use crate::model::{EntityId, Pet, Product};
use crate::remote::InMemoryRemote;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// A small pet catalog covering every facet and age bucket.
pub fn sample_pets() -> Vec<Pet> {
    vec![
        Pet::new(1, "Rex")
            .with_species("dog")
            .with_age(1.0)
            .with_city("Bogotá")
            .with_gender("Macho")
            .with_description("Playful puppy, loves fetch"),
        Pet::new(2, "Mia")
            .with_species("cat")
            .with_age(5.0)
            .with_city("Medellín")
            .with_gender("Hembra")
            .with_description("Calm and affectionate"),
        Pet::new(3, "Bobby")
            .with_species("dog")
            .with_age(9.0)
            .with_city("Bogotá")
            .with_gender("Macho")
            .with_description("Gentle senior, good with kids"),
        Pet::new(4, "Toby")
            .with_species("dog")
            .with_age(3.0)
            .with_city("Cali")
            .with_gender("Macho")
            .with_description("Energetic and friendly"),
        Pet::new(5, "Nube")
            .with_species("cat")
            .with_age("unknown")
            .with_city("Cali")
            .with_gender("Hembra"),
    ]
}

pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new(10, "Dog food 5kg")
            .with_category("Food")
            .with_price(45000.0),
        Product::new(11, "Leather collar")
            .with_category("Accessories")
            .with_price(25000.0),
        Product::new(12, "Cat bed")
            .with_category("Accessories")
            .with_price("90000"),
        Product::new(13, "Chew toy").with_category("Toys").with_price(8000.0),
    ]
}

/// A favorite set over an in-memory remote, already initialized with `ids`.
pub async fn ready_favorites(ids: &[EntityId]) -> (Arc<InMemoryRemote>, Arc<FavoriteSet>) {
    let remote = Arc::new(InMemoryRemote::with_ids(ids.iter().copied()));
    let set = Arc::new(FavoriteSet::new(remote.clone()));
    if let Err(e) = set.initialize().await {
        panic!("in-memory remote failed to initialize: {}", e);
    }
    (remote, set)
}

/// A temp directory with catalog and favorites files.
pub struct TestFiles {
    // Keep the directory alive for the duration of the test
    pub _temp_dir: TempDir,
    pub root: PathBuf,
    pub catalog: PathBuf,
    pub favorites: PathBuf,
}

impl TestFiles {
    pub fn pets() -> Self {
        Self::with_catalog(&sample_pets())
    }

    pub fn products() -> Self {
        Self::with_catalog(&sample_products())
    }

    pub fn with_catalog<T: serde::Serialize>(entries: &[T]) -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let catalog = root.join("catalog.json");
        let favorites = root.join("favorites.json");
        let json = serde_json::to_string_pretty(entries).expect("failed to serialize catalog");
        std::fs::write(&catalog, json).expect("failed to write catalog");
        Self {
            _temp_dir: temp_dir,
            root,
            catalog,
            favorites,
        }
    }

    /// Seed the favorites file.
    pub fn with_favorites(self, ids: &[EntityId]) -> Self {
        let json = serde_json::to_string(ids).expect("failed to serialize favorites");
        std::fs::write(&self.favorites, json).expect("failed to write favorites");
        self
    }
}
