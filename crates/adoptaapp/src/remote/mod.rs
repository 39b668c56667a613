//! # Favorites Remote
//!
//! The remote is the source of truth for which entities a user has favorited.
//! [`crate::favorites::FavoriteSet`] keeps an optimistic local copy and reconciles
//! against it.
//!
//! This trait handles the "where" (memory, a JSON file, an HTTP API in the host),
//! while `FavoriteSet` handles the "what" (optimistic flips, rollback, serialization).
//!
//! ## Implementations
//!
//! - [`InMemoryRemote`]: for tests; can fail or hold calls on demand
//! - [`FileRemote`]: a JSON array of IDs on disk, used by the CLI

mod fs;
mod memory;

pub use fs::FileRemote;
pub use memory::InMemoryRemote;

use crate::error::Result;
use crate::model::EntityId;
use async_trait::async_trait;

/// Remote favorites endpoint. Every method returns `Err` on any non-success.
#[async_trait]
pub trait FavoritesRemote: Send + Sync {
    /// Current favorite IDs for the user, in no particular order.
    async fn list_favorite_ids(&self) -> Result<Vec<EntityId>>;

    /// Mark `id` as favorited. Adding an existing favorite succeeds.
    async fn add_favorite(&self, id: EntityId) -> Result<()>;

    /// Remove `id` from favorites. Removing a non-favorite succeeds.
    async fn remove_favorite(&self, id: EntityId) -> Result<()>;
}
