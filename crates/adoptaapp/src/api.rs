//! # Marketplace Facade
//!
//! [`Marketplace`] is the single entry point a host (the CLI, a web handler) uses
//! to drive one listing page: a [`CatalogFilterEngine`] for the catalog plus a
//! shared [`FavoriteSet`].
//!
//! The two halves stay independent. Filtering never looks at favorites and
//! toggling a favorite never recomputes the filtered view; they only meet when
//! the view is turned into [`Card`]s.
//!
//! ## What the Facade Does NOT Do
//!
//! - **I/O**: loading the catalog file is the host's job
//! - **Presentation**: cards are data, not strings

use crate::catalog::{CatalogFilterEngine, FacetSet, FilteredView};
use crate::error::{AdoptaError, Result};
use crate::favorites::{FavoriteSet, ToggleOutcome};
use crate::model::{CatalogEntry, EntityId};
use serde::Serialize;
use std::sync::Arc;

/// One entry as a listing renders it.
#[derive(Debug, Clone, Serialize)]
pub struct Card<'a, E> {
    #[serde(flatten)]
    pub entry: &'a E,
    pub favorite: bool,
    pub pending: bool,
}

pub struct Marketplace<E> {
    engine: CatalogFilterEngine<E>,
    favorites: Arc<FavoriteSet>,
}

impl<E: CatalogEntry> Marketplace<E> {
    pub fn new(engine: CatalogFilterEngine<E>, favorites: Arc<FavoriteSet>) -> Self {
        Self { engine, favorites }
    }

    pub fn engine(&self) -> &CatalogFilterEngine<E> {
        &self.engine
    }

    pub fn favorites(&self) -> &Arc<FavoriteSet> {
        &self.favorites
    }

    pub fn set_filter(&mut self, key: &str, value: &str) -> Result<()> {
        self.engine.set_filter(key, value)
    }

    pub fn clear_all(&mut self) {
        self.engine.clear_all()
    }

    pub fn view(&mut self) -> FilteredView<E> {
        self.engine.view()
    }

    pub fn facets(&self) -> Arc<FacetSet> {
        self.engine.facets()
    }

    /// Pair every entry of `view` with its current favorite state.
    pub fn cards<'v>(&self, view: &'v FilteredView<E>) -> Vec<Card<'v, E>> {
        view.iter()
            .map(|entry| {
                let status = self.favorites.status(entry.id());
                Card {
                    entry,
                    favorite: status.favorite,
                    pending: status.pending,
                }
            })
            .collect()
    }

    /// Catalog entries currently favorited, in catalog order, ignoring filters.
    pub fn favorites_in_catalog(&self) -> Vec<&E> {
        self.engine
            .catalog()
            .iter()
            .filter(|entry| self.favorites.is_favorite(entry.id()))
            .collect()
    }

    /// Toggle an entry of this catalog. IDs outside the catalog are rejected.
    pub async fn toggle(&self, id: EntityId) -> Result<ToggleOutcome> {
        self.ensure_listed(id)?;
        Ok(self.favorites.toggle_favorite(id).await)
    }

    pub async fn add(&self, id: EntityId) -> Result<ToggleOutcome> {
        self.ensure_listed(id)?;
        Ok(self.favorites.add_to_favorites(id).await)
    }

    /// Removal does not require the ID to still be listed, so stale favorites can
    /// be cleaned up.
    pub async fn remove(&self, id: EntityId) -> Result<ToggleOutcome> {
        Ok(self.favorites.remove_from_favorites(id).await)
    }

    fn ensure_listed(&self, id: EntityId) -> Result<()> {
        if self.engine.catalog().iter().any(|entry| entry.id() == id) {
            Ok(())
        } else {
            Err(AdoptaError::NotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::PET_SCHEMA;
    use crate::model::Pet;
    use crate::remote::InMemoryRemote;

    async fn market(favorites: &[EntityId]) -> Marketplace<Pet> {
        let catalog = vec![
            Pet::new(1, "Rex").with_species("dog"),
            Pet::new(2, "Mia").with_species("cat"),
            Pet::new(3, "Bobby").with_species("dog"),
        ];
        let remote = Arc::new(InMemoryRemote::with_ids(favorites.iter().copied()));
        let set = Arc::new(FavoriteSet::new(remote));
        set.initialize().await.unwrap();
        Marketplace::new(CatalogFilterEngine::new(&PET_SCHEMA, catalog), set)
    }

    #[tokio::test]
    async fn cards_carry_favorite_state() {
        let mut market = market(&[3]).await;
        market.set_filter("species", "dog").unwrap();
        let view = market.view();
        let cards = market.cards(&view);

        let summary: Vec<_> = cards.iter().map(|c| (c.entry.id, c.favorite)).collect();
        assert_eq!(summary, vec![(1, false), (3, true)]);
        assert!(cards.iter().all(|c| !c.pending));
    }

    #[tokio::test]
    async fn clearing_filters_leaves_favorites_alone() {
        let mut market = market(&[2]).await;
        market.set_filter("species", "cat").unwrap();
        market.clear_all();

        assert_eq!(market.favorites().favorite_ids(), vec![2]);
        assert_eq!(market.view().len(), 3);
    }

    #[tokio::test]
    async fn toggling_does_not_recompute_view() {
        let mut market = market(&[]).await;
        let before = market.view();
        market.toggle(1).await.unwrap();
        let after = market.view();

        assert!(before.same_as(&after));
        assert_eq!(market.engine().recomputations(), 1);
        assert!(market.cards(&after)[0].favorite);
    }

    #[tokio::test]
    async fn favorites_dashboard_ignores_filters() {
        let mut market = market(&[1, 2]).await;
        market.set_filter("species", "dog").unwrap();
        let ids: Vec<_> = market.favorites_in_catalog().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn unknown_ids_are_rejected_for_toggle_and_add() {
        let market = market(&[99]).await;
        assert!(matches!(
            market.toggle(42).await,
            Err(AdoptaError::NotFound(42))
        ));
        assert!(matches!(market.add(42).await, Err(AdoptaError::NotFound(42))));
        assert!(market.remove(99).await.unwrap().is_committed());
    }

    #[tokio::test]
    async fn card_serializes_flat() {
        let mut market = market(&[1]).await;
        market.set_filter("species", "dog").unwrap();
        let view = market.view();
        let json = serde_json::to_value(market.cards(&view)).unwrap();
        assert_eq!(json[0]["name"], "Rex");
        assert_eq!(json[0]["favorite"], true);
        assert_eq!(json[0]["pending"], false);
    }
}
