//! The catalog filter engine.
//!
//! [`CatalogFilterEngine`] owns one catalog snapshot and one filter state and
//! derives the filtered view from them. Derivation is synchronous and memoized:
//! [`CatalogFilterEngine::view`] only recomputes when the catalog snapshot is a
//! different allocation or the filter state is no longer equal to the one the
//! memoized view was built from.

use super::facets::{derive_facets, FacetSet};
use super::state::FilterState;
use crate::attributes::{FilterSchema, PredicateChain};
use crate::error::Result;
use crate::model::{CatalogEntry, EntityId};
use std::sync::Arc;
use tracing::debug;

/// Entries of `catalog` that satisfy every predicate of `state`, in catalog order.
pub fn apply_filters<'a, E: CatalogEntry>(catalog: &'a [E], state: &FilterState) -> Vec<&'a E> {
    let chain = PredicateChain::compile(state);
    catalog.iter().filter(|entry| chain.matches(*entry)).collect()
}

fn matching_indices<E: CatalogEntry>(catalog: &[E], state: &FilterState) -> Vec<usize> {
    let chain = PredicateChain::compile(state);
    catalog
        .iter()
        .enumerate()
        .filter(|(_, entry)| chain.matches(*entry))
        .map(|(idx, _)| idx)
        .collect()
}

/// A filtered view over a catalog snapshot.
///
/// Holds the snapshot plus the positions of matching entries, so producing or
/// cloning a view never copies entries.
pub struct FilteredView<E> {
    catalog: Arc<[E]>,
    indices: Arc<[usize]>,
}

impl<E> Clone for FilteredView<E> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            indices: Arc::clone(&self.indices),
        }
    }
}

impl<E> std::fmt::Debug for FilteredView<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteredView")
            .field("catalog_len", &self.catalog.len())
            .field("indices", &self.indices)
            .finish()
    }
}

impl<E: CatalogEntry> FilteredView<E> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&E> {
        self.indices
            .get(position)
            .and_then(|idx| self.catalog.get(*idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.indices.iter().map(move |idx| &self.catalog[*idx])
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.iter().map(CatalogEntry::id).collect()
    }

    /// Whether both views are the same memoized result.
    pub fn same_as(&self, other: &FilteredView<E>) -> bool {
        Arc::ptr_eq(&self.catalog, &other.catalog) && Arc::ptr_eq(&self.indices, &other.indices)
    }
}

struct Memo<E> {
    catalog: Arc<[E]>,
    state: Arc<FilterState>,
    view: FilteredView<E>,
}

/// Filtered, faceted view over one catalog snapshot.
pub struct CatalogFilterEngine<E> {
    schema: &'static FilterSchema,
    catalog: Arc<[E]>,
    state: Arc<FilterState>,
    facets: Arc<FacetSet>,
    memo: Option<Memo<E>>,
    recomputations: usize,
}

impl<E: CatalogEntry> CatalogFilterEngine<E> {
    pub fn new(schema: &'static FilterSchema, catalog: impl Into<Arc<[E]>>) -> Self {
        let catalog = catalog.into();
        let facets = Arc::new(derive_facets(schema, &catalog[..]));
        Self {
            schema,
            catalog,
            state: Arc::new(FilterState::new(schema)),
            facets,
            memo: None,
            recomputations: 0,
        }
    }

    /// Seed one dimension at construction (e.g., from a URL parameter).
    ///
    /// This is a one-time seed; the engine never re-reads the source.
    pub fn seed(mut self, key: &str, value: &str) -> Result<Self> {
        self.set_filter(key, value)?;
        Ok(self)
    }

    /// Seed from query-string pairs. Only dimensions that declare a `query_param`
    /// are seeded; unrelated parameters are ignored.
    pub fn seed_from_query<I, K, V>(mut self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (param, value) in pairs {
            let target = self
                .schema
                .dimensions
                .iter()
                .find(|d| d.query_param == Some(param.as_ref()));
            if let Some(spec) = target {
                self.set_filter(spec.name, value.as_ref())?;
            }
        }
        Ok(self)
    }

    pub fn schema(&self) -> &'static FilterSchema {
        self.schema
    }

    pub fn catalog(&self) -> &Arc<[E]> {
        &self.catalog
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.state
    }

    /// Facets of the full catalog. Unaffected by filter changes.
    pub fn facets(&self) -> Arc<FacetSet> {
        Arc::clone(&self.facets)
    }

    /// Swap in a new catalog snapshot. Facets are re-derived only when the
    /// snapshot is a different allocation.
    pub fn replace_catalog(&mut self, catalog: impl Into<Arc<[E]>>) {
        let catalog = catalog.into();
        if Arc::ptr_eq(&catalog, &self.catalog) {
            return;
        }
        self.facets = Arc::new(derive_facets(self.schema, &catalog[..]));
        self.catalog = catalog;
    }

    /// Replace exactly one filter key. Unknown keys are an error.
    pub fn set_filter(&mut self, key: &str, value: &str) -> Result<()> {
        let next = self.state.set_filter(key, value)?;
        if next != *self.state {
            self.state = Arc::new(next);
        }
        Ok(())
    }

    /// Reset every filter in a single state transition.
    pub fn clear_all(&mut self) {
        let next = self.state.clear_all();
        if next != *self.state {
            self.state = Arc::new(next);
        }
    }

    /// The filtered view for the current catalog and filter state.
    pub fn view(&mut self) -> FilteredView<E> {
        if let Some(memo) = &self.memo {
            let same_catalog = Arc::ptr_eq(&memo.catalog, &self.catalog);
            let same_state = Arc::ptr_eq(&memo.state, &self.state) || *memo.state == *self.state;
            if same_catalog && same_state {
                return memo.view.clone();
            }
        }

        let indices: Arc<[usize]> = matching_indices(&self.catalog[..], &self.state).into();
        self.recomputations += 1;
        debug!(
            schema = self.schema.name,
            total = self.catalog.len(),
            matched = indices.len(),
            active = ?self.state.active_filters(),
            "recomputed filtered view"
        );

        let view = FilteredView {
            catalog: Arc::clone(&self.catalog),
            indices,
        };
        self.memo = Some(Memo {
            catalog: Arc::clone(&self.catalog),
            state: Arc::clone(&self.state),
            view: view.clone(),
        });
        view
    }

    /// How many times the filtered view has been computed.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}
