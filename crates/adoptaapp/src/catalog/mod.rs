//! # Catalog Filtering
//!
//! Listing pages show a catalog snapshot narrowed by a handful of filters and a
//! free-text search. Everything here is synchronous and pure apart from the
//! engine's memo.
//!
//! - [`FilterState`]: one selection per schema dimension plus the search term,
//!   changed only through the `set_filter` / `clear_all` reducers
//! - [`FacetSet`]: distinct values per facet dimension, derived from the full
//!   catalog so that narrowing one filter never removes options from another
//! - [`apply_filters`]: the ordered subset satisfying every predicate
//! - [`CatalogFilterEngine`]: owns a snapshot and a state and memoizes the view
//!
//! ## Flow
//!
//! ```text
//! catalog ──► derive_facets ──► FacetSet
//!    │
//!    └──► FilterState ──► PredicateChain ──► FilteredView
//! ```

mod engine;
mod facets;
mod state;

pub use engine::{apply_filters, CatalogFilterEngine, FilteredView};
pub use facets::{derive_facets, FacetSet, NumericRange};
pub use state::{FilterState, FilterValue, ALL, SEARCH_KEY};
