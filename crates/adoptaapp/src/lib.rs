//! # adoptaapp
//!
//! The UI-independent core of the adopta marketplace: filtering a catalog of pets
//! or products, and keeping a user's favorites in sync with a remote.
//!
//! ## Architecture
//!
//! ```text
//! host (CLI, web) ──► api::Marketplace ─┬─► catalog::CatalogFilterEngine ──► attributes
//!                                       └─► favorites::FavoriteSet ──► remote::FavoritesRemote
//! ```
//!
//! The two subsystems share nothing but entity IDs:
//!
//! - **Catalog filtering** ([`catalog`], [`attributes`]) is synchronous and pure.
//!   A [`attributes::FilterSchema`] fixes which dimensions exist; the engine
//!   derives facets from the full catalog and memoizes the filtered view.
//! - **Favorites** ([`favorites`], [`remote`]) is async. Toggles are applied
//!   optimistically, serialized per ID, and rolled back when the remote fails.
//!
//! [`describe`] wraps the AI description generator, and [`config`] loads the
//! settings hosts share.
//!
//! ## Errors
//!
//! Everything fallible returns [`error::Result`]. Failed favorite toggles are the
//! exception: they are recovered locally and reported as
//! [`favorites::ToggleOutcome::RolledBack`], not as errors.

pub mod api;
pub mod attributes;
pub mod catalog;
pub mod config;
pub mod describe;
pub mod error;
pub mod favorites;
pub mod model;
pub mod remote;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
