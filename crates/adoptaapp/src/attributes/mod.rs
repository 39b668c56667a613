//! # Attribute System
//!
//! Catalog filtering is driven by a fixed registry of dimensions rather than by
//! inspecting arbitrary record keys. This module holds the shared pieces:
//!
//! - **Values**: [`AttrValue`] (borrowed view of one attribute) and [`Scalar`]
//!   (number-or-string as received from the host), with fail-closed numeric coercion
//! - **Specifications**: [`FilterSchema`] / [`DimensionSpec`], one per catalog kind
//! - **Predicates**: [`PredicateChain`], compiled from a filter state
//!
//! ## Dimension Kinds
//!
//! | Kind | Examples | Predicate |
//! |------|----------|-----------|
//! | `Facet` | `species`, `city`, `gender`, `category` | exact equality |
//! | `Buckets` | `ageYears` | value inside a named range |
//! | `Ceiling` | `price` | value `<=` limit |
//!
//! Every dimension also accepts `all`, which contributes no predicate.

mod filter;
mod spec;
mod value;

pub use filter::{Predicate, PredicateChain};
pub use spec::{
    schema_by_name, Bucket, DimensionKind, DimensionSpec, FilterSchema, AGE_BUCKETS,
    PET_SCHEMA, PRODUCT_SCHEMA,
};
pub use value::{AttrValue, Scalar};
