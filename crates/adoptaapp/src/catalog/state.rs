//! Filter state and its reducers.
//!
//! A [`FilterState`] holds one [`FilterValue`] for every dimension of its schema
//! plus the free-text search term. It is only ever changed through the pure
//! reducers [`FilterState::set_filter`] and [`FilterState::clear_all`], which
//! return a new state and leave the original untouched.

use crate::attributes::{DimensionKind, DimensionSpec, FilterSchema};
use crate::error::{AdoptaError, Result};
use std::fmt;

/// Key that addresses the free-text search term in [`FilterState::set_filter`].
pub const SEARCH_KEY: &str = "searchTerm";

/// Sentinel selection meaning "no constraint".
pub const ALL: &str = "all";

/// The selection for one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue {
    #[default]
    All,
    Selected(String),
}

impl FilterValue {
    /// Parse a raw selection; the literal `"all"` means no constraint.
    pub fn parse(raw: &str) -> Self {
        if raw == ALL {
            FilterValue::All
        } else {
            FilterValue::Selected(raw.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FilterValue::All)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilterValue::All => ALL,
            FilterValue::Selected(v) => v,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current selection for every dimension of a schema, plus the search term.
#[derive(Debug, Clone)]
pub struct FilterState {
    schema: &'static FilterSchema,
    /// Parallel to `schema.dimensions`.
    values: Vec<FilterValue>,
    search_term: String,
}

impl FilterState {
    /// A state with every dimension set to `all` and an empty search term.
    pub fn new(schema: &'static FilterSchema) -> Self {
        Self {
            schema,
            values: vec![FilterValue::All; schema.dimensions.len()],
            search_term: String::new(),
        }
    }

    pub fn schema(&self) -> &'static FilterSchema {
        self.schema
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        let idx = self.position(key)?;
        self.values.get(idx)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Each dimension paired with its current selection, in schema order.
    pub fn selections(&self) -> impl Iterator<Item = (&'static DimensionSpec, &FilterValue)> {
        self.schema.dimensions.iter().zip(self.values.iter())
    }

    /// Replace exactly one key, leaving every other selection untouched.
    ///
    /// `searchTerm` sets the free-text term. Unknown keys, unknown bucket names and
    /// non-numeric ceilings are rejected here so that filtering itself never sees a
    /// selection it has no predicate for.
    pub fn set_filter(&self, key: &str, value: &str) -> Result<FilterState> {
        let mut next = self.clone();
        if key == SEARCH_KEY {
            next.search_term = value.to_string();
            return Ok(next);
        }

        let idx = self
            .position(key)
            .ok_or_else(|| AdoptaError::UnknownFilterKey(key.to_string()))?;
        let selection = FilterValue::parse(value);
        validate(&self.schema.dimensions[idx], &selection)?;
        next.values[idx] = selection;
        Ok(next)
    }

    /// Reset every dimension to `all` and clear the search term in one step.
    pub fn clear_all(&self) -> FilterState {
        FilterState::new(self.schema)
    }

    /// Dimensions with a concrete selection, in schema order.
    pub fn active_filters(&self) -> Vec<(&'static str, &str)> {
        self.selections()
            .filter(|(_, value)| !value.is_all())
            .map(|(spec, value)| (spec.name, value.as_str()))
            .collect()
    }

    /// Whether any dimension is constrained. The search term does not count.
    pub fn is_any_active(&self) -> bool {
        self.values.iter().any(|v| !v.is_all())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.schema.dimensions.iter().position(|d| d.name == key)
    }
}

impl PartialEq for FilterState {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema)
            && self.values == other.values
            && self.search_term == other.search_term
    }
}

fn validate(spec: &DimensionSpec, selection: &FilterValue) -> Result<()> {
    let FilterValue::Selected(raw) = selection else {
        return Ok(());
    };
    let valid = match spec.kind {
        DimensionKind::Facet => true,
        DimensionKind::Buckets(_) => spec.bucket(raw).is_some(),
        DimensionKind::Ceiling => raw.trim().parse::<f64>().is_ok_and(f64::is_finite),
    };
    if valid {
        Ok(())
    } else {
        Err(AdoptaError::InvalidFilterValue {
            key: spec.name.to_string(),
            value: raw.clone(),
        })
    }
}
