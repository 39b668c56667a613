//! Facet derivation.
//!
//! Facets are the filter options offered to the user. They are derived from the
//! full catalog snapshot, never from the filtered subset, so every dimension always
//! offers a way back.

use crate::attributes::{DimensionKind, FilterSchema};
use crate::model::CatalogEntry;
use serde::Serialize;
use std::collections::BTreeMap;

/// Observed numeric range of a ceiling dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    fn include(range: Option<Self>, value: f64) -> Self {
        match range {
            Some(r) => Self {
                min: r.min.min(value),
                max: r.max.max(value),
            },
            None => Self {
                min: value,
                max: value,
            },
        }
    }
}

/// Distinct values (with counts) per facet dimension, and ranges per ceiling
/// dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetSet {
    values: BTreeMap<&'static str, BTreeMap<String, usize>>,
    ranges: BTreeMap<&'static str, NumericRange>,
}

impl FacetSet {
    /// Distinct values of a dimension, sorted. Empty for unknown dimensions.
    pub fn values(&self, dimension: &str) -> Vec<&str> {
        self.values
            .get(dimension)
            .map(|counts| counts.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, dimension: &str, value: &str) -> bool {
        self.count(dimension, value) > 0
    }

    /// How many catalog entries carry `value` for `dimension`.
    pub fn count(&self, dimension: &str, value: &str) -> usize {
        self.values
            .get(dimension)
            .and_then(|counts| counts.get(value))
            .copied()
            .unwrap_or(0)
    }

    pub fn counts(&self, dimension: &str) -> Option<&BTreeMap<String, usize>> {
        self.values.get(dimension)
    }

    /// Range of positive values seen for a ceiling dimension.
    pub fn range(&self, dimension: &str) -> Option<NumericRange> {
        self.ranges.get(dimension).copied()
    }

    /// Facet dimension names, sorted.
    pub fn dimensions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }
}

/// Collect every configured facet dimension in a single pass over the catalog.
///
/// Blank values are skipped; they would only offer an empty option.
pub fn derive_facets<E: CatalogEntry>(schema: &FilterSchema, catalog: &[E]) -> FacetSet {
    let mut facets = FacetSet::default();
    for spec in schema.facet_dimensions() {
        facets.values.insert(spec.name, BTreeMap::new());
    }

    for entry in catalog {
        for spec in schema.dimensions {
            let Some(value) = entry.attr(spec.name) else {
                continue;
            };
            match spec.kind {
                DimensionKind::Facet => {
                    let key = value.facet_key();
                    if key.trim().is_empty() {
                        continue;
                    }
                    if let Some(counts) = facets.values.get_mut(spec.name) {
                        *counts.entry(key).or_insert(0) += 1;
                    }
                }
                DimensionKind::Ceiling => {
                    if let Some(n) = value.as_number().filter(|n| *n > 0.0) {
                        let current = facets.ranges.get(spec.name).copied();
                        facets
                            .ranges
                            .insert(spec.name, NumericRange::include(current, n));
                    }
                }
                DimensionKind::Buckets(_) => {}
            }
        }
    }

    facets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{PET_SCHEMA, PRODUCT_SCHEMA};
    use crate::model::{Pet, Product};

    fn pets(species: &[&str]) -> Vec<Pet> {
        species
            .iter()
            .enumerate()
            .map(|(i, s)| Pet::new(i as u64 + 1, format!("pet-{}", i)).with_species(*s))
            .collect()
    }

    #[test]
    fn distinct_species_are_collected() {
        let facets = derive_facets(&PET_SCHEMA, &pets(&["dog", "dog", "cat"]));
        assert_eq!(facets.values("species"), vec!["cat", "dog"]);
        assert_eq!(facets.count("species", "dog"), 2);
        assert_eq!(facets.count("species", "cat"), 1);
    }

    #[test]
    fn facets_follow_current_catalog() {
        let catalog = pets(&["dog", "dog", "cat"]);
        let without_cats: Vec<Pet> = catalog
            .iter()
            .filter(|p| p.species.as_deref() != Some("cat"))
            .cloned()
            .collect();

        let facets = derive_facets(&PET_SCHEMA, &without_cats);
        assert_eq!(facets.values("species"), vec!["dog"]);
        assert!(!facets.contains("species", "cat"));
    }

    #[test]
    fn derivation_is_idempotent() {
        let catalog = pets(&["dog", "cat", "bird"]);
        assert_eq!(
            derive_facets(&PET_SCHEMA, &catalog),
            derive_facets(&PET_SCHEMA, &catalog)
        );
    }

    #[test]
    fn every_facet_dimension_is_present_even_when_empty() {
        let facets = derive_facets::<Pet>(&PET_SCHEMA, &[]);
        let dims: Vec<_> = facets.dimensions().collect();
        assert_eq!(dims, vec!["city", "gender", "species"]);
        assert!(facets.values("city").is_empty());
    }

    #[test]
    fn bucket_dimensions_produce_no_facets() {
        let catalog = vec![Pet::new(1, "Max").with_age(3.0)];
        let facets = derive_facets(&PET_SCHEMA, &catalog);
        assert!(facets.counts("ageYears").is_none());
    }

    #[test]
    fn blank_values_are_skipped() {
        let catalog = vec![
            Pet::new(1, "A").with_city(""),
            Pet::new(2, "B").with_city("Medellín"),
            Pet::new(3, "C"),
        ];
        let facets = derive_facets(&PET_SCHEMA, &catalog);
        assert_eq!(facets.values("city"), vec!["Medellín"]);
    }

    #[test]
    fn ceiling_range_ignores_non_positive_and_non_numeric() {
        let catalog = vec![
            Product::new(1, "Collar").with_price(25000.0),
            Product::new(2, "Cama").with_price("90000"),
            Product::new(3, "Regalo").with_price(0.0),
            Product::new(4, "Raro").with_price("n/a"),
            Product::new(5, "Sin precio"),
        ];
        let facets = derive_facets(&PRODUCT_SCHEMA, &catalog);
        assert_eq!(
            facets.range("price"),
            Some(NumericRange {
                min: 25000.0,
                max: 90000.0
            })
        );
    }

    #[test]
    fn unknown_dimension_is_empty() {
        let facets = derive_facets(&PET_SCHEMA, &pets(&["dog"]));
        assert!(facets.values("color").is_empty());
        assert_eq!(facets.range("price"), None);
    }
}
