//! Filter dimension specifications and the built-in schemas.
//!
//! A [`FilterSchema`] is the single source of truth for what a catalog can be
//! filtered by. Adding a filter means adding a [`DimensionSpec`] here; the filter
//! state, predicates and facet derivation all iterate this list.

use std::ops::Bound;

/// How a dimension turns a selection into a predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionKind {
    /// Closed set of values taken from the catalog (e.g., `species`).
    ///
    /// Matches on exact equality; distinct values feed the facet set.
    Facet,

    /// Named numeric ranges (e.g., age buckets).
    Buckets(&'static [Bucket]),

    /// Numeric upper limit (e.g., product price): matches when `value <= limit`.
    Ceiling,
}

/// A named numeric range with explicit bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub name: &'static str,
    pub lower: Bound<f64>,
    pub upper: Bound<f64>,
}

impl Bucket {
    pub const fn new(name: &'static str, lower: Bound<f64>, upper: Bound<f64>) -> Self {
        Self { name, lower, upper }
    }

    pub fn contains(&self, value: f64) -> bool {
        let above = match self.lower {
            Bound::Included(lo) => value >= lo,
            Bound::Excluded(lo) => value > lo,
            Bound::Unbounded => true,
        };
        let below = match self.upper {
            Bound::Included(hi) => value <= hi,
            Bound::Excluded(hi) => value < hi,
            Bound::Unbounded => true,
        };
        above && below
    }
}

/// Age buckets, in years.
///
/// `joven` is `[0, 2]`, `adulto` is `(2, 7]`, `senior` is `(7, ∞)`.
pub const AGE_BUCKETS: &[Bucket] = &[
    Bucket::new("joven", Bound::Included(0.0), Bound::Included(2.0)),
    Bucket::new("adulto", Bound::Excluded(2.0), Bound::Included(7.0)),
    Bucket::new("senior", Bound::Excluded(7.0), Bound::Unbounded),
];

/// Specification for a single filter dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionSpec {
    /// Filter key, also the attribute name looked up on entries.
    pub name: &'static str,

    pub kind: DimensionKind,

    /// Query-string parameter that may seed this dimension (e.g., `especie`).
    pub query_param: Option<&'static str>,
}

impl DimensionSpec {
    const fn new(name: &'static str, kind: DimensionKind) -> Self {
        Self {
            name,
            kind,
            query_param: None,
        }
    }

    const fn facet(name: &'static str) -> Self {
        Self::new(name, DimensionKind::Facet)
    }

    const fn seeded_by(mut self, param: &'static str) -> Self {
        self.query_param = Some(param);
        self
    }

    /// Look up a bucket by name if this is a bucketed dimension.
    pub fn bucket(&self, name: &str) -> Option<&'static Bucket> {
        match self.kind {
            DimensionKind::Buckets(buckets) => buckets.iter().find(|b| b.name == name),
            _ => None,
        }
    }
}

/// The fixed set of dimensions and free-text fields for one kind of catalog.
#[derive(Debug, PartialEq)]
pub struct FilterSchema {
    pub name: &'static str,
    pub dimensions: &'static [DimensionSpec],
    /// Text fields searched by the free-text term (match in ANY field).
    pub search_fields: &'static [&'static str],
}

impl FilterSchema {
    /// Look up a dimension by filter key.
    pub fn dimension(&self, key: &str) -> Option<&'static DimensionSpec> {
        self.dimensions.iter().find(|d| d.name == key)
    }

    /// Dimensions whose distinct values are collected as facets.
    pub fn facet_dimensions(&self) -> impl Iterator<Item = &'static DimensionSpec> {
        self.dimensions
            .iter()
            .filter(|d| d.kind == DimensionKind::Facet)
    }
}

pub static PET_SCHEMA: FilterSchema = FilterSchema {
    name: "pets",
    dimensions: &[
        DimensionSpec::facet("species").seeded_by("especie"),
        DimensionSpec::facet("city"),
        DimensionSpec::facet("gender"),
        DimensionSpec::new("ageYears", DimensionKind::Buckets(AGE_BUCKETS)),
    ],
    search_fields: &["name", "description"],
};

pub static PRODUCT_SCHEMA: FilterSchema = FilterSchema {
    name: "products",
    dimensions: &[
        DimensionSpec::facet("category"),
        DimensionSpec::new("price", DimensionKind::Ceiling),
    ],
    search_fields: &["name"],
};

/// Look up a built-in schema by name.
pub fn schema_by_name(name: &str) -> Option<&'static FilterSchema> {
    match name {
        "pets" => Some(&PET_SCHEMA),
        "products" => Some(&PRODUCT_SCHEMA),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(name: &str) -> &'static Bucket {
        PET_SCHEMA.dimension("ageYears").unwrap().bucket(name).unwrap()
    }

    #[test]
    fn pet_schema_has_expected_dimensions() {
        assert!(PET_SCHEMA.dimension("species").is_some());
        assert!(PET_SCHEMA.dimension("city").is_some());
        assert!(PET_SCHEMA.dimension("gender").is_some());
        assert!(PET_SCHEMA.dimension("ageYears").is_some());
        assert!(PET_SCHEMA.dimension("breed").is_none());
    }

    #[test]
    fn species_is_seeded_from_especie_param() {
        let spec = PET_SCHEMA.dimension("species").unwrap();
        assert_eq!(spec.query_param, Some("especie"));
        assert_eq!(PET_SCHEMA.dimension("city").unwrap().query_param, None);
    }

    #[test]
    fn facet_dimensions_skip_buckets() {
        let names: Vec<_> = PET_SCHEMA.facet_dimensions().map(|d| d.name).collect();
        assert_eq!(names, vec!["species", "city", "gender"]);
    }

    #[test]
    fn joven_includes_upper_boundary() {
        assert!(bucket("joven").contains(0.0));
        assert!(bucket("joven").contains(2.0));
        assert!(!bucket("joven").contains(2.0001));
        assert!(!bucket("joven").contains(-1.0));
    }

    #[test]
    fn adulto_excludes_lower_boundary() {
        assert!(!bucket("adulto").contains(2.0));
        assert!(bucket("adulto").contains(2.0001));
        assert!(bucket("adulto").contains(7.0));
        assert!(!bucket("adulto").contains(7.5));
    }

    #[test]
    fn senior_is_open_ended() {
        assert!(!bucket("senior").contains(7.0));
        assert!(bucket("senior").contains(7.1));
        assert!(bucket("senior").contains(25.0));
    }

    #[test]
    fn every_nonnegative_age_lands_in_one_bucket() {
        for age in [0.0, 1.0, 2.0, 2.5, 7.0, 8.0, 15.0] {
            let hits = AGE_BUCKETS.iter().filter(|b| b.contains(age)).count();
            assert_eq!(hits, 1, "age {} landed in {} buckets", age, hits);
        }
    }

    #[test]
    fn unknown_bucket_returns_none() {
        let spec = PET_SCHEMA.dimension("ageYears").unwrap();
        assert!(spec.bucket("viejo").is_none());
        assert!(PET_SCHEMA.dimension("species").unwrap().bucket("joven").is_none());
    }

    #[test]
    fn schema_lookup_by_name() {
        assert_eq!(schema_by_name("pets"), Some(&PET_SCHEMA));
        assert_eq!(schema_by_name("products"), Some(&PRODUCT_SCHEMA));
        assert_eq!(schema_by_name("posts"), None);
    }
}
