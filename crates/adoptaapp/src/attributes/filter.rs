//! Predicate chain.
//!
//! A [`FilterState`] is compiled once into a [`PredicateChain`]: one [`Predicate`]
//! per constrained dimension plus the free-text predicate. Dimensions set to `all`
//! and an empty search term contribute nothing. An entry passes when it matches
//! ALL predicates.

use super::spec::{Bucket, DimensionKind};
use crate::catalog::{FilterState, FilterValue};
use crate::model::CatalogEntry;

/// A single condition on a catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<'s> {
    /// Attribute equals the selected facet value.
    Equals { attr: &'static str, value: &'s str },
    /// Attribute coerces to a number inside the bucket.
    InBucket {
        attr: &'static str,
        bucket: &'static Bucket,
    },
    /// Attribute coerces to a number `<= limit`.
    AtMost { attr: &'static str, limit: f64 },
    /// Lowercased needle appears in any of the fields.
    Search {
        fields: &'static [&'static str],
        needle: String,
    },
    /// Matches nothing. Emitted for selections that cannot be interpreted.
    Never,
}

impl Predicate<'_> {
    /// Missing attributes and failed numeric coercion never match.
    pub fn matches<E: CatalogEntry>(&self, entry: &E) -> bool {
        match self {
            Predicate::Equals { attr, value } => entry
                .attr(attr)
                .is_some_and(|v| v.matches_exact(value)),
            Predicate::InBucket { attr, bucket } => entry
                .attr(attr)
                .and_then(|v| v.as_number())
                .is_some_and(|n| bucket.contains(n)),
            Predicate::AtMost { attr, limit } => entry
                .attr(attr)
                .and_then(|v| v.as_number())
                .is_some_and(|n| n <= *limit),
            Predicate::Search { fields, needle } => fields.iter().any(|field| {
                entry
                    .text(field)
                    .is_some_and(|text| text.to_lowercase().contains(needle.as_str()))
            }),
            Predicate::Never => false,
        }
    }
}

/// Conjunction of predicates compiled from a filter state.
#[derive(Debug, Clone, Default)]
pub struct PredicateChain<'s> {
    predicates: Vec<Predicate<'s>>,
}

impl<'s> PredicateChain<'s> {
    pub fn compile(state: &'s FilterState) -> Self {
        let mut predicates = Vec::new();

        for (spec, value) in state.selections() {
            let FilterValue::Selected(raw) = value else {
                continue;
            };
            let predicate = match spec.kind {
                DimensionKind::Facet => Predicate::Equals {
                    attr: spec.name,
                    value: raw.as_str(),
                },
                DimensionKind::Buckets(_) => match spec.bucket(raw) {
                    Some(bucket) => Predicate::InBucket {
                        attr: spec.name,
                        bucket,
                    },
                    None => Predicate::Never,
                },
                DimensionKind::Ceiling => match raw.trim().parse::<f64>() {
                    Ok(limit) if limit.is_finite() => Predicate::AtMost {
                        attr: spec.name,
                        limit,
                    },
                    _ => Predicate::Never,
                },
            };
            predicates.push(predicate);
        }

        let term = state.search_term();
        if !term.is_empty() {
            predicates.push(Predicate::Search {
                fields: state.schema().search_fields,
                needle: term.to_lowercase(),
            });
        }

        Self { predicates }
    }

    pub fn matches<E: CatalogEntry>(&self, entry: &E) -> bool {
        self.predicates.iter().all(|p| p.matches(entry))
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }
}
