use adoptaapp::attributes::{Scalar, AGE_BUCKETS, PET_SCHEMA};
use adoptaapp::catalog::{apply_filters, derive_facets, CatalogFilterEngine, FilterState, ALL, SEARCH_KEY};
use adoptaapp::model::Pet;
use proptest::prelude::*;

const SPECIES: &[&str] = &["dog", "cat", "rabbit"];
const CITIES: &[&str] = &["Bogotá", "Cali", "Medellín"];

fn age() -> impl Strategy<Value = Option<Scalar>> {
    prop_oneof![
        Just(None),
        (0.0f64..20.0).prop_map(|n| Some(Scalar::Number(n))),
        (0u32..20).prop_map(|n| Some(Scalar::Text(n.to_string()))),
        Just(Some(Scalar::Text("unknown".to_string()))),
    ]
}

fn pet() -> impl Strategy<Value = Pet> {
    (
        prop::option::of(prop::sample::select(SPECIES)),
        prop::option::of(prop::sample::select(CITIES)),
        age(),
        "[A-Za-z]{1,8}",
        "[a-zA-Z ]{0,24}",
    )
        .prop_map(|(species, city, age_years, name, description)| Pet {
            species: species.map(str::to_string),
            city: city.map(str::to_string),
            age_years,
            description,
            ..Pet::new(0, name)
        })
}

fn catalog() -> impl Strategy<Value = Vec<Pet>> {
    prop::collection::vec(pet(), 0..40).prop_map(|pets| {
        pets.into_iter()
            .enumerate()
            .map(|(i, mut pet)| {
                pet.id = i as u64 + 1;
                pet
            })
            .collect()
    })
}

/// One combination of listing-page filters.
#[derive(Debug, Clone)]
struct Selection {
    species: Option<&'static str>,
    city: Option<&'static str>,
    bucket: Option<&'static str>,
    search: String,
}

fn selection() -> impl Strategy<Value = Selection> {
    let buckets: Vec<&'static str> = AGE_BUCKETS.iter().map(|b| b.name).collect();
    (
        prop::option::of(prop::sample::select(SPECIES)),
        prop::option::of(prop::sample::select(CITIES)),
        prop::option::of(prop::sample::select(buckets)),
        prop_oneof![Just(String::new()), "[a-zA-Z ]{1,3}"],
    )
        .prop_map(|(species, city, bucket, search)| Selection {
            species,
            city,
            bucket,
            search,
        })
}

impl Selection {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("species", self.species.unwrap_or(ALL).to_string()),
            ("city", self.city.unwrap_or(ALL).to_string()),
            ("ageYears", self.bucket.unwrap_or(ALL).to_string()),
            (SEARCH_KEY, self.search.clone()),
        ]
    }

    fn state(&self) -> FilterState {
        self.pairs()
            .iter()
            .fold(FilterState::new(&PET_SCHEMA), |state, (key, value)| {
                state.set_filter(key, value).unwrap()
            })
    }

    /// Whether `pet` belongs in the listing, checked field by field.
    fn admits(&self, pet: &Pet) -> bool {
        let facet = |selected: Option<&str>, actual: &Option<String>| {
            selected.map_or(true, |s| actual.as_deref() == Some(s))
        };
        let in_bucket = match self.bucket {
            None => true,
            Some(name) => {
                let bucket = AGE_BUCKETS.iter().find(|b| b.name == name).unwrap();
                let years = match &pet.age_years {
                    Some(Scalar::Number(n)) => Some(*n),
                    Some(Scalar::Text(s)) => s.trim().parse::<f64>().ok(),
                    None => None,
                };
                years.is_some_and(|n| bucket.contains(n))
            }
        };
        let needle = self.search.to_lowercase();
        let found = needle.is_empty()
            || pet.name.to_lowercase().contains(&needle)
            || pet.description.to_lowercase().contains(&needle);

        facet(self.species, &pet.species) && facet(self.city, &pet.city) && in_bucket && found
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn filtered_entries_come_from_the_catalog_in_order(
        catalog in catalog(),
        selection in selection(),
    ) {
        let state = selection.state();
        let filtered = apply_filters(&catalog, &state);
        prop_assert!(filtered.len() <= catalog.len());

        let mut last = None;
        for hit in &filtered {
            let position = catalog.iter().position(|pet| std::ptr::eq(pet, *hit));
            prop_assert!(position.is_some(), "entry {} is not from the catalog", hit.id);
            prop_assert!(position > last, "entry {} is out of catalog order", hit.id);
            last = position;
        }
    }

    #[test]
    fn filtered_entries_are_exactly_those_admitted(
        catalog in catalog(),
        selection in selection(),
    ) {
        let state = selection.state();
        let got: Vec<u64> = apply_filters(&catalog, &state).iter().map(|p| p.id).collect();
        let expected: Vec<u64> = catalog
            .iter()
            .filter(|pet| selection.admits(pet))
            .map(|pet| pet.id)
            .collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn engine_view_agrees_and_facets_ignore_filters(
        catalog in catalog(),
        selection in selection(),
    ) {
        let full = derive_facets(&PET_SCHEMA, &catalog[..]);
        let expected: Vec<u64> = apply_filters(&catalog, &selection.state())
            .iter()
            .map(|p| p.id)
            .collect();

        let mut engine = CatalogFilterEngine::new(&PET_SCHEMA, catalog.clone());
        for (key, value) in selection.pairs() {
            engine.set_filter(key, &value).unwrap();
        }
        prop_assert_eq!(engine.view().ids(), expected);
        prop_assert_eq!(&*engine.facets(), &full);

        engine.clear_all();
        prop_assert_eq!(engine.view().len(), catalog.len());
    }
}
