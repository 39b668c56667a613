use adoptaapp::attributes::{PET_SCHEMA, PRODUCT_SCHEMA};
use adoptaapp::catalog::{apply_filters, derive_facets, CatalogFilterEngine, FilterState, SEARCH_KEY};
use adoptaapp::model::{Pet, Product};

const PETS_JSON: &str = r#"[
    {"id": 1, "name": "Rex",   "species": "dog", "ageYears": 1,   "city": "Bogotá"},
    {"id": 2, "name": "Mia",   "species": "cat", "ageYears": "5", "city": "Cali"},
    {"id": 3, "name": "Bobby", "species": "dog", "ageYears": 9,   "city": "Cali"},
    {"id": 4, "name": "Toby",  "species": "dog", "ageYears": 3,   "description": "Loves long walks"}
]"#;

fn pets() -> Vec<Pet> {
    serde_json::from_str(PETS_JSON).unwrap()
}

#[test]
fn listing_page_scenario() {
    let mut engine = CatalogFilterEngine::new(&PET_SCHEMA, pets());

    engine.set_filter("species", "dog").unwrap();
    engine.set_filter("ageYears", "all").unwrap();
    assert_eq!(engine.view().ids(), vec![1, 3, 4]);

    engine.set_filter("ageYears", "adulto").unwrap();
    assert_eq!(engine.view().ids(), vec![4]);

    engine.set_filter("ageYears", "all").unwrap();
    engine.set_filter(SEARCH_KEY, "WALKS").unwrap();
    assert_eq!(engine.view().ids(), vec![4]);

    engine.clear_all();
    assert_eq!(engine.view().ids(), vec![1, 2, 3, 4]);
}

#[test]
fn url_param_seeds_species_once() {
    let mut engine = CatalogFilterEngine::new(&PET_SCHEMA, pets())
        .seed_from_query([("especie", "cat")])
        .unwrap();
    assert_eq!(engine.view().ids(), vec![2]);

    engine.set_filter("species", "all").unwrap();
    assert_eq!(engine.view().len(), 4);
}

#[test]
fn string_ages_are_coerced() {
    let state = FilterState::new(&PET_SCHEMA)
        .set_filter("ageYears", "adulto")
        .unwrap();
    let catalog = pets();
    let ids: Vec<_> = apply_filters(&catalog, &state).iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 4]);
}

#[test]
fn facets_offer_every_city_while_filtered() {
    let mut engine = CatalogFilterEngine::new(&PET_SCHEMA, pets());
    engine.set_filter("city", "Cali").unwrap();
    assert_eq!(engine.view().ids(), vec![2, 3]);

    let facets = engine.facets();
    assert_eq!(facets.values("city"), vec!["Bogotá", "Cali"]);
    assert_eq!(facets.count("city", "Cali"), 2);
}

#[test]
fn product_catalog_with_price_ceiling() {
    let catalog: Vec<Product> = serde_json::from_str(
        r#"[
            {"id": 10, "name": "Dog food", "category": "Food", "price": 45000},
            {"id": 11, "name": "Collar", "category": "Accessories", "price": "25000"},
            {"id": 12, "name": "Cat bed", "category": "Accessories", "price": 90000}
        ]"#,
    )
    .unwrap();

    let facets = derive_facets(&PRODUCT_SCHEMA, &catalog);
    let range = facets.range("price").unwrap();
    assert_eq!((range.min, range.max), (25000.0, 90000.0));

    let mut engine = CatalogFilterEngine::new(&PRODUCT_SCHEMA, catalog);
    engine.set_filter("price", "50000").unwrap();
    assert_eq!(engine.view().ids(), vec![10, 11]);

    engine.set_filter("category", "Accessories").unwrap();
    assert_eq!(engine.view().ids(), vec![11]);

    engine.set_filter(SEARCH_KEY, "bed").unwrap();
    assert!(engine.view().is_empty());
}

#[test]
fn pet_keys_do_not_apply_to_products() {
    let mut engine = CatalogFilterEngine::new(&PRODUCT_SCHEMA, Vec::<Product>::new());
    assert!(engine.set_filter("species", "dog").is_err());
}
