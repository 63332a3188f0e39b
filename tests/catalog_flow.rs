use catalog_api::error::CatalogError;
use catalog_api::logic::{CategoryOps, CompanyOps, ProductOps};
use catalog_api::model::{date, NewCategory, NewCompany, NewProduct};
use catalog_api::store::{MemoryStore, ProductStore};

fn company(name: &str) -> NewCompany {
    NewCompany {
        name: name.to_string(),
        city: "Mumbai".to_string(),
        state: "Maharashtra".to_string(),
    }
}

fn category(name: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        kind: "Consumer".to_string(),
    }
}

fn product(name: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price: 499.99,
        mfg_date: date("2024-03-01"),
        expiry_date: date("2034-03-01"),
    }
}

// Scenario A: duplicate company names are rejected with the Exists kind.
#[tokio::test]
async fn duplicate_company_name_is_rejected() {
    let store = MemoryStore::new();
    CompanyOps::create(&store, company("Tata")).await.unwrap();

    let err = CompanyOps::create(&store, company("Tata"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::CompanyExists(name) if name == "Tata"));

    // Case-sensitive exact match: a different casing is a different name.
    CompanyOps::create(&store, company("TATA")).await.unwrap();
}

// P2: created companies round-trip through get with all fields intact.
#[tokio::test]
async fn company_round_trips_through_get() {
    let store = MemoryStore::new();
    let created = CompanyOps::create(&store, company("Tata")).await.unwrap();

    let fetched = CompanyOps::get(&store, created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.city, "Mumbai");
    assert_eq!(fetched.state, "Maharashtra");
}

#[tokio::test]
async fn empty_store_lists_report_not_found() {
    let store = MemoryStore::new();
    let err = CompanyOps::list(&store).await.unwrap_err();
    assert!(err.is_not_found());
}

// Scenario B: a category created under a company appears in that company's
// set and resolves through the nested path.
#[tokio::test]
async fn category_created_under_company_is_reachable() {
    let store = MemoryStore::new();
    let tata = CompanyOps::create(&store, company("Tata")).await.unwrap();

    let electronics = CategoryOps::create(&store, tata.id, category("Electronics"))
        .await
        .unwrap();

    let categories = CategoryOps::list(&store, tata.id).await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id, electronics.id);

    let fetched = CategoryOps::get(&store, tata.id, electronics.id)
        .await
        .unwrap();
    assert_eq!(fetched.name, "Electronics");
    assert_eq!(fetched.companies, vec![tata.id]);
}

#[tokio::test]
async fn duplicate_category_name_is_rejected() {
    let store = MemoryStore::new();
    let tata = CompanyOps::create(&store, company("Tata")).await.unwrap();
    let mahindra = CompanyOps::create(&store, company("Mahindra"))
        .await
        .unwrap();
    CategoryOps::create(&store, tata.id, category("Electronics"))
        .await
        .unwrap();

    // Uniqueness is global, not per company.
    let err = CategoryOps::create(&store, mahindra.id, category("Electronics"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::CategoryExists(_)));
}

// P3: attach/detach keeps both sides of the company-category edge in sync.
#[tokio::test]
async fn attach_and_detach_category_sync_both_sides() {
    let store = MemoryStore::new();
    let tata = CompanyOps::create(&store, company("Tata")).await.unwrap();
    let mahindra = CompanyOps::create(&store, company("Mahindra"))
        .await
        .unwrap();
    let electronics = CategoryOps::create(&store, tata.id, category("Electronics"))
        .await
        .unwrap();

    CompanyOps::attach_category(&store, mahindra.id, electronics.id)
        .await
        .unwrap();

    let mahindra_after = CompanyOps::get(&store, mahindra.id).await.unwrap();
    assert!(mahindra_after.categories.contains(&electronics.id));
    let electronics_after = CategoryOps::get(&store, mahindra.id, electronics.id)
        .await
        .unwrap();
    assert!(electronics_after.companies.contains(&mahindra.id));
    assert!(electronics_after.companies.contains(&tata.id));

    CompanyOps::detach_category(&store, mahindra.id, electronics.id)
        .await
        .unwrap();

    let mahindra_after = CompanyOps::get(&store, mahindra.id).await.unwrap();
    assert!(!mahindra_after.categories.contains(&electronics.id));
    let electronics_after = CategoryOps::get(&store, tata.id, electronics.id)
        .await
        .unwrap();
    assert!(!electronics_after.companies.contains(&mahindra.id));
}

#[tokio::test]
async fn detach_of_unattached_category_reports_not_found() {
    let store = MemoryStore::new();
    let tata = CompanyOps::create(&store, company("Tata")).await.unwrap();
    let mahindra = CompanyOps::create(&store, company("Mahindra"))
        .await
        .unwrap();
    let electronics = CategoryOps::create(&store, tata.id, category("Electronics"))
        .await
        .unwrap();

    let err = CompanyOps::detach_category(&store, mahindra.id, electronics.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::CategoryNotFound(_)));
}

// P4: nested paths fail with the first unresolved segment and nothing is
// mutated.
#[tokio::test]
async fn nested_paths_fail_on_first_unresolved_segment() {
    let store = MemoryStore::new();
    let tata = CompanyOps::create(&store, company("Tata")).await.unwrap();
    let electronics = CategoryOps::create(&store, tata.id, category("Electronics"))
        .await
        .unwrap();

    // Missing company wins over everything after it.
    let err = ProductOps::create(&store, 999, electronics.id, product("Television"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::CompanyNotFound(999)));

    // Existing company, missing category.
    let err = ProductOps::create(&store, tata.id, 999, product("Television"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::CategoryNotFound(999)));

    // A category that exists but is not in this company's set is unreachable.
    let mahindra = CompanyOps::create(&store, company("Mahindra"))
        .await
        .unwrap();
    let err = CategoryOps::get(&store, mahindra.id, electronics.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::CategoryNotFound(_)));

    // No product was created by any of the failed attempts.
    let err = ProductOps::list(&store, tata.id, electronics.id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// P5: delete-then-get fails NotFound.
#[tokio::test]
async fn deleted_company_is_gone() {
    let store = MemoryStore::new();
    let tata = CompanyOps::create(&store, company("Tata")).await.unwrap();

    CompanyOps::delete(&store, tata.id).await.unwrap();
    let err = CompanyOps::get(&store, tata.id).await.unwrap_err();
    assert!(matches!(err, CatalogError::CompanyNotFound(_)));

    let err = CompanyOps::delete(&store, tata.id).await.unwrap_err();
    assert!(matches!(err, CatalogError::CompanyNotFound(_)));
}

// Scenario C: product lifecycle through the nested path.
#[tokio::test]
async fn product_attach_detach_through_nested_path() {
    let store = MemoryStore::new();
    let tata = CompanyOps::create(&store, company("Tata")).await.unwrap();
    let electronics = CategoryOps::create(&store, tata.id, category("Electronics"))
        .await
        .unwrap();

    let tv = ProductOps::create(&store, tata.id, electronics.id, product("Television"))
        .await
        .unwrap();
    assert_eq!(tv.category_id, Some(electronics.id));

    let products = ProductOps::list(&store, tata.id, electronics.id)
        .await
        .unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, tv.id);

    CategoryOps::detach_product(&store, tata.id, electronics.id, tv.id)
        .await
        .unwrap();

    // Empty set follows the uniform empty-list policy.
    let err = ProductOps::list(&store, tata.id, electronics.id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    // The product record itself survives detachment and can come back.
    CategoryOps::attach_product(&store, tata.id, electronics.id, tv.id)
        .await
        .unwrap();
    let products = ProductOps::list(&store, tata.id, electronics.id)
        .await
        .unwrap();
    assert_eq!(products[0].id, tv.id);
}

#[tokio::test]
async fn attach_product_conflicts_across_categories() {
    let store = MemoryStore::new();
    let tata = CompanyOps::create(&store, company("Tata")).await.unwrap();
    let electronics = CategoryOps::create(&store, tata.id, category("Electronics"))
        .await
        .unwrap();
    let groceries = CategoryOps::create(&store, tata.id, category("Groceries"))
        .await
        .unwrap();
    let tv = ProductOps::create(&store, tata.id, electronics.id, product("Television"))
        .await
        .unwrap();

    // Attaching into the owning category again is a no-op.
    CategoryOps::attach_product(&store, tata.id, electronics.id, tv.id)
        .await
        .unwrap();

    // Attaching into another category while still owned is a conflict.
    let err = CategoryOps::attach_product(&store, tata.id, groceries.id, tv.id)
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    assert!(matches!(
        err,
        CatalogError::ProductAttached { category_id, .. } if category_id == electronics.id
    ));
}

// Scenario D: deleting a company never cascades into its categories.
#[tokio::test]
async fn company_delete_does_not_cascade_to_categories() {
    let store = MemoryStore::new();
    let tata = CompanyOps::create(&store, company("Tata")).await.unwrap();
    let mahindra = CompanyOps::create(&store, company("Mahindra"))
        .await
        .unwrap();
    let electronics = CategoryOps::create(&store, tata.id, category("Electronics"))
        .await
        .unwrap();
    CompanyOps::attach_category(&store, mahindra.id, electronics.id)
        .await
        .unwrap();

    CompanyOps::delete(&store, tata.id).await.unwrap();

    // The category survives under its remaining owner, minus the dead edge.
    let electronics_after = CategoryOps::get(&store, mahindra.id, electronics.id)
        .await
        .unwrap();
    assert_eq!(electronics_after.companies, vec![mahindra.id]);
}

#[tokio::test]
async fn category_delete_cascades_to_its_products() {
    let store = MemoryStore::new();
    let tata = CompanyOps::create(&store, company("Tata")).await.unwrap();
    let electronics = CategoryOps::create(&store, tata.id, category("Electronics"))
        .await
        .unwrap();
    let tv = ProductOps::create(&store, tata.id, electronics.id, product("Television"))
        .await
        .unwrap();

    CategoryOps::delete(&store, tata.id, electronics.id)
        .await
        .unwrap();

    let err = CategoryOps::get(&store, tata.id, electronics.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::CategoryNotFound(_)));
    // The cascade took the product with it.
    assert!(store.get_product(tv.id).await.unwrap().is_none());
}

#[tokio::test]
async fn update_replaces_fields_and_preserves_relationships() {
    let store = MemoryStore::new();
    let tata = CompanyOps::create(&store, company("Tata")).await.unwrap();
    let electronics = CategoryOps::create(&store, tata.id, category("Electronics"))
        .await
        .unwrap();

    let updated = CompanyOps::update(
        &store,
        tata.id,
        NewCompany {
            name: "Tata Group".to_string(),
            city: "Delhi".to_string(),
            state: "Delhi".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "Tata Group");
    assert_eq!(updated.categories, vec![electronics.id]);

    let updated = CategoryOps::update(
        &store,
        tata.id,
        electronics.id,
        NewCategory {
            name: "Home Electronics".to_string(),
            kind: "Consumer".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "Home Electronics");
    assert_eq!(updated.companies, vec![tata.id]);
}

#[tokio::test]
async fn rename_onto_existing_name_is_rejected() {
    let store = MemoryStore::new();
    CompanyOps::create(&store, company("Tata")).await.unwrap();
    let mahindra = CompanyOps::create(&store, company("Mahindra"))
        .await
        .unwrap();

    let err = CompanyOps::update(&store, mahindra.id, company("Tata"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::CompanyExists(_)));

    // Updating a company onto its own name is not a collision.
    CompanyOps::update(&store, mahindra.id, company("Mahindra"))
        .await
        .unwrap();
}

// The missing target wins over a name collision: updating a company that does
// not exist reports NotFound even when the new name is already taken.
#[tokio::test]
async fn update_of_missing_company_reports_not_found() {
    let store = MemoryStore::new();
    CompanyOps::create(&store, company("Tata")).await.unwrap();

    let err = CompanyOps::update(&store, 999, company("Tata"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::CompanyNotFound(999)));
}

#[tokio::test]
async fn category_rename_onto_existing_name_is_rejected() {
    let store = MemoryStore::new();
    let tata = CompanyOps::create(&store, company("Tata")).await.unwrap();
    CategoryOps::create(&store, tata.id, category("Electronics"))
        .await
        .unwrap();
    let groceries = CategoryOps::create(&store, tata.id, category("Groceries"))
        .await
        .unwrap();

    let err = CategoryOps::update(&store, tata.id, groceries.id, category("Electronics"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::CategoryExists(_)));

    // Keeping the current name is not a collision.
    CategoryOps::update(&store, tata.id, groceries.id, category("Groceries"))
        .await
        .unwrap();
}

#[tokio::test]
async fn product_rename_onto_existing_name_is_rejected() {
    let store = MemoryStore::new();
    let tata = CompanyOps::create(&store, company("Tata")).await.unwrap();
    let electronics = CategoryOps::create(&store, tata.id, category("Electronics"))
        .await
        .unwrap();
    ProductOps::create(&store, tata.id, electronics.id, product("Television"))
        .await
        .unwrap();
    let radio = ProductOps::create(&store, tata.id, electronics.id, product("Radio"))
        .await
        .unwrap();

    let err = ProductOps::update(&store, tata.id, electronics.id, radio.id, product("Television"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::ProductExists(_)));

    // Keeping the current name is not a collision.
    ProductOps::update(&store, tata.id, electronics.id, radio.id, product("Radio"))
        .await
        .unwrap();
}

#[tokio::test]
async fn product_update_and_delete_through_nested_path() {
    let store = MemoryStore::new();
    let tata = CompanyOps::create(&store, company("Tata")).await.unwrap();
    let electronics = CategoryOps::create(&store, tata.id, category("Electronics"))
        .await
        .unwrap();
    let tv = ProductOps::create(&store, tata.id, electronics.id, product("Television"))
        .await
        .unwrap();

    let updated = ProductOps::update(
        &store,
        tata.id,
        electronics.id,
        tv.id,
        NewProduct {
            name: "Smart Television".to_string(),
            price: 799.0,
            mfg_date: date("2025-01-01"),
            expiry_date: date("2035-01-01"),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "Smart Television");
    assert_eq!(updated.category_id, Some(electronics.id));

    ProductOps::delete(&store, tata.id, electronics.id, tv.id)
        .await
        .unwrap();
    let err = ProductOps::get(&store, tata.id, electronics.id, tv.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::ProductNotFound(_)));
}

#[tokio::test]
async fn duplicate_product_name_is_rejected() {
    let store = MemoryStore::new();
    let tata = CompanyOps::create(&store, company("Tata")).await.unwrap();
    let electronics = CategoryOps::create(&store, tata.id, category("Electronics"))
        .await
        .unwrap();
    let groceries = CategoryOps::create(&store, tata.id, category("Groceries"))
        .await
        .unwrap();
    ProductOps::create(&store, tata.id, electronics.id, product("Television"))
        .await
        .unwrap();

    let err = ProductOps::create(&store, tata.id, groceries.id, product("Television"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::ProductExists(_)));
}

#[tokio::test]
async fn invalid_products_are_rejected_before_any_write() {
    let store = MemoryStore::new();
    let tata = CompanyOps::create(&store, company("Tata")).await.unwrap();
    let electronics = CategoryOps::create(&store, tata.id, category("Electronics"))
        .await
        .unwrap();

    let mut negative = product("Television");
    negative.price = -1.0;
    let err = ProductOps::create(&store, tata.id, electronics.id, negative)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidProduct(_)));

    let mut expired_before_made = product("Television");
    expired_before_made.mfg_date = date("2030-01-01");
    expired_before_made.expiry_date = date("2024-01-01");
    let err = ProductOps::create(&store, tata.id, electronics.id, expired_before_made)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidProduct(_)));

    // Nothing landed in the category.
    let err = ProductOps::list(&store, tata.id, electronics.id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn seed_data_builds_a_consistent_hierarchy() {
    let store = MemoryStore::new();
    catalog_api::seed::load_seed_data(&store).await.unwrap();

    let companies = CompanyOps::list(&store).await.unwrap();
    assert_eq!(companies.len(), 2);

    // Electronics is shared between both seeded companies.
    let shared: Vec<_> = companies
        .iter()
        .filter(|c| !c.categories.is_empty())
        .collect();
    assert_eq!(shared.len(), 2);

    // Loading twice is a no-op.
    catalog_api::seed::load_seed_data(&store).await.unwrap();
    assert_eq!(CompanyOps::list(&store).await.unwrap().len(), 2);
}
