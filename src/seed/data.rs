use crate::logic::{CategoryOps, CompanyOps, ProductOps};
use crate::model::{date, NewCategory, NewCompany, NewProduct};
use crate::store::traits::Store;
use anyhow::Result;

/// Load a small demonstration hierarchy: two companies sharing one category,
/// plus a second category with products. Goes through the manager layer so
/// every invariant the API enforces holds for seeded data too.
pub async fn load_seed_data<S: Store>(store: &S) -> Result<()> {
    if !store.list_companies().await?.is_empty() {
        log::info!("Seed skipped: store already contains companies");
        return Ok(());
    }

    let tata = CompanyOps::create(
        store,
        NewCompany {
            name: "Tata".to_string(),
            city: "Mumbai".to_string(),
            state: "Maharashtra".to_string(),
        },
    )
    .await?;

    let mahindra = CompanyOps::create(
        store,
        NewCompany {
            name: "Mahindra".to_string(),
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
        },
    )
    .await?;

    let electronics = CategoryOps::create(
        store,
        tata.id,
        NewCategory {
            name: "Electronics".to_string(),
            kind: "Consumer".to_string(),
        },
    )
    .await?;

    // Electronics is shared by both companies.
    CompanyOps::attach_category(store, mahindra.id, electronics.id).await?;

    let groceries = CategoryOps::create(
        store,
        tata.id,
        NewCategory {
            name: "Groceries".to_string(),
            kind: "Perishable".to_string(),
        },
    )
    .await?;

    ProductOps::create(
        store,
        tata.id,
        electronics.id,
        NewProduct {
            name: "Television".to_string(),
            price: 499.99,
            mfg_date: date("2024-03-01"),
            expiry_date: date("2034-03-01"),
        },
    )
    .await?;

    ProductOps::create(
        store,
        tata.id,
        groceries.id,
        NewProduct {
            name: "Salted Butter".to_string(),
            price: 4.5,
            mfg_date: date("2025-06-15"),
            expiry_date: date("2025-12-15"),
        },
    )
    .await?;

    log::info!("Seed data loaded: 2 companies, 2 categories, 2 products");
    Ok(())
}
