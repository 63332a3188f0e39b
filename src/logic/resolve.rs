use crate::error::{CatalogError, CatalogResult};
use crate::model::{Category, Company, Id, Product};
use crate::store::traits::Store;

/// Nested path resolution. Every segment must exist and be reachable through
/// its claimed parent before any mutation runs; failures name the first
/// unresolved segment.

pub async fn resolve_company<S: Store>(store: &S, company_id: Id) -> CatalogResult<Company> {
    store
        .get_company(company_id)
        .await?
        .ok_or(CatalogError::CompanyNotFound(company_id))
}

pub async fn resolve_category_in_company<S: Store>(
    store: &S,
    company_id: Id,
    category_id: Id,
) -> CatalogResult<Category> {
    let company = resolve_company(store, company_id).await?;
    if !company.categories.contains(&category_id) {
        return Err(CatalogError::CategoryNotFound(category_id));
    }
    store
        .get_category(category_id)
        .await?
        .ok_or(CatalogError::CategoryNotFound(category_id))
}

pub async fn resolve_product_in_category<S: Store>(
    store: &S,
    company_id: Id,
    category_id: Id,
    product_id: Id,
) -> CatalogResult<Product> {
    let category = resolve_category_in_company(store, company_id, category_id).await?;
    if !category.products.contains(&product_id) {
        return Err(CatalogError::ProductNotFound(product_id));
    }
    store
        .get_product(product_id)
        .await?
        .ok_or(CatalogError::ProductNotFound(product_id))
}
