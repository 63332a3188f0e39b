use crate::error::{CatalogError, CatalogResult};
use crate::logic::resolve::{resolve_category_in_company, resolve_product_in_category};
use crate::model::{Id, NewProduct, Product, ProductUpdate};
use crate::store::traits::Store;

/// Product CRUD, always addressed through the company -> category path.
pub struct ProductOps;

impl ProductOps {
    pub async fn list<S: Store>(
        store: &S,
        company_id: Id,
        category_id: Id,
    ) -> CatalogResult<Vec<Product>> {
        let category = resolve_category_in_company(store, company_id, category_id).await?;
        if category.products.is_empty() {
            return Err(CatalogError::NoProducts(category_id));
        }
        let mut products = Vec::with_capacity(category.products.len());
        for product_id in &category.products {
            let product = store
                .get_product(*product_id)
                .await?
                .ok_or(CatalogError::ProductNotFound(*product_id))?;
            products.push(product);
        }
        Ok(products)
    }

    pub async fn create<S: Store>(
        store: &S,
        company_id: Id,
        category_id: Id,
        new: NewProduct,
    ) -> CatalogResult<Product> {
        resolve_category_in_company(store, company_id, category_id).await?;
        validate(&new)?;
        if store.find_product_by_name(&new.name).await?.is_some() {
            return Err(CatalogError::ProductExists(new.name));
        }
        // Product row and its back-reference are written as one unit.
        Ok(store.insert_product(new, category_id).await?)
    }

    pub async fn get<S: Store>(
        store: &S,
        company_id: Id,
        category_id: Id,
        product_id: Id,
    ) -> CatalogResult<Product> {
        resolve_product_in_category(store, company_id, category_id, product_id).await
    }

    /// Replace name/price/dates. The owning category is part of the address,
    /// not of the payload, so it cannot change here.
    pub async fn update<S: Store>(
        store: &S,
        company_id: Id,
        category_id: Id,
        product_id: Id,
        fields: ProductUpdate,
    ) -> CatalogResult<Product> {
        resolve_product_in_category(store, company_id, category_id, product_id).await?;
        validate(&fields)?;
        if let Some(existing) = store.find_product_by_name(&fields.name).await? {
            if existing.id != product_id {
                return Err(CatalogError::ProductExists(fields.name));
            }
        }
        if !store.update_product(product_id, &fields).await? {
            return Err(CatalogError::ProductNotFound(product_id));
        }
        store
            .get_product(product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound(product_id))
    }

    pub async fn delete<S: Store>(
        store: &S,
        company_id: Id,
        category_id: Id,
        product_id: Id,
    ) -> CatalogResult<()> {
        resolve_product_in_category(store, company_id, category_id, product_id).await?;
        if !store.delete_product(product_id).await? {
            return Err(CatalogError::ProductNotFound(product_id));
        }
        Ok(())
    }
}

fn validate(product: &NewProduct) -> CatalogResult<()> {
    if product.price < 0.0 {
        return Err(CatalogError::InvalidProduct(
            "price must not be negative".to_string(),
        ));
    }
    if product.expiry_date < product.mfg_date {
        return Err(CatalogError::InvalidProduct(
            "expiry date precedes manufacture date".to_string(),
        ));
    }
    Ok(())
}
