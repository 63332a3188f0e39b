use crate::error::{CatalogError, CatalogResult};
use crate::logic::resolve::{resolve_category_in_company, resolve_company};
use crate::model::{Category, CategoryUpdate, Id, NewCategory};
use crate::store::traits::Store;

/// Category CRUD scoped by the owning company, plus the category side of the
/// category-product relationship.
pub struct CategoryOps;

impl CategoryOps {
    pub async fn list<S: Store>(store: &S, company_id: Id) -> CatalogResult<Vec<Category>> {
        let company = resolve_company(store, company_id).await?;
        if company.categories.is_empty() {
            return Err(CatalogError::NoCategories(company_id));
        }
        let mut categories = Vec::with_capacity(company.categories.len());
        for category_id in &company.categories {
            let category = store
                .get_category(*category_id)
                .await?
                .ok_or(CatalogError::CategoryNotFound(*category_id))?;
            categories.push(category);
        }
        Ok(categories)
    }

    pub async fn create<S: Store>(
        store: &S,
        company_id: Id,
        new: NewCategory,
    ) -> CatalogResult<Category> {
        resolve_company(store, company_id).await?;
        if store.find_category_by_name(&new.name).await?.is_some() {
            return Err(CatalogError::CategoryExists(new.name));
        }
        // Category row and owning edge are written as one unit.
        Ok(store.insert_category(new, company_id).await?)
    }

    pub async fn get<S: Store>(
        store: &S,
        company_id: Id,
        category_id: Id,
    ) -> CatalogResult<Category> {
        resolve_category_in_company(store, company_id, category_id).await
    }

    /// Replace name/kind. Relationship sets are deliberately not part of the
    /// update; they change only through attach/detach.
    pub async fn update<S: Store>(
        store: &S,
        company_id: Id,
        category_id: Id,
        fields: CategoryUpdate,
    ) -> CatalogResult<Category> {
        resolve_category_in_company(store, company_id, category_id).await?;
        if let Some(existing) = store.find_category_by_name(&fields.name).await? {
            if existing.id != category_id {
                return Err(CatalogError::CategoryExists(fields.name));
            }
        }
        if !store.update_category(category_id, &fields).await? {
            return Err(CatalogError::CategoryNotFound(category_id));
        }
        store
            .get_category(category_id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(category_id))
    }

    /// Delete the category through its owning company. Its products go with
    /// it (in the nested shape they would be unreachable otherwise) and every
    /// company loses the edge.
    pub async fn delete<S: Store>(
        store: &S,
        company_id: Id,
        category_id: Id,
    ) -> CatalogResult<()> {
        resolve_category_in_company(store, company_id, category_id).await?;
        if !store.delete_category(category_id).await? {
            return Err(CatalogError::CategoryNotFound(category_id));
        }
        Ok(())
    }

    /// Put an existing product into this category. The product is resolved
    /// globally; a product that already belongs to a different category is a
    /// conflict, while re-attaching to the same category is a no-op.
    pub async fn attach_product<S: Store>(
        store: &S,
        company_id: Id,
        category_id: Id,
        product_id: Id,
    ) -> CatalogResult<()> {
        resolve_category_in_company(store, company_id, category_id).await?;
        let product = store
            .get_product(product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound(product_id))?;
        match product.category_id {
            Some(current) if current == category_id => Ok(()),
            Some(current) => Err(CatalogError::ProductAttached {
                product_id,
                category_id: current,
            }),
            None => {
                store.attach_product(category_id, product_id).await?;
                Ok(())
            }
        }
    }

    /// Clear the product's back-reference. The product record survives,
    /// detached, until it is re-attached or deleted through another path.
    pub async fn detach_product<S: Store>(
        store: &S,
        company_id: Id,
        category_id: Id,
        product_id: Id,
    ) -> CatalogResult<()> {
        resolve_category_in_company(store, company_id, category_id).await?;
        if !store.detach_product(category_id, product_id).await? {
            return Err(CatalogError::ProductNotFound(product_id));
        }
        Ok(())
    }
}
