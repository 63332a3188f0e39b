use crate::error::{CatalogError, CatalogResult};
use crate::logic::resolve::resolve_company;
use crate::model::{Company, CompanyUpdate, Id, NewCompany};
use crate::store::traits::Store;

/// Company CRUD plus the company side of the company-category relationship.
pub struct CompanyOps;

impl CompanyOps {
    pub async fn list<S: Store>(store: &S) -> CatalogResult<Vec<Company>> {
        let companies = store.list_companies().await?;
        if companies.is_empty() {
            return Err(CatalogError::NoCompanies);
        }
        Ok(companies)
    }

    pub async fn create<S: Store>(store: &S, new: NewCompany) -> CatalogResult<Company> {
        if store.find_company_by_name(&new.name).await?.is_some() {
            return Err(CatalogError::CompanyExists(new.name));
        }
        Ok(store.insert_company(new).await?)
    }

    pub async fn get<S: Store>(store: &S, company_id: Id) -> CatalogResult<Company> {
        resolve_company(store, company_id).await
    }

    /// Replace name/city/state in place. The category set is preserved; a
    /// rename onto another company's name is rejected before anything is
    /// written.
    pub async fn update<S: Store>(
        store: &S,
        company_id: Id,
        fields: CompanyUpdate,
    ) -> CatalogResult<Company> {
        resolve_company(store, company_id).await?;
        if let Some(existing) = store.find_company_by_name(&fields.name).await? {
            if existing.id != company_id {
                return Err(CatalogError::CompanyExists(fields.name));
            }
        }
        if !store.update_company(company_id, &fields).await? {
            return Err(CatalogError::CompanyNotFound(company_id));
        }
        resolve_company(store, company_id).await
    }

    /// Remove the company record and its category links. Categories keep any
    /// other owners they have; nothing cascades past the join rows.
    pub async fn delete<S: Store>(store: &S, company_id: Id) -> CatalogResult<()> {
        if !store.delete_company(company_id).await? {
            return Err(CatalogError::CompanyNotFound(company_id));
        }
        Ok(())
    }

    /// Add the category to the company's set. Both entities must exist; the
    /// category is resolved globally because it may already belong to other
    /// companies. Writing the single join edge updates both observable sides
    /// at once.
    pub async fn attach_category<S: Store>(
        store: &S,
        company_id: Id,
        category_id: Id,
    ) -> CatalogResult<()> {
        resolve_company(store, company_id).await?;
        if store.get_category(category_id).await?.is_none() {
            return Err(CatalogError::CategoryNotFound(category_id));
        }
        store.link_category(company_id, category_id).await?;
        Ok(())
    }

    /// Mirror of attach: drop the join edge. A missing edge reports the
    /// category as not found for this company.
    pub async fn detach_category<S: Store>(
        store: &S,
        company_id: Id,
        category_id: Id,
    ) -> CatalogResult<()> {
        resolve_company(store, company_id).await?;
        if !store.unlink_category(company_id, category_id).await? {
            return Err(CatalogError::CategoryNotFound(category_id));
        }
        Ok(())
    }
}
