use crate::model::{
    Category, CategoryUpdate, Company, CompanyUpdate, Id, NewCategory, NewCompany, NewProduct,
    Product, ProductUpdate,
};
use anyhow::Result;

#[async_trait::async_trait]
pub trait CompanyStore: Send + Sync {
    async fn list_companies(&self) -> Result<Vec<Company>>;
    async fn get_company(&self, id: Id) -> Result<Option<Company>>;
    async fn find_company_by_name(&self, name: &str) -> Result<Option<Company>>;
    async fn insert_company(&self, new: NewCompany) -> Result<Company>;
    /// Replace the scalar fields of a company in place. Returns false when no
    /// company has that id; the category set is not touched.
    async fn update_company(&self, id: Id, fields: &CompanyUpdate) -> Result<bool>;
    /// Delete a company and its category links. Categories themselves survive.
    async fn delete_company(&self, id: Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait CategoryStore: Send + Sync {
    async fn get_category(&self, id: Id) -> Result<Option<Category>>;
    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>>;
    /// Insert a category and its owning company link as one atomic unit.
    async fn insert_category(&self, new: NewCategory, company_id: Id) -> Result<Category>;
    async fn update_category(&self, id: Id, fields: &CategoryUpdate) -> Result<bool>;
    /// Delete a category, its company links and its products in one unit.
    async fn delete_category(&self, id: Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    async fn get_product(&self, id: Id) -> Result<Option<Product>>;
    async fn find_product_by_name(&self, name: &str) -> Result<Option<Product>>;
    /// Insert a product already attached to its owning category.
    async fn insert_product(&self, new: NewProduct, category_id: Id) -> Result<Product>;
    async fn update_product(&self, id: Id, fields: &ProductUpdate) -> Result<bool>;
    async fn delete_product(&self, id: Id) -> Result<bool>;
}

/// Atomic relationship mutations. These are the only writers of the
/// company-category join index and the product back-reference; entity reads
/// assemble their relationship sets from the same state, so both sides of an
/// edge can never disagree.
#[async_trait::async_trait]
pub trait LinkStore: Send + Sync {
    /// Add the company-category edge. Idempotent: linking an existing edge is
    /// a no-op.
    async fn link_category(&self, company_id: Id, category_id: Id) -> Result<()>;
    /// Remove the company-category edge. Returns false when the edge did not
    /// exist.
    async fn unlink_category(&self, company_id: Id, category_id: Id) -> Result<bool>;
    /// Point the product's back-reference at the category.
    async fn attach_product(&self, category_id: Id, product_id: Id) -> Result<()>;
    /// Clear the product's back-reference. Returns false when the product was
    /// not attached to that category.
    async fn detach_product(&self, category_id: Id, product_id: Id) -> Result<bool>;
}

pub trait Store: CompanyStore + CategoryStore + ProductStore + LinkStore + Send + Sync {}
