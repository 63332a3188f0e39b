use crate::model::Id;
use thiserror::Error;

/// Typed failure taxonomy shared by every manager operation. The API layer is
/// the only place these are translated into HTTP status codes.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Company {0} not found")]
    CompanyNotFound(Id),

    #[error("Category {0} not found")]
    CategoryNotFound(Id),

    #[error("Product {0} not found")]
    ProductNotFound(Id),

    #[error("No companies found")]
    NoCompanies,

    #[error("No categories available for company {0}")]
    NoCategories(Id),

    #[error("No products available for category {0}")]
    NoProducts(Id),

    #[error("A company named '{0}' already exists")]
    CompanyExists(String),

    #[error("A category named '{0}' already exists")]
    CategoryExists(String),

    #[error("A product named '{0}' already exists")]
    ProductExists(String),

    #[error("Product {product_id} already belongs to category {category_id}")]
    ProductAttached { product_id: Id, category_id: Id },

    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl CatalogError {
    /// True for every `NotFound` kind, including the empty-list cases which
    /// follow the same policy uniformly.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::CompanyNotFound(_)
                | CatalogError::CategoryNotFound(_)
                | CatalogError::ProductNotFound(_)
                | CatalogError::NoCompanies
                | CatalogError::NoCategories(_)
                | CatalogError::NoProducts(_)
        )
    }

    /// True for uniqueness and relationship conflicts.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            CatalogError::CompanyExists(_)
                | CatalogError::CategoryExists(_)
                | CatalogError::ProductExists(_)
                | CatalogError::ProductAttached { .. }
        )
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
