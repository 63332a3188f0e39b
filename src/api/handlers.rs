use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::CatalogError;
use crate::logic::{CategoryOps, CompanyOps, ProductOps};
use crate::model::{
    Category, CategoryUpdate, Company, CompanyUpdate, ErrorDetails, Id, NewCategory, NewCompany,
    NewProduct, Product, ProductUpdate,
};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

/// Confirmation body for deletes and attach/detach operations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorDetails>);

/// The single translation point from failure kind to HTTP status. Every
/// handler routes its errors through here so the policy stays uniform.
fn error_response(err: CatalogError) -> ApiError {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_conflict() {
        StatusCode::CONFLICT
    } else if matches!(err, CatalogError::InvalidProduct(_)) {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(ErrorDetails::new(err.to_string())))
}

// ---------------------------------------------------------------------------
// Companies
// ---------------------------------------------------------------------------

pub async fn list_companies<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Json<ListResponse<Company>>, ApiError> {
    let companies = CompanyOps::list(&*store).await.map_err(error_response)?;
    Ok(Json(ListResponse::new(companies)))
}

pub async fn create_company<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(new_company): RequestJson<NewCompany>,
) -> Result<(StatusCode, Json<Company>), ApiError> {
    let company = CompanyOps::create(&*store, new_company)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(company)))
}

pub async fn get_company<S: Store>(
    State(store): State<AppState<S>>,
    Path(company_id): Path<Id>,
) -> Result<Json<Company>, ApiError> {
    let company = CompanyOps::get(&*store, company_id)
        .await
        .map_err(error_response)?;
    Ok(Json(company))
}

pub async fn update_company<S: Store>(
    State(store): State<AppState<S>>,
    Path(company_id): Path<Id>,
    RequestJson(fields): RequestJson<CompanyUpdate>,
) -> Result<Json<Company>, ApiError> {
    let company = CompanyOps::update(&*store, company_id, fields)
        .await
        .map_err(error_response)?;
    Ok(Json(company))
}

pub async fn delete_company<S: Store>(
    State(store): State<AppState<S>>,
    Path(company_id): Path<Id>,
) -> Result<Json<MessageResponse>, ApiError> {
    CompanyOps::delete(&*store, company_id)
        .await
        .map_err(error_response)?;
    Ok(Json(MessageResponse::new("Company deleted successfully")))
}

pub async fn attach_category<S: Store>(
    State(store): State<AppState<S>>,
    Path((company_id, category_id)): Path<(Id, Id)>,
) -> Result<Json<MessageResponse>, ApiError> {
    CompanyOps::attach_category(&*store, company_id, category_id)
        .await
        .map_err(error_response)?;
    Ok(Json(MessageResponse::new("Category added successfully")))
}

pub async fn detach_category<S: Store>(
    State(store): State<AppState<S>>,
    Path((company_id, category_id)): Path<(Id, Id)>,
) -> Result<Json<MessageResponse>, ApiError> {
    CompanyOps::detach_category(&*store, company_id, category_id)
        .await
        .map_err(error_response)?;
    Ok(Json(MessageResponse::new("Category removed successfully")))
}

// ---------------------------------------------------------------------------
// Categories (always scoped by the owning company)
// ---------------------------------------------------------------------------

pub async fn list_categories<S: Store>(
    State(store): State<AppState<S>>,
    Path(company_id): Path<Id>,
) -> Result<Json<ListResponse<Category>>, ApiError> {
    let categories = CategoryOps::list(&*store, company_id)
        .await
        .map_err(error_response)?;
    Ok(Json(ListResponse::new(categories)))
}

pub async fn create_category<S: Store>(
    State(store): State<AppState<S>>,
    Path(company_id): Path<Id>,
    RequestJson(new_category): RequestJson<NewCategory>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = CategoryOps::create(&*store, company_id, new_category)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn get_category<S: Store>(
    State(store): State<AppState<S>>,
    Path((company_id, category_id)): Path<(Id, Id)>,
) -> Result<Json<Category>, ApiError> {
    let category = CategoryOps::get(&*store, company_id, category_id)
        .await
        .map_err(error_response)?;
    Ok(Json(category))
}

pub async fn update_category<S: Store>(
    State(store): State<AppState<S>>,
    Path((company_id, category_id)): Path<(Id, Id)>,
    RequestJson(fields): RequestJson<CategoryUpdate>,
) -> Result<Json<Category>, ApiError> {
    let category = CategoryOps::update(&*store, company_id, category_id, fields)
        .await
        .map_err(error_response)?;
    Ok(Json(category))
}

pub async fn delete_category<S: Store>(
    State(store): State<AppState<S>>,
    Path((company_id, category_id)): Path<(Id, Id)>,
) -> Result<Json<MessageResponse>, ApiError> {
    CategoryOps::delete(&*store, company_id, category_id)
        .await
        .map_err(error_response)?;
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}

pub async fn attach_product<S: Store>(
    State(store): State<AppState<S>>,
    Path((company_id, category_id, product_id)): Path<(Id, Id, Id)>,
) -> Result<Json<MessageResponse>, ApiError> {
    CategoryOps::attach_product(&*store, company_id, category_id, product_id)
        .await
        .map_err(error_response)?;
    Ok(Json(MessageResponse::new("Product added successfully")))
}

pub async fn detach_product<S: Store>(
    State(store): State<AppState<S>>,
    Path((company_id, category_id, product_id)): Path<(Id, Id, Id)>,
) -> Result<Json<MessageResponse>, ApiError> {
    CategoryOps::detach_product(&*store, company_id, category_id, product_id)
        .await
        .map_err(error_response)?;
    Ok(Json(MessageResponse::new("Product removed successfully")))
}

// ---------------------------------------------------------------------------
// Products (always scoped by company -> category)
// ---------------------------------------------------------------------------

pub async fn list_products<S: Store>(
    State(store): State<AppState<S>>,
    Path((company_id, category_id)): Path<(Id, Id)>,
) -> Result<Json<ListResponse<Product>>, ApiError> {
    let products = ProductOps::list(&*store, company_id, category_id)
        .await
        .map_err(error_response)?;
    Ok(Json(ListResponse::new(products)))
}

pub async fn create_product<S: Store>(
    State(store): State<AppState<S>>,
    Path((company_id, category_id)): Path<(Id, Id)>,
    RequestJson(new_product): RequestJson<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = ProductOps::create(&*store, company_id, category_id, new_product)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get_product<S: Store>(
    State(store): State<AppState<S>>,
    Path((company_id, category_id, product_id)): Path<(Id, Id, Id)>,
) -> Result<Json<Product>, ApiError> {
    let product = ProductOps::get(&*store, company_id, category_id, product_id)
        .await
        .map_err(error_response)?;
    Ok(Json(product))
}

pub async fn update_product<S: Store>(
    State(store): State<AppState<S>>,
    Path((company_id, category_id, product_id)): Path<(Id, Id, Id)>,
    RequestJson(fields): RequestJson<ProductUpdate>,
) -> Result<Json<Product>, ApiError> {
    let product = ProductOps::update(&*store, company_id, category_id, product_id, fields)
        .await
        .map_err(error_response)?;
    Ok(Json(product))
}

pub async fn delete_product<S: Store>(
    State(store): State<AppState<S>>,
    Path((company_id, category_id, product_id)): Path<(Id, Id, Id)>,
) -> Result<Json<MessageResponse>, ApiError> {
    ProductOps::delete(&*store, company_id, category_id, product_id)
        .await
        .map_err(error_response)?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
