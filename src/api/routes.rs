use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::api::handlers;
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Company management
        .route("/companies", get(handlers::list_companies::<S>))
        .route("/companies", post(handlers::create_company::<S>))
        .route("/companies/:company_id", get(handlers::get_company::<S>))
        .route("/companies/:company_id", put(handlers::update_company::<S>))
        .route(
            "/companies/:company_id",
            delete(handlers::delete_company::<S>),
        )
        // Company-category relationship (the many-to-many edge)
        .route(
            "/companies/:company_id/categories/:category_id/attach",
            post(handlers::attach_category::<S>),
        )
        .route(
            "/companies/:company_id/categories/:category_id/detach",
            post(handlers::detach_category::<S>),
        )
        // Categories, addressed through their owning company
        .route(
            "/companies/:company_id/categories",
            get(handlers::list_categories::<S>),
        )
        .route(
            "/companies/:company_id/categories",
            post(handlers::create_category::<S>),
        )
        .route(
            "/companies/:company_id/categories/:category_id",
            get(handlers::get_category::<S>),
        )
        .route(
            "/companies/:company_id/categories/:category_id",
            put(handlers::update_category::<S>),
        )
        .route(
            "/companies/:company_id/categories/:category_id",
            delete(handlers::delete_category::<S>),
        )
        // Category-product relationship (the one-to-many back-reference)
        .route(
            "/companies/:company_id/categories/:category_id/products/:product_id/attach",
            post(handlers::attach_product::<S>),
        )
        .route(
            "/companies/:company_id/categories/:category_id/products/:product_id/detach",
            post(handlers::detach_product::<S>),
        )
        // Products, addressed through the full company -> category path
        .route(
            "/companies/:company_id/categories/:category_id/products",
            get(handlers::list_products::<S>),
        )
        .route(
            "/companies/:company_id/categories/:category_id/products",
            post(handlers::create_product::<S>),
        )
        .route(
            "/companies/:company_id/categories/:category_id/products/:product_id",
            get(handlers::get_product::<S>),
        )
        .route(
            "/companies/:company_id/categories/:category_id/products/:product_id",
            put(handlers::update_product::<S>),
        )
        .route(
            "/companies/:company_id/categories/:category_id/products/:product_id",
            delete(handlers::delete_product::<S>),
        )
}
