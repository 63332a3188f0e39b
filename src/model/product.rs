use crate::model::Id;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A product. Belongs to at most one category; `category_id` is the single
/// source of truth for that edge and is NULL while the product is detached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Id,
    pub name: String,
    pub price: f64,
    pub mfg_date: NaiveDate,
    pub expiry_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Id>,
}

/// Input model for creating or updating a product. The owning category comes
/// from the request path, never from the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub mfg_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

pub type ProductUpdate = NewProduct;
