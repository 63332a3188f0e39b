use crate::model::Id;
use serde::{Deserialize, Serialize};

/// A company and the categories it owns. The `categories` set is assembled
/// from the relationship index on every read; callers never write it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: Id,
    pub name: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub categories: Vec<Id>,
}

/// Input model for creating or updating a company. Updates are a full
/// replacement of the scalar fields; the category set is untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub city: String,
    pub state: String,
}

pub type CompanyUpdate = NewCompany;
