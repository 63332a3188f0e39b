use crate::model::Id;
use serde::{Deserialize, Serialize};

/// A product category. A category may belong to several companies (the
/// inverse side of the company's set) and owns its products one-to-many.
/// Both sets are read-assembled from the relationship index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub products: Vec<Id>,
    #[serde(default)]
    pub companies: Vec<Id>,
}

/// Input model for creating or updating a category. Relationship sets are
/// never part of an update; they change only through attach/detach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

pub type CategoryUpdate = NewCategory;
