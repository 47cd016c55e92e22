//! Category Model

use serde::{Deserialize, Serialize};

/// Menu category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub name_ar: String,
    /// Image URL (may be empty)
    pub image: String,
    /// Display position in the menu, ascending
    #[serde(rename = "order")]
    pub sort_order: i32,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    pub name: String,
    pub name_ar: String,
    pub image: String,
    pub sort_order: Option<i32>,
}

/// Update category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub name_ar: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

impl CategoryUpdate {
    /// Merge non-None fields into an existing category
    pub fn apply(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(name_ar) = self.name_ar {
            category.name_ar = name_ar;
        }
        if let Some(image) = self.image {
            category.image = image;
        }
        if let Some(sort_order) = self.sort_order {
            category.sort_order = sort_order;
        }
    }
}
