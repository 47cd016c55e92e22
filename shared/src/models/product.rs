//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub name_ar: String,
    pub description: String,
    pub description_ar: String,
    /// Price in currency unit
    pub price: f64,
    /// Image URL (may be empty)
    pub image: String,
    /// Category reference; may point at a deleted category
    pub category_id: String,
    pub is_available: bool,
    /// Estimated preparation time in minutes
    pub preparation_time: u32,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub name_ar: String,
    pub description: String,
    pub description_ar: String,
    pub price: f64,
    pub image: String,
    pub category_id: String,
    pub is_available: Option<bool>,
    pub preparation_time: u32,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub name_ar: Option<String>,
    pub description: Option<String>,
    pub description_ar: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub category_id: Option<String>,
    pub is_available: Option<bool>,
    pub preparation_time: Option<u32>,
}

impl ProductUpdate {
    /// Merge non-None fields into an existing product
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(name_ar) = self.name_ar {
            product.name_ar = name_ar;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(description_ar) = self.description_ar {
            product.description_ar = description_ar;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(category_id) = self.category_id {
            product.category_id = category_id;
        }
        if let Some(is_available) = self.is_available {
            product.is_available = is_available;
        }
        if let Some(preparation_time) = self.preparation_time {
            product.preparation_time = preparation_time;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: "prod-1".to_string(),
            name: "Falafel Wrap".to_string(),
            name_ar: "فلافل".to_string(),
            description: "Crispy falafel".to_string(),
            description_ar: "فلافل مقرمشة".to_string(),
            price: 12.5,
            image: String::new(),
            category_id: "cat-1".to_string(),
            is_available: true,
            preparation_time: 10,
        }
    }

    #[test]
    fn test_update_apply_partial() {
        let mut product = sample_product();

        ProductUpdate {
            price: Some(14.0),
            is_available: Some(false),
            ..Default::default()
        }
        .apply(&mut product);

        assert_eq!(product.price, 14.0);
        assert!(!product.is_available);
        assert_eq!(product.name, "Falafel Wrap");
        assert_eq!(product.category_id, "cat-1");
    }

    #[test]
    fn test_serde_layout_matches_frontend() {
        let json = serde_json::to_value(sample_product()).unwrap();
        assert_eq!(json["categoryId"], "cat-1");
        assert_eq!(json["isAvailable"], true);
        assert_eq!(json["preparationTime"], 10);
        assert_eq!(json["descriptionAr"], "فلافل مقرمشة");
    }

    #[test]
    fn test_deserialize_from_frontend_json() {
        let json = r#"{
            "id": "prod-9",
            "name": "Mint Tea",
            "nameAr": "شاي بالنعناع",
            "description": "Fresh mint",
            "descriptionAr": "نعناع طازج",
            "price": 8.0,
            "image": "",
            "categoryId": "cat-2",
            "isAvailable": false,
            "preparationTime": 5
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "prod-9");
        assert!(!product.is_available);
        assert_eq!(product.preparation_time, 5);
    }
}
