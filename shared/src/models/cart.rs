//! Cart item model

use super::product::Product;
use serde::{Deserialize, Serialize};

/// A cart line: full product snapshot plus quantity and optional notes
///
/// Orders built from these lines keep the name and price the customer saw,
/// even if the product is edited or deleted from the catalog afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CartItem {
    pub fn new(product: Product, quantity: i32) -> Self {
        Self {
            product,
            quantity,
            notes: None,
        }
    }
}
