//! Catalog store: categories and products
//!
//! Two JSON-backed collections edited from the admin surface and read by the
//! guest menu. There is no referential integrity between them: deleting a
//! category leaves its products in place, and lookups through a stale
//! `category_id` fall back to a placeholder label instead of failing.

use crate::money;
use crate::storage::{JsonStore, StorageError};
use shared::error::AppResult;
use shared::models::{
    Category, CategoryCreate, CategoryUpdate, Product, ProductCreate, ProductUpdate,
};
use shared::util;

const CATEGORIES_FILE: &str = "categories.json";
const PRODUCTS_FILE: &str = "products.json";

/// Image used when a form submits none
const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Label shown for products whose category no longer exists
pub const UNCATEGORIZED: &str = "Uncategorized";

fn or_placeholder(image: String) -> String {
    if image.is_empty() {
        PLACEHOLDER_IMAGE.to_string()
    } else {
        image
    }
}

/// In-memory catalog persisted to `categories.json` and `products.json`
pub struct CatalogStore {
    store: JsonStore,
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl CatalogStore {
    /// Load the catalog from disk; missing files start empty
    pub fn open(store: JsonStore) -> Result<Self, StorageError> {
        let categories: Vec<Category> = store.load(CATEGORIES_FILE)?;
        let products: Vec<Product> = store.load(PRODUCTS_FILE)?;
        tracing::debug!(
            categories = categories.len(),
            products = products.len(),
            "Catalog loaded"
        );
        Ok(Self { store, categories, products })
    }

    /// Install seed data, but only when nothing has ever been persisted
    pub fn seed_if_empty(
        &mut self,
        categories: Vec<Category>,
        products: Vec<Product>,
    ) -> AppResult<()> {
        if self.store.exists(CATEGORIES_FILE) || self.store.exists(PRODUCTS_FILE) {
            return Ok(());
        }
        tracing::info!(
            categories = categories.len(),
            products = products.len(),
            "Seeding catalog"
        );
        self.categories = categories;
        self.products = products;
        self.persist_categories()?;
        self.persist_products()?;
        Ok(())
    }

    fn persist_categories(&self) -> Result<(), StorageError> {
        self.store.save(CATEGORIES_FILE, &self.categories)
    }

    fn persist_products(&self) -> Result<(), StorageError> {
        self.store.save(PRODUCTS_FILE, &self.products)
    }

    // ==================== Categories ====================

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Categories in menu display order
    pub fn sorted_categories(&self) -> Vec<&Category> {
        let mut sorted: Vec<&Category> = self.categories.iter().collect();
        sorted.sort_by_key(|c| c.sort_order);
        sorted
    }

    pub fn get_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn add_category(&mut self, data: CategoryCreate) -> AppResult<Category> {
        let category = Category {
            id: util::category_id(),
            name: data.name,
            name_ar: data.name_ar,
            image: or_placeholder(data.image),
            sort_order: data.sort_order.unwrap_or(self.categories.len() as i32 + 1),
        };
        self.categories.push(category.clone());
        self.persist_categories()?;
        tracing::info!(category_id = %category.id, name = %category.name, "Category added");
        Ok(category)
    }

    /// Merge the given fields into an existing category; unknown ids are ignored
    pub fn update_category(&mut self, id: &str, patch: CategoryUpdate) -> AppResult<()> {
        let Some(category) = self.categories.iter_mut().find(|c| c.id == id) else {
            tracing::warn!(category_id = id, "Update for unknown category ignored");
            return Ok(());
        };
        patch.apply(category);
        self.persist_categories()?;
        tracing::info!(category_id = id, "Category updated");
        Ok(())
    }

    /// Remove a category. Products keep their `category_id` and become
    /// orphans; unknown ids are ignored
    pub fn delete_category(&mut self, id: &str) -> AppResult<()> {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            return Ok(());
        }
        self.persist_categories()?;
        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }

    /// Display name for a product's category, tolerating stale references
    pub fn category_display_name(&self, category_id: &str) -> &str {
        self.get_category(category_id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED)
    }

    // ==================== Products ====================

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn products_in_category(&self, category_id: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category_id == category_id)
            .collect()
    }

    pub fn product_count(&self, category_id: &str) -> usize {
        self.products
            .iter()
            .filter(|p| p.category_id == category_id)
            .count()
    }

    /// Case-insensitive substring search over both language names and
    /// descriptions
    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        let query = query.to_lowercase();
        if query.is_empty() {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.name_ar.to_lowercase().contains(&query)
                    || p.description.to_lowercase().contains(&query)
                    || p.description_ar.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn add_product(&mut self, data: ProductCreate) -> AppResult<Product> {
        money::validate_price(data.price)?;
        let product = Product {
            id: util::product_id(),
            name: data.name,
            name_ar: data.name_ar,
            description: data.description,
            description_ar: data.description_ar,
            price: data.price,
            image: or_placeholder(data.image),
            category_id: data.category_id,
            is_available: data.is_available.unwrap_or(true),
            preparation_time: data.preparation_time,
        };
        self.products.push(product.clone());
        self.persist_products()?;
        tracing::info!(product_id = %product.id, name = %product.name, "Product added");
        Ok(product)
    }

    /// Merge the given fields into an existing product; unknown ids are ignored
    pub fn update_product(&mut self, id: &str, patch: ProductUpdate) -> AppResult<()> {
        if let Some(price) = patch.price {
            money::validate_price(price)?;
        }
        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            tracing::warn!(product_id = id, "Update for unknown product ignored");
            return Ok(());
        };
        patch.apply(product);
        self.persist_products()?;
        tracing::info!(product_id = id, "Product updated");
        Ok(())
    }

    /// Remove a product; unknown ids are ignored
    pub fn delete_product(&mut self, id: &str) -> AppResult<()> {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() == before {
            return Ok(());
        }
        self.persist_products()?;
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }
}
