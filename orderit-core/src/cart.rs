//! Cart aggregate
//!
//! One active cart per guest device, bound to a table by the scanned QR
//! token. Each line snapshots the product at add time, so later catalog
//! edits never reprice a cart that is already being filled.
//!
//! Availability is not checked here; the ordering surface decides whether
//! an unavailable product may be offered at all.

use crate::money;
use crate::storage::{JsonStore, StorageError};
use serde::{Deserialize, Serialize};
use shared::error::AppResult;
use shared::models::{CartItem, Product};

const CART_FILE: &str = "cart.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartState {
    items: Vec<CartItem>,
    table_number: Option<u32>,
}

/// Guest cart persisted to `cart.json`
pub struct Cart {
    store: JsonStore,
    state: CartState,
    vat_rate: f64,
}

impl Cart {
    /// Load the cart from disk; a missing file starts empty
    pub fn open(store: JsonStore, vat_rate: f64) -> Result<Self, StorageError> {
        let state: CartState = store.load(CART_FILE)?;
        Ok(Self { store, state, vat_rate })
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.save(CART_FILE, &self.state)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.state.items
    }

    pub fn table_number(&self) -> Option<u32> {
        self.state.table_number
    }

    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    /// Bind the cart to a table (normally from a scanned QR token)
    pub fn set_table_number(&mut self, number: u32) -> AppResult<()> {
        self.state.table_number = Some(number);
        self.persist()?;
        Ok(())
    }

    /// Add one unit of a product: increments the existing line or appends
    /// a new one, so a product never occupies two lines
    pub fn add_item(&mut self, product: Product) -> AppResult<()> {
        if let Some(item) = self.state.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += 1;
        } else {
            self.state.items.push(CartItem::new(product, 1));
        }
        self.persist()?;
        Ok(())
    }

    /// Set a line's exact quantity; zero or below removes the line.
    /// Unknown product ids are ignored
    pub fn update_quantity(&mut self, product_id: &str, quantity: i32) -> AppResult<()> {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }
        let Some(item) = self.state.items.iter_mut().find(|i| i.product.id == product_id) else {
            return Ok(());
        };
        item.quantity = quantity;
        self.persist()?;
        Ok(())
    }

    /// Remove a line; unknown product ids are ignored
    pub fn remove_item(&mut self, product_id: &str) -> AppResult<()> {
        let before = self.state.items.len();
        self.state.items.retain(|i| i.product.id != product_id);
        if self.state.items.len() == before {
            return Ok(());
        }
        self.persist()?;
        Ok(())
    }

    /// Set free-text notes on a line; empty text clears them.
    /// Unknown product ids are ignored
    pub fn update_item_notes(&mut self, product_id: &str, notes: &str) -> AppResult<()> {
        let Some(item) = self.state.items.iter_mut().find(|i| i.product.id == product_id) else {
            return Ok(());
        };
        item.notes = if notes.is_empty() { None } else { Some(notes.to_string()) };
        self.persist()?;
        Ok(())
    }

    /// Empty the cart. The table binding survives so the guest can keep
    /// ordering for the same table
    pub fn clear(&mut self) -> AppResult<()> {
        self.state.items.clear();
        self.persist()?;
        Ok(())
    }

    // ==================== Derived totals ====================

    /// Total number of units across all lines
    pub fn total_items(&self) -> i32 {
        self.state.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of price * quantity over all lines
    pub fn total_amount(&self) -> f64 {
        money::to_f64(money::items_total(&self.state.items))
    }

    /// VAT shown on top of the subtotal (display only, never stored)
    pub fn vat_amount(&self) -> f64 {
        money::to_f64(money::vat_amount(money::items_total(&self.state.items), self.vat_rate))
    }

    /// Subtotal plus VAT (display only, never stored)
    pub fn total_with_vat(&self) -> f64 {
        money::to_f64(money::total_with_vat(money::items_total(&self.state.items), self.vat_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_cart() -> (tempfile::TempDir, Cart) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        let cart = Cart::open(store, 0.15).unwrap();
        (dir, cart)
    }

    fn product(id: &str, name: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            name_ar: format!("{} ar", name),
            description: String::new(),
            description_ar: String::new(),
            price,
            image: "/placeholder.svg".to_string(),
            category_id: "cat-1".to_string(),
            is_available: true,
            preparation_time: 10,
        }
    }

    #[test]
    fn test_add_item_increments_existing_line() {
        let (_dir, mut cart) = open_cart();

        cart.add_item(product("prod-a", "Burger", 20.0)).unwrap();
        cart.add_item(product("prod-a", "Burger", 20.0)).unwrap();
        cart.add_item(product("prod-b", "Fries", 8.0)).unwrap();

        assert_eq!(cart.items().len(), 2, "same product must never occupy two lines");
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[1].quantity, 1);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_update_quantity_sets_exact_value() {
        let (_dir, mut cart) = open_cart();
        cart.add_item(product("prod-a", "Burger", 20.0)).unwrap();

        cart.update_quantity("prod-a", 5).unwrap();
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_update_quantity_zero_or_below_removes_line() {
        let (_dir, mut cart) = open_cart();
        cart.add_item(product("prod-a", "Burger", 20.0)).unwrap();
        cart.add_item(product("prod-b", "Fries", 8.0)).unwrap();

        cart.update_quantity("prod-a", 0).unwrap();
        assert_eq!(cart.items().len(), 1);

        cart.update_quantity("prod-b", -2).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_missing_lines_are_ignored() {
        let (_dir, mut cart) = open_cart();
        cart.add_item(product("prod-a", "Burger", 20.0)).unwrap();

        cart.update_quantity("prod-missing", 3).unwrap();
        cart.remove_item("prod-missing").unwrap();
        cart.update_item_notes("prod-missing", "extra cheese").unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
        assert!(cart.items()[0].notes.is_none());
    }

    #[test]
    fn test_update_item_notes_sets_and_clears() {
        let (_dir, mut cart) = open_cart();
        cart.add_item(product("prod-a", "Burger", 20.0)).unwrap();

        cart.update_item_notes("prod-a", "no onions").unwrap();
        assert_eq!(cart.items()[0].notes.as_deref(), Some("no onions"));

        cart.update_item_notes("prod-a", "").unwrap();
        assert!(cart.items()[0].notes.is_none());
    }

    #[test]
    fn test_clear_keeps_table_binding() {
        let (_dir, mut cart) = open_cart();
        cart.set_table_number(3).unwrap();
        cart.add_item(product("prod-a", "Burger", 20.0)).unwrap();

        cart.clear().unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart.table_number(), Some(3));
    }

    #[test]
    fn test_derived_totals() {
        let (_dir, mut cart) = open_cart();
        cart.add_item(product("prod-a", "Burger", 20.0)).unwrap();
        cart.update_quantity("prod-a", 2).unwrap();
        cart.add_item(product("prod-b", "Fries", 15.0)).unwrap();

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_amount(), 55.0);
        assert_eq!(cart.vat_amount(), 8.25);
        assert_eq!(cart.total_with_vat(), 63.25);
    }

    #[test]
    fn test_totals_survive_catalog_style_reprice() {
        let (_dir, mut cart) = open_cart();
        let mut snapshot = product("prod-a", "Burger", 20.0);
        cart.add_item(snapshot.clone()).unwrap();

        // The caller mutating its own copy must not reach the cart line
        snapshot.price = 99.0;
        assert_eq!(cart.total_amount(), 20.0);
    }

    #[test]
    fn test_cart_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();

        {
            let mut cart = Cart::open(store.clone(), 0.15).unwrap();
            cart.set_table_number(7).unwrap();
            cart.add_item(product("prod-a", "Burger", 20.0)).unwrap();
            cart.update_item_notes("prod-a", "well done").unwrap();
        }

        let reopened = Cart::open(store, 0.15).unwrap();
        assert_eq!(reopened.table_number(), Some(7));
        assert_eq!(reopened.items().len(), 1);
        assert_eq!(reopened.items()[0].notes.as_deref(), Some("well done"));
    }
}
