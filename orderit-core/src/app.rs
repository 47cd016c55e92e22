//! OrderIt application facade
//!
//! Wires the stores into one surface split the way the product is used:
//! guests scan, browse, fill a cart and submit; staff authenticate and then
//! run the menu, the tables and the kitchen flow. Admin mutations all pass
//! the session gate first.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Category, CategoryCreate, CategoryUpdate, DiningTable, Order, OrderStatus, PaymentMethod,
    Product, ProductCreate, ProductUpdate,
};

use crate::auth::{AdminSession, CredentialVerifier, LocalSecretVerifier};
use crate::cart::Cart;
use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::orders::{OrderStore, ProductSales};
use crate::storage::JsonStore;
use crate::tables::{self, TableRegistry};

/// How many products the best-sellers widget shows
const BEST_SELLERS_LIMIT: usize = 5;

/// Headline numbers for the admin dashboard
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub today_revenue: f64,
    pub today_orders_count: usize,
    pub pending_orders_count: usize,
    pub total_orders: usize,
    pub product_count: usize,
    pub category_count: usize,
    pub active_tables: usize,
}

/// The assembled application: all stores over one data directory
pub struct OrderIt {
    config: Config,
    catalog: CatalogStore,
    tables: TableRegistry,
    cart: Cart,
    orders: OrderStore,
    session: AdminSession,
    verifier: Box<dyn CredentialVerifier>,
}

impl OrderIt {
    /// Open all stores over the configured data directory
    pub fn open(config: Config, verifier: Box<dyn CredentialVerifier>) -> AppResult<Self> {
        let store = JsonStore::open(&config.data_dir)?;
        let catalog = CatalogStore::open(store.clone())?;
        let tables = TableRegistry::open(store.clone(), config.seed_table_count)?;
        let cart = Cart::open(store.clone(), config.vat_rate)?;
        let orders = OrderStore::open(store.clone())?;
        let session = AdminSession::open(store, config.session_ttl_days)?;
        tracing::info!(data_dir = %config.data_dir.display(), "OrderIt core ready");
        Ok(Self { config, catalog, tables, cart, orders, session, verifier })
    }

    /// Open with the bundled demo credentials
    pub fn open_demo(config: Config) -> AppResult<Self> {
        let verifier = LocalSecretVerifier::demo()?;
        Self::open(config, Box::new(verifier))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== Guest surface ====================

    /// Read-only menu access
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn tables(&self) -> &TableRegistry {
        &self.tables
    }

    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Direct cart edits: quantities, notes, table binding
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Consume a scanned QR token, binding the cart to its table.
    /// Returns the table number, or `None` for tokens without one
    pub fn scan_table(&mut self, token: &str) -> AppResult<Option<u32>> {
        let Some(number) = tables::parse_table_token(token) else {
            tracing::warn!(token, "Scanned token carries no table number");
            return Ok(None);
        };
        self.cart.set_table_number(number)?;
        tracing::info!(table = number, "Cart bound to table");
        Ok(Some(number))
    }

    /// Add one unit of a catalog product to the cart
    ///
    /// This is where availability is enforced: the cart itself accepts any
    /// snapshot it is given, the ordering surface refuses to offer products
    /// that are switched off.
    pub fn add_to_cart(&mut self, product_id: &str) -> AppResult<()> {
        let Some(product) = self.catalog.get_product(product_id) else {
            return Err(AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Product {} not found", product_id),
            ));
        };
        if !product.is_available {
            return Err(AppError::with_message(
                ErrorCode::ProductUnavailable,
                format!("{} is currently unavailable", product.name),
            ));
        }
        let product = product.clone();
        self.cart.add_item(product)
    }

    /// Submit the cart as a new order and empty it
    ///
    /// The cart is consumed only when the order is accepted; a rejected
    /// submission leaves it intact for the guest to fix.
    pub fn submit_order(
        &mut self,
        payment_method: PaymentMethod,
        notes: Option<String>,
    ) -> AppResult<Order> {
        let Some(table_number) = self.cart.table_number() else {
            return Err(AppError::new(ErrorCode::TableNumberRequired));
        };
        let items = self.cart.items().to_vec();
        let order = self
            .orders
            .create_order(items, table_number, payment_method, notes)?;
        self.cart.clear()?;
        Ok(order)
    }

    /// Order lookup for the tracking page
    pub fn track_order(&self, order_id: &str) -> Option<&Order> {
        self.orders.get_order(order_id)
    }

    // ==================== Session ====================

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> AppResult<()> {
        self.session
            .login(self.verifier.as_ref(), email, password)
            .await
    }

    pub fn logout(&mut self) -> AppResult<()> {
        self.session.logout()
    }

    // ==================== Admin surface (gated) ====================

    /// Install the initial menu on a fresh data directory. Runs before any
    /// login exists, so it is not gated
    pub fn seed_menu(
        &mut self,
        categories: Vec<Category>,
        products: Vec<Product>,
    ) -> AppResult<()> {
        self.catalog.seed_if_empty(categories, products)
    }

    pub fn add_category(&mut self, data: CategoryCreate) -> AppResult<Category> {
        self.session.require_admin()?;
        self.catalog.add_category(data)
    }

    pub fn update_category(&mut self, id: &str, patch: CategoryUpdate) -> AppResult<()> {
        self.session.require_admin()?;
        self.catalog.update_category(id, patch)
    }

    pub fn delete_category(&mut self, id: &str) -> AppResult<()> {
        self.session.require_admin()?;
        self.catalog.delete_category(id)
    }

    pub fn add_product(&mut self, data: ProductCreate) -> AppResult<Product> {
        self.session.require_admin()?;
        self.catalog.add_product(data)
    }

    pub fn update_product(&mut self, id: &str, patch: ProductUpdate) -> AppResult<()> {
        self.session.require_admin()?;
        self.catalog.update_product(id, patch)
    }

    pub fn delete_product(&mut self, id: &str) -> AppResult<()> {
        self.session.require_admin()?;
        self.catalog.delete_product(id)
    }

    pub fn add_table(&mut self, number: u32) -> AppResult<DiningTable> {
        self.session.require_admin()?;
        self.tables.add_table(number)
    }

    pub fn toggle_table(&mut self, id: &str) -> AppResult<()> {
        self.session.require_admin()?;
        self.tables.toggle_table(id)
    }

    pub fn delete_table(&mut self, id: &str) -> AppResult<()> {
        self.session.require_admin()?;
        self.tables.delete_table(id)
    }

    /// Move an order one step along the kitchen flow
    pub fn advance_order(&mut self, order_id: &str) -> AppResult<Option<OrderStatus>> {
        self.session.require_admin()?;
        self.orders.advance_order(order_id)
    }

    /// Request a specific status; out-of-sequence requests are ignored
    pub fn set_order_status(&mut self, order_id: &str, status: OrderStatus) -> AppResult<bool> {
        self.session.require_admin()?;
        self.orders.update_order_status(order_id, status)
    }

    /// Close out a table when the guests pay and leave
    pub fn settle_table(&mut self, table_number: u32) -> AppResult<usize> {
        self.session.require_admin()?;
        self.orders.settle_table(table_number)
    }

    pub fn dashboard_stats(&self) -> AppResult<DashboardStats> {
        self.session.require_admin()?;
        Ok(DashboardStats {
            today_revenue: self.orders.today_revenue(self.config.revenue_policy),
            today_orders_count: self.orders.today_orders_count(),
            pending_orders_count: self.orders.pending_orders().len(),
            total_orders: self.orders.orders().len(),
            product_count: self.catalog.products().len(),
            category_count: self.catalog.categories().len(),
            active_tables: self.tables.active_count(),
        })
    }

    pub fn best_sellers(&self) -> AppResult<Vec<ProductSales>> {
        self.session.require_admin()?;
        Ok(self.orders.best_sellers(BEST_SELLERS_LIMIT))
    }
}
