//! Order lifecycle and dashboard queries
//!
//! Orders freeze the cart lines that created them and then walk the kitchen
//! flow pending -> preparing -> ready -> served -> completed, one step at a
//! time. The only sanctioned shortcut is [`OrderStore::settle_table`], which
//! closes every open order of a table in one sweep when guests pay and
//! leave.

use crate::money;
use crate::storage::{JsonStore, StorageError};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CartItem, Order, OrderStatus, PaymentMethod};
use shared::util;
use std::collections::HashMap;

const ORDERS_FILE: &str = "orders.json";

/// Which orders count toward today's revenue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenuePolicy {
    /// Only orders still open today. This mirrors the dashboard the staff
    /// already work with, where settling a table moves its money off the
    /// headline number
    #[default]
    OpenOrdersOnly,
    /// Every order created today regardless of status
    IncludeCompleted,
}

/// Aggregated sales line for the best-sellers dashboard widget
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: String,
    pub name: String,
    pub name_ar: String,
    pub price: f64,
    pub quantity_sold: i32,
}

fn is_today(timestamp: DateTime<Utc>) -> bool {
    timestamp.with_timezone(&Local).date_naive() == Local::now().date_naive()
}

/// Order history persisted to `orders.json`, most recent first
pub struct OrderStore {
    store: JsonStore,
    orders: Vec<Order>,
    /// Last order created in this session; resolved by id so status
    /// updates are always visible through it
    current_order_id: Option<String>,
}

impl OrderStore {
    /// Load order history from disk; a missing file starts empty
    pub fn open(store: JsonStore) -> Result<Self, StorageError> {
        let orders: Vec<Order> = store.load(ORDERS_FILE)?;
        tracing::debug!(count = orders.len(), "Orders loaded");
        Ok(Self { store, orders, current_order_id: None })
    }

    /// Write `next` to disk, then adopt it as the in-memory history.
    /// Nothing changes in memory when the write fails.
    fn commit(&mut self, next: Vec<Order>) -> Result<(), StorageError> {
        self.store.save(ORDERS_FILE, &next)?;
        self.orders = next;
        Ok(())
    }

    /// Freeze cart lines into a new pending order
    ///
    /// Rejects an empty item list, a missing table number and malformed
    /// lines. Neither a rejection nor a failed write touches the history.
    pub fn create_order(
        &mut self,
        items: Vec<CartItem>,
        table_number: u32,
        payment_method: PaymentMethod,
        notes: Option<String>,
    ) -> AppResult<Order> {
        if items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }
        if table_number == 0 {
            return Err(AppError::new(ErrorCode::TableNumberRequired));
        }
        for item in &items {
            money::validate_cart_item(item)?;
        }

        let total_amount = money::to_f64(money::items_total(&items));
        let now = Utc::now();
        let order = Order {
            id: util::order_id(),
            table_number,
            items,
            status: OrderStatus::Pending,
            payment_method,
            total_amount,
            notes,
            created_at: now,
            updated_at: now,
        };
        let mut next = self.orders.clone();
        next.insert(0, order.clone());
        self.commit(next)?;
        self.current_order_id = Some(order.id.clone());
        tracing::info!(
            order_id = %order.id,
            table = table_number,
            total = total_amount,
            "Order created"
        );
        Ok(order)
    }

    /// Move an order to `new_status` if that is the next step in the flow
    ///
    /// Returns whether the update was applied. Unknown ids, skipped steps,
    /// backward moves and terminal orders are all ignored with a warning;
    /// only persistence failures error.
    pub fn update_order_status(
        &mut self,
        order_id: &str,
        new_status: OrderStatus,
    ) -> AppResult<bool> {
        let Some(idx) = self.orders.iter().position(|o| o.id == order_id) else {
            tracing::warn!(order_id, "Status update for unknown order ignored");
            return Ok(false);
        };
        let current = self.orders[idx].status;
        if !current.can_advance_to(new_status) {
            tracing::warn!(
                order_id,
                current = ?current,
                requested = ?new_status,
                "Out-of-sequence status update ignored"
            );
            return Ok(false);
        }
        let mut next = self.orders.clone();
        next[idx].status = new_status;
        next[idx].updated_at = Utc::now();
        self.commit(next)?;
        tracing::info!(order_id, status = ?new_status, "Order status updated");
        Ok(true)
    }

    /// Advance an order one step; returns the new status if applied
    pub fn advance_order(&mut self, order_id: &str) -> AppResult<Option<OrderStatus>> {
        let Some(next) = self.get_order(order_id).and_then(|o| o.status.next()) else {
            return Ok(None);
        };
        let applied = self.update_order_status(order_id, next)?;
        Ok(applied.then_some(next))
    }

    /// Close every open order of a table in one sweep, straight to completed
    ///
    /// Returns how many orders were settled. Already-completed orders and
    /// other tables are untouched.
    pub fn settle_table(&mut self, table_number: u32) -> AppResult<usize> {
        let now = Utc::now();
        let mut next = self.orders.clone();
        let mut settled = 0;
        for order in &mut next {
            if order.table_number == table_number && !order.status.is_terminal() {
                order.status = OrderStatus::Completed;
                order.updated_at = now;
                settled += 1;
            }
        }
        if settled > 0 {
            self.commit(next)?;
            tracing::info!(table = table_number, count = settled, "Table settled");
        }
        Ok(settled)
    }

    // ==================== Queries ====================

    /// All orders, most recent first
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn get_order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Last order created in this session, if any
    pub fn current_order(&self) -> Option<&Order> {
        self.current_order_id
            .as_deref()
            .and_then(|id| self.get_order(id))
    }

    /// Orders of one table in any status, most recent first
    pub fn orders_for_table(&self, table_number: u32) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.table_number == table_number)
            .collect()
    }

    /// Everything the kitchen still has to care about (not yet completed)
    pub fn pending_orders(&self) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.status != OrderStatus::Completed)
            .collect()
    }

    pub fn orders_with_status(&self, status: OrderStatus) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.status == status).collect()
    }

    /// Number of orders per status, for the management tabs
    pub fn status_counts(&self) -> HashMap<OrderStatus, usize> {
        let mut counts = HashMap::new();
        for order in &self.orders {
            *counts.entry(order.status).or_insert(0) += 1;
        }
        counts
    }

    /// Revenue from orders created today, per the configured policy
    pub fn today_revenue(&self, policy: RevenuePolicy) -> f64 {
        let total = self
            .orders
            .iter()
            .filter(|o| is_today(o.created_at))
            .filter(|o| match policy {
                RevenuePolicy::OpenOrdersOnly => o.status != OrderStatus::Completed,
                RevenuePolicy::IncludeCompleted => true,
            })
            .map(|o| money::to_decimal(o.total_amount))
            .sum();
        money::to_f64(total)
    }

    /// Orders created today in any status
    pub fn today_orders_count(&self) -> usize {
        self.orders.iter().filter(|o| is_today(o.created_at)).count()
    }

    /// Top `limit` products by units sold across the whole history;
    /// equal sellers rank by name
    pub fn best_sellers(&self, limit: usize) -> Vec<ProductSales> {
        let mut by_product: HashMap<&str, ProductSales> = HashMap::new();
        for order in &self.orders {
            for item in &order.items {
                by_product
                    .entry(item.product.id.as_str())
                    .and_modify(|sales| sales.quantity_sold += item.quantity)
                    .or_insert_with(|| ProductSales {
                        product_id: item.product.id.clone(),
                        name: item.product.name.clone(),
                        name_ar: item.product.name_ar.clone(),
                        price: item.product.price,
                        quantity_sold: item.quantity,
                    });
            }
        }
        let mut sales: Vec<ProductSales> = by_product.into_values().collect();
        sales.sort_by(|a, b| {
            b.quantity_sold
                .cmp(&a.quantity_sold)
                .then_with(|| a.name.cmp(&b.name))
        });
        sales.truncate(limit);
        sales
    }
}
