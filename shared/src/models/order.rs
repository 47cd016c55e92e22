//! Order Model

use super::cart::CartItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status, a strict forward-only chain
///
/// `PENDING → PREPARING → READY → SERVED → COMPLETED`
///
/// `Completed` is terminal. The only sanctioned multi-step jump is the
/// bulk table settlement in the order store, which moves every open order
/// of a table straight to `Completed`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Served,
    Completed,
}

impl OrderStatus {
    /// All statuses in kitchen-flow order
    pub const FLOW: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Completed,
    ];

    /// The immediate successor in the flow, or `None` for the terminal status
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Served),
            OrderStatus::Served => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }

    /// Whether this status accepts no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }

    /// Whether `target` is the immediate successor of this status
    pub fn can_advance_to(&self, target: OrderStatus) -> bool {
        self.next() == Some(target)
    }
}

/// Payment method chosen at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Online,
    Cash,
}

/// Submitted order entity
///
/// Immutable after creation except for `status` and `updated_at`.
/// `items` are full product snapshots; later catalog edits do not affect
/// submitted orders. `total_amount` is the pre-tax subtotal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub table_number: u32,
    pub items: Vec<CartItem>,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    /// Total amount in currency unit, fixed at submission
    pub total_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
