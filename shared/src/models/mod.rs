//! Data models
//!
//! Shared between the state stores and the frontend (via persisted JSON).
//! Field names serialize in camelCase to match the frontend's stored data.
//! All IDs are prefixed strings (`cat-`, `prod-`, `table-`, `ORD-`).

pub mod cart;
pub mod category;
pub mod dining_table;
pub mod order;
pub mod product;

// Re-exports
pub use cart::*;
pub use category::*;
pub use dining_table::*;
pub use order::*;
pub use product::*;
