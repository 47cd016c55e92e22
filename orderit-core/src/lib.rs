//! OrderIt Core - QR table-ordering state core
//!
//! State management and order lifecycle for a restaurant where guests scan
//! a table QR code, browse the menu and order from their phones, while staff
//! run the kitchen flow and the menu from an admin surface.
//!
//! # Module structure
//!
//! ```text
//! orderit-core/src/
//! ├── app.rs         # OrderIt facade wiring all stores together
//! ├── auth.rs        # Admin gate: credential boundary + session marker
//! ├── cart.rs        # Per-guest cart aggregate
//! ├── catalog.rs     # Categories and products
//! ├── config.rs      # Environment-driven configuration
//! ├── money.rs       # Decimal money math and validation
//! ├── orders.rs      # Order lifecycle and dashboard queries
//! ├── storage.rs     # JSON file persistence
//! └── tables.rs      # Dining table registry and QR tokens
//! ```
//!
//! All stores persist through [`storage::JsonStore`], one pretty-printed
//! JSON file per collection under the configured data directory.

pub mod app;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod money;
pub mod orders;
pub mod storage;
pub mod tables;

// Re-export the public surface
pub use app::{DashboardStats, OrderIt};
pub use auth::{AdminSession, CredentialVerifier, LocalSecretVerifier};
pub use cart::Cart;
pub use catalog::CatalogStore;
pub use config::Config;
pub use orders::{OrderStore, ProductSales, RevenuePolicy};
pub use storage::{JsonStore, StorageError};
pub use tables::TableRegistry;

// Re-export unified error types from shared
pub use shared::error::{AppError, AppResult, ErrorCode};
