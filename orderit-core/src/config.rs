//! Core configuration
//!
//! Read once from environment variables at startup, with defaults that make
//! a fresh checkout run without any setup.

use crate::orders::RevenuePolicy;
use std::path::PathBuf;

/// Runtime configuration for the OrderIt core
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the JSON data files
    pub data_dir: PathBuf,
    /// Number of dining tables seeded on first run
    pub seed_table_count: u32,
    /// VAT rate shown on cart totals (0.15 = 15%)
    pub vat_rate: f64,
    /// Days an admin session marker stays valid
    pub session_ttl_days: i64,
    /// Which orders count toward today's revenue
    pub revenue_policy: RevenuePolicy,
}

impl Config {
    /// Build configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("ORDERIT_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            seed_table_count: std::env::var("ORDERIT_SEED_TABLES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            vat_rate: std::env::var("ORDERIT_VAT_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.15),
            session_ttl_days: std::env::var("ORDERIT_SESSION_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
            revenue_policy: match std::env::var("ORDERIT_REVENUE_POLICY").as_deref() {
                Ok("include_completed") => RevenuePolicy::IncludeCompleted,
                _ => RevenuePolicy::OpenOrdersOnly,
            },
        }
    }

}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
