//! Dining table registry
//!
//! Tables carry the QR routing tokens printed and placed on the physical
//! tables. A default set is seeded the first time the registry opens over an
//! empty data directory; after that the persisted file is authoritative,
//! even when every table has been deleted.

use crate::storage::{JsonStore, StorageError};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::DiningTable;
use shared::util;

const TABLES_FILE: &str = "tables.json";

/// Routing token encoded into a table's QR code
pub fn qr_code_for(number: u32) -> String {
    format!("/menu?table={}", number)
}

/// Extract the table number from a scanned routing token
///
/// Accepts both the bare token (`/menu?table=5`) and a full URL carrying
/// extra query parameters.
pub fn parse_table_token(token: &str) -> Option<u32> {
    let (_, query) = token.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key == "table" { value.parse().ok() } else { None }
    })
}

/// Registry of dining tables persisted to `tables.json`
pub struct TableRegistry {
    store: JsonStore,
    tables: Vec<DiningTable>,
}

impl TableRegistry {
    /// Load the registry, seeding `1..=seed_count` active tables on first run
    pub fn open(store: JsonStore, seed_count: u32) -> Result<Self, StorageError> {
        if !store.exists(TABLES_FILE) {
            let tables: Vec<DiningTable> = (1..=seed_count)
                .map(|number| DiningTable {
                    id: format!("table-{}", number),
                    number,
                    qr_code: qr_code_for(number),
                    is_active: true,
                })
                .collect();
            let registry = Self { store, tables };
            registry.persist()?;
            tracing::info!(count = seed_count, "Seeded default tables");
            return Ok(registry);
        }
        let tables: Vec<DiningTable> = store.load(TABLES_FILE)?;
        tracing::debug!(count = tables.len(), "Tables loaded");
        Ok(Self { store, tables })
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.save(TABLES_FILE, &self.tables)
    }

    pub fn tables(&self) -> &[DiningTable] {
        &self.tables
    }

    pub fn get_table(&self, id: &str) -> Option<&DiningTable> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn get_by_number(&self, number: u32) -> Option<&DiningTable> {
        self.tables.iter().find(|t| t.number == number)
    }

    pub fn active_count(&self) -> usize {
        self.tables.iter().filter(|t| t.is_active).count()
    }

    /// Register a new table; the number must be positive and unused
    pub fn add_table(&mut self, number: u32) -> AppResult<DiningTable> {
        if number == 0 {
            return Err(AppError::validation("table number must be positive"));
        }
        if self.get_by_number(number).is_some() {
            return Err(AppError::with_message(
                ErrorCode::TableNumberTaken,
                format!("Table {} already exists", number),
            ));
        }
        let table = DiningTable {
            id: util::table_id(),
            number,
            qr_code: qr_code_for(number),
            is_active: true,
        };
        self.tables.push(table.clone());
        self.persist()?;
        tracing::info!(table_id = %table.id, number, "Table added");
        Ok(table)
    }

    /// Flip a table's active flag; unknown ids are ignored
    pub fn toggle_table(&mut self, id: &str) -> AppResult<()> {
        let Some(table) = self.tables.iter_mut().find(|t| t.id == id) else {
            tracing::warn!(table_id = id, "Toggle for unknown table ignored");
            return Ok(());
        };
        table.is_active = !table.is_active;
        let active = table.is_active;
        self.persist()?;
        tracing::info!(table_id = id, active, "Table status toggled");
        Ok(())
    }

    /// Remove a table from the registry; unknown ids are ignored.
    /// Existing orders referencing the table's number are untouched.
    pub fn delete_table(&mut self, id: &str) -> AppResult<()> {
        let before = self.tables.len();
        self.tables.retain(|t| t.id != id);
        if self.tables.len() == before {
            return Ok(());
        }
        self.persist()?;
        tracing::info!(table_id = id, "Table deleted");
        Ok(())
    }
}
