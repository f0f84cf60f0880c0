//! Menu catalog service
//!
//! Read-only lookup of sellable items. The ordering core resolves ids
//! here and snapshots prices at admission; it never mutates the catalog.
//! Entries are loaded at startup from a JSON seed file (`MENU_FILE`) or
//! the built-in development menu.

use parking_lot::RwLock;
use shared::models::MenuItem;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Catalog load errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read menu file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse menu file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Menu item {0} has a negative unit price")]
    NegativePrice(i64),
}

/// In-memory menu catalog
#[derive(Debug, Default)]
pub struct CatalogService {
    items: RwLock<HashMap<i64, MenuItem>>,
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a fixed item set
    pub fn with_items(items: Vec<MenuItem>) -> Self {
        let catalog = Self::new();
        catalog.load(items);
        catalog
    }

    /// Load a catalog from a JSON file (array of menu items)
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let items: Vec<MenuItem> = serde_json::from_str(&raw)?;
        for item in &items {
            if item.unit_price < 0 {
                return Err(CatalogError::NegativePrice(item.id));
            }
        }
        info!(path = %path.as_ref().display(), count = items.len(), "Menu catalog loaded");
        Ok(Self::with_items(items))
    }

    /// Replace the full item set
    pub fn load(&self, items: Vec<MenuItem>) {
        let mut map = self.items.write();
        map.clear();
        map.extend(items.into_iter().map(|item| (item.id, item)));
    }

    /// Resolve a menu item by id
    pub fn resolve(&self, id: i64) -> Option<MenuItem> {
        self.items.read().get(&id).cloned()
    }

    /// All items, sorted by id
    pub fn list(&self) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = self.items.read().values().cloned().collect();
        items.sort_by_key(|item| item.id);
        items
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Built-in menu for development and tests
    pub fn default_menu() -> Vec<MenuItem> {
        use shared::models::MenuCategory::{Drink, Food, Snack};
        let entry = |id, name: &str, unit_price, category| MenuItem {
            id,
            name: name.to_string(),
            unit_price,
            category,
        };
        vec![
            entry(1, "Nasi Goreng Spesial", 20_000, Food),
            entry(2, "Mie Ayam Bakso", 18_000, Food),
            entry(3, "Ayam Geprek", 22_000, Food),
            entry(4, "Tahu Crispy", 10_000, Snack),
            entry(5, "Sate Ayam", 25_000, Food),
            entry(6, "Pisang Goreng", 12_000, Snack),
            entry(7, "Es Teh Manis", 5_000, Drink),
            entry(8, "Es Jeruk", 7_000, Drink),
            entry(9, "Kopi Susu", 15_000, Drink),
        ]
    }
}
