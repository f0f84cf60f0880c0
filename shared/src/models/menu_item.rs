//! Menu catalog entry
//!
//! The catalog is an external collaborator from the ordering core's point
//! of view: items are resolved by id and never mutated by order code.

use serde::{Deserialize, Serialize};

/// Menu category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuCategory {
    Food,
    Snack,
    Drink,
}

/// Sellable menu item
///
/// `unit_price` is the current catalog price in the smallest currency
/// unit. Orders snapshot this value at admission time, so later catalog
/// edits never change historical totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    /// Catalog id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Current price (smallest currency unit, non-negative)
    pub unit_price: i64,
    /// Category
    pub category: MenuCategory,
}
