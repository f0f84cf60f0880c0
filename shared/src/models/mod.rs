//! Domain model types

mod menu_item;

pub use menu_item::{MenuCategory, MenuItem};
