//! Session cart
//!
//! Ephemeral, owned by a single session: accumulates selections before
//! checkout and is cleared only after the admission service reports
//! success. One line per menu item; adding an item already present
//! increments its quantity instead of duplicating the line.

use super::error::{OrderError, OrderResult};
use crate::catalog::CatalogService;
use shared::order::{CartLine, CheckoutLine};
use std::collections::HashMap;

/// In-progress selection prior to checkout
#[derive(Debug, Default, Clone)]
pub struct Cart {
    lines: HashMap<i64, CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of an item, merging into an existing line
    ///
    /// Quantity 0 is a no-op, so a line can never be created at zero.
    pub fn add_item(&mut self, menu_item_id: i64, quantity: u32) {
        if quantity == 0 {
            return;
        }
        self.lines
            .entry(menu_item_id)
            .and_modify(|line| line.quantity += quantity)
            .or_insert(CartLine {
                menu_item_id,
                quantity,
                note: String::new(),
            });
    }

    /// Decrement an item's quantity by 1, dropping the line at 0
    ///
    /// Removing from an absent line is a no-op, not an error.
    pub fn remove_item(&mut self, menu_item_id: i64) {
        if let Some(line) = self.lines.get_mut(&menu_item_id) {
            line.quantity -= 1;
            if line.quantity == 0 {
                self.lines.remove(&menu_item_id);
            }
        }
    }

    /// Replace the note on an existing line
    pub fn set_note(&mut self, menu_item_id: i64, note: impl Into<String>) -> OrderResult<()> {
        match self.lines.get_mut(&menu_item_id) {
            Some(line) => {
                line.note = note.into();
                Ok(())
            }
            None => Err(OrderError::NotFound(format!(
                "no cart line for menu item {menu_item_id}"
            ))),
        }
    }

    /// Running total against current catalog prices
    ///
    /// Recomputed on every call, never cached, so a catalog reload is
    /// always reflected.
    pub fn total(&self, catalog: &CatalogService) -> OrderResult<i64> {
        let mut total = 0i64;
        for line in self.lines.values() {
            let item = catalog
                .resolve(line.menu_item_id)
                .ok_or(OrderError::UnknownMenuItem(line.menu_item_id))?;
            total += item.unit_price * line.quantity as i64;
        }
        Ok(total)
    }

    /// Produce the checkout payload consumed by the admission service
    ///
    /// Sorted by menu item id so the payload is deterministic. An empty
    /// cart is rejected here, before any request is sent.
    pub fn to_checkout_payload(&self) -> OrderResult<Vec<CheckoutLine>> {
        if self.lines.is_empty() {
            return Err(OrderError::validation("orderlists", "cart is empty"));
        }
        let mut payload: Vec<CheckoutLine> = self
            .lines
            .values()
            .map(|line| CheckoutLine {
                menu_id: line.menu_item_id,
                quantity: line.quantity,
                note: line.note.clone(),
            })
            .collect();
        payload.sort_by_key(|l| l.menu_id);
        Ok(payload)
    }

    /// Destroy all lines (after successful checkout or abandonment)
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}
