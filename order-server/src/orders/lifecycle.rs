//! Order lifecycle manager
//!
//! Applies status transitions under the NEW → PAID → DONE state machine
//! and keeps the occupancy index consistent with it. Each transition runs
//! in one write transaction, so a concurrent transition on the same order
//! is validated against the committed status, never a stale read.

use super::error::{OrderError, OrderResult};
use super::storage::{OrderStorage, StorageError};
use shared::order::{Order, OrderStatus};
use shared::util::now_millis;
use tracing::{debug, info};

/// Lifecycle manager, the only mutator of existing orders
#[derive(Clone)]
pub struct LifecycleManager {
    storage: OrderStorage,
}

impl LifecycleManager {
    pub fn new(storage: OrderStorage) -> Self {
        Self { storage }
    }

    /// Transition an order to `new_status`
    ///
    /// Equal status is a success no-op. Otherwise only the immediate
    /// successor is accepted: NEW → DONE does not skip PAID, and DONE is
    /// terminal. Reaching DONE releases the order's table in the same
    /// transaction.
    pub fn transition(&self, order_id: &str, new_status: OrderStatus) -> OrderResult<Order> {
        let txn = self.storage.begin_write()?;

        let mut order = self
            .storage
            .get_order_txn(&txn, order_id)?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        if order.status == new_status {
            debug!(order_id, status = %new_status, "Transition is a no-op");
            return Ok(order);
        }
        if order.status.successor() != Some(new_status) {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: new_status,
            });
        }

        let from = order.status;
        order.status = new_status;
        order.updated_at = now_millis();
        self.storage.store_order_txn(&txn, &order)?;

        if new_status == OrderStatus::Done {
            self.storage.release_table_txn(&txn, &order.table_number)?;
        }
        txn.commit().map_err(StorageError::from)?;

        info!(
            order_id,
            table_number = %order.table_number,
            from = %from,
            to = %new_status,
            "Order transitioned"
        );
        Ok(order)
    }
}
