//! Order query layer
//!
//! Read-only pass-through for history views. Not part of the hard core;
//! consumes the same entities the admission and lifecycle paths write.

use super::error::{OrderError, OrderResult};
use super::storage::OrderStorage;
use serde::Serialize;
use shared::order::{Order, OrderStatus};

/// Per-status order counts for the history dashboard
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct OrderCounts {
    pub new: u64,
    pub paid: u64,
    pub done: u64,
}

/// Read-only order queries
#[derive(Clone)]
pub struct OrderQuery {
    storage: OrderStorage,
}

impl OrderQuery {
    pub fn new(storage: OrderStorage) -> Self {
        Self { storage }
    }

    /// List orders, optionally filtered by status, newest first
    pub fn list(&self, status: Option<OrderStatus>) -> OrderResult<Vec<Order>> {
        let mut orders = self.storage.all_orders()?;
        if let Some(status) = status {
            orders.retain(|o| o.status == status);
        }
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Fetch a single order by id
    pub fn get(&self, order_id: &str) -> OrderResult<Order> {
        self.storage
            .get_order(order_id)?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))
    }

    /// Count orders per status
    pub fn counts(&self) -> OrderResult<OrderCounts> {
        let mut counts = OrderCounts::default();
        for order in self.storage.all_orders()? {
            match order.status {
                OrderStatus::New => counts.new += 1,
                OrderStatus::Paid => counts.paid += 1,
                OrderStatus::Done => counts.done += 1,
            }
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogService;
    use crate::orders::{AdmissionService, LifecycleManager};
    use shared::order::{CheckoutLine, CreateOrderRequest, PaymentMethod};
    use std::sync::Arc;

    fn setup() -> (AdmissionService, LifecycleManager, OrderQuery) {
        let storage = OrderStorage::open_in_memory().unwrap();
        let catalog = Arc::new(CatalogService::with_items(CatalogService::default_menu()));
        (
            AdmissionService::new(storage.clone(), catalog),
            LifecycleManager::new(storage.clone()),
            OrderQuery::new(storage),
        )
    }

    fn admit(svc: &AdmissionService, table: &str) -> Order {
        svc.admit(CreateOrderRequest {
            customer: "Dewi".to_string(),
            table_number: table.to_string(),
            payment_method: PaymentMethod::Bank,
            status: OrderStatus::New,
            orderlists: vec![CheckoutLine {
                menu_id: 2,
                quantity: 1,
                note: String::new(),
            }],
        })
        .unwrap()
    }

    #[test]
    fn list_filters_by_status() {
        let (admission, lifecycle, query) = setup();
        let a = admit(&admission, "1");
        let _b = admit(&admission, "2");
        lifecycle.transition(&a.id, OrderStatus::Paid).unwrap();

        assert_eq!(query.list(None).unwrap().len(), 2);
        let paid = query.list(Some(OrderStatus::Paid)).unwrap();
        assert_eq!(paid.len(), 1);
        assert_eq!(paid[0].id, a.id);
        assert!(query.list(Some(OrderStatus::Done)).unwrap().is_empty());
    }

    #[test]
    fn get_returns_not_found_for_unknown_id() {
        let (_, _, query) = setup();
        assert!(matches!(query.get("missing"), Err(OrderError::NotFound(_))));
    }

    #[test]
    fn counts_track_transitions() {
        let (admission, lifecycle, query) = setup();
        let a = admit(&admission, "1");
        admit(&admission, "2");
        lifecycle.transition(&a.id, OrderStatus::Paid).unwrap();
        lifecycle.transition(&a.id, OrderStatus::Done).unwrap();

        let counts = query.counts().unwrap();
        assert_eq!(counts.new, 1);
        assert_eq!(counts.paid, 0);
        assert_eq!(counts.done, 1);
    }
}
