//! Order admission service
//!
//! The sole entry point for turning a checkout payload into a persisted
//! order. Validation and catalog resolution happen before the write
//! transaction; the occupancy check, order persistence, and occupancy
//! registration happen inside a single transaction, so two checkouts for
//! the same table can never both observe it as free.

use super::error::{OrderError, OrderResult};
use super::storage::{OrderStorage, StorageError};
use crate::catalog::CatalogService;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, MAX_TABLE_LEN};
use shared::order::{CreateOrderRequest, Order, OrderLine, OrderStatus};
use shared::util::now_millis;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Admission service: validates and persists new orders
#[derive(Clone)]
pub struct AdmissionService {
    storage: OrderStorage,
    catalog: Arc<CatalogService>,
}

impl AdmissionService {
    pub fn new(storage: OrderStorage, catalog: Arc<CatalogService>) -> Self {
        Self { storage, catalog }
    }

    /// Admit a checkout request, creating the order and its lines
    ///
    /// On success exactly one order exists and its table is registered in
    /// the occupancy index. On any failure nothing is persisted.
    pub fn admit(&self, req: CreateOrderRequest) -> OrderResult<Order> {
        validate(&req)?;

        // Resolve every line before touching storage. Any unresolvable id
        // fails the whole request; prices and names are snapshotted here.
        let mut lines = Vec::with_capacity(req.orderlists.len());
        for checkout in &req.orderlists {
            let item = self
                .catalog
                .resolve(checkout.menu_id)
                .ok_or(OrderError::UnknownMenuItem(checkout.menu_id))?;
            lines.push(OrderLine {
                menu_item_id: item.id,
                name: item.name,
                quantity: checkout.quantity,
                note: checkout.note.clone(),
                unit_price_at_order_time: item.unit_price,
            });
        }
        let total_price: i64 = lines.iter().map(OrderLine::line_total).sum();

        let now = now_millis();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            customer: req.customer.trim().to_string(),
            table_number: req.table_number.trim().to_string(),
            payment_method: req.payment_method,
            status: req.status,
            total_price,
            created_at: now,
            updated_at: now,
            lines,
        };

        // Critical section: occupancy check and registration must see the
        // same state the order persistence commits with. Early returns
        // drop the transaction, which aborts it.
        let txn = self.storage.begin_write()?;
        if let Some(occupant) = self.storage.occupant_txn(&txn, &order.table_number)? {
            return Err(OrderError::TableConflict {
                table_number: order.table_number,
                conflicting_status: occupant.status,
            });
        }
        self.storage.store_order_txn(&txn, &order)?;
        self.storage
            .register_table_txn(&txn, &order.table_number, &order.id)?;
        txn.commit().map_err(StorageError::from)?;

        info!(
            order_id = %order.id,
            table_number = %order.table_number,
            status = %order.status,
            total_price = order.total_price,
            line_count = order.lines.len(),
            "Order admitted"
        );
        Ok(order)
    }
}

/// Input contract checks; all violations abort with no effects
fn validate(req: &CreateOrderRequest) -> OrderResult<()> {
    if req.customer.trim().is_empty() {
        return Err(OrderError::validation("customer", "must not be empty"));
    }
    // Limits count characters, not bytes; multi-byte names are fine
    let customer_chars = req.customer.chars().count();
    if customer_chars > MAX_NAME_LEN {
        return Err(OrderError::validation(
            "customer",
            format!("is too long ({customer_chars} chars, max {MAX_NAME_LEN})"),
        ));
    }
    if req.table_number.trim().is_empty() {
        return Err(OrderError::validation("table_number", "must not be empty"));
    }
    let table_chars = req.table_number.chars().count();
    if table_chars > MAX_TABLE_LEN {
        return Err(OrderError::validation(
            "table_number",
            format!("is too long ({table_chars} chars, max {MAX_TABLE_LEN})"),
        ));
    }
    // An order cannot be created already completed
    if req.status == OrderStatus::Done {
        return Err(OrderError::validation(
            "status",
            "initial status must be NEW or PAID",
        ));
    }
    if req.orderlists.is_empty() {
        return Err(OrderError::validation("orderlists", "must not be empty"));
    }
    for line in &req.orderlists {
        if line.quantity == 0 {
            return Err(OrderError::validation(
                "orderlists",
                format!("quantity for menu item {} must be at least 1", line.menu_id),
            ));
        }
        let note_chars = line.note.chars().count();
        if note_chars > MAX_NOTE_LEN {
            return Err(OrderError::validation(
                "orderlists",
                format!(
                    "note for menu item {} is too long ({note_chars} chars, max {MAX_NOTE_LEN})",
                    line.menu_id
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogService;
    use shared::order::{CheckoutLine, PaymentMethod};

    fn service() -> AdmissionService {
        let storage = OrderStorage::open_in_memory().unwrap();
        let catalog = Arc::new(CatalogService::with_items(CatalogService::default_menu()));
        AdmissionService::new(storage, catalog)
    }

    fn request(table: &str) -> CreateOrderRequest {
        CreateOrderRequest {
            customer: "Siti".to_string(),
            table_number: table.to_string(),
            payment_method: PaymentMethod::Qris,
            status: OrderStatus::New,
            orderlists: vec![CheckoutLine {
                menu_id: 5,
                quantity: 2,
                note: String::new(),
            }],
        }
    }

    #[test]
    fn admit_snapshots_prices_into_total() {
        let svc = service();
        let unit_price = svc.catalog.resolve(5).unwrap().unit_price;
        assert_eq!(unit_price, 25_000);

        let order = svc.admit(request("12")).unwrap();
        assert_eq!(order.total_price, 50_000);
        assert_eq!(order.computed_total(), order.total_price);
        assert_eq!(order.lines[0].unit_price_at_order_time, unit_price);
        assert_eq!(order.status, OrderStatus::New);
    }

    #[test]
    fn admit_registers_table_occupancy() {
        let svc = service();
        let order = svc.admit(request("12")).unwrap();

        let occupant = svc.storage.occupant_of("12").unwrap().unwrap();
        assert_eq!(occupant.id, order.id);
    }

    #[test]
    fn occupied_table_is_rejected_with_conflicting_status() {
        let svc = service();
        svc.admit(request("12")).unwrap();

        let err = svc.admit(request("12")).unwrap_err();
        match err {
            OrderError::TableConflict {
                table_number,
                conflicting_status,
            } => {
                assert_eq!(table_number, "12");
                assert_eq!(conflicting_status, OrderStatus::New);
            }
            other => panic!("expected TableConflict, got {other:?}"),
        }

        // No second order was created
        assert_eq!(svc.storage.all_orders().unwrap().len(), 1);
    }

    #[test]
    fn different_tables_admit_independently() {
        let svc = service();
        svc.admit(request("12")).unwrap();
        svc.admit(request("Terrace A")).unwrap();
        assert_eq!(svc.storage.all_orders().unwrap().len(), 2);
    }

    #[test]
    fn empty_orderlists_is_a_validation_error() {
        let svc = service();
        let mut req = request("12");
        req.orderlists.clear();

        assert!(matches!(
            svc.admit(req),
            Err(OrderError::Validation { field: "orderlists", .. })
        ));
        assert!(svc.storage.all_orders().unwrap().is_empty());
    }

    #[test]
    fn done_is_not_a_valid_initial_status() {
        let svc = service();
        let mut req = request("12");
        req.status = OrderStatus::Done;

        assert!(matches!(
            svc.admit(req),
            Err(OrderError::Validation { field: "status", .. })
        ));
    }

    #[test]
    fn blank_customer_and_table_are_rejected() {
        let svc = service();

        let mut req = request("12");
        req.customer = "  ".to_string();
        assert!(matches!(
            svc.admit(req),
            Err(OrderError::Validation { field: "customer", .. })
        ));

        let mut req = request("12");
        req.table_number = String::new();
        assert!(matches!(
            svc.admit(req),
            Err(OrderError::Validation { field: "table_number", .. })
        ));
    }

    #[test]
    fn length_limits_count_characters_not_bytes() {
        let svc = service();

        // 150 chars but 300 bytes in UTF-8; within the character limit
        let mut req = request("12");
        req.customer = "é".repeat(150);
        svc.admit(req).unwrap();

        let mut req = request("13");
        req.customer = "é".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            svc.admit(req),
            Err(OrderError::Validation { field: "customer", .. })
        ));

        let mut req = request("13");
        req.orderlists[0].note = "ñ".repeat(MAX_NOTE_LEN + 1);
        assert!(matches!(
            svc.admit(req),
            Err(OrderError::Validation { field: "orderlists", .. })
        ));
    }

    #[test]
    fn zero_quantity_line_is_rejected() {
        let svc = service();
        let mut req = request("12");
        req.orderlists[0].quantity = 0;

        assert!(matches!(
            svc.admit(req),
            Err(OrderError::Validation { field: "orderlists", .. })
        ));
    }

    #[test]
    fn unknown_menu_item_fails_whole_request() {
        let svc = service();
        let mut req = request("12");
        req.orderlists.push(CheckoutLine {
            menu_id: 9999,
            quantity: 1,
            note: String::new(),
        });

        assert!(matches!(
            svc.admit(req),
            Err(OrderError::UnknownMenuItem(9999))
        ));
        // No partial order
        assert!(svc.storage.all_orders().unwrap().is_empty());
    }

    #[test]
    fn paid_initial_status_occupies_table_too() {
        let svc = service();
        let mut req = request("7");
        req.status = OrderStatus::Paid;
        svc.admit(req).unwrap();

        let err = svc.admit(request("7")).unwrap_err();
        assert!(matches!(
            err,
            OrderError::TableConflict { conflicting_status: OrderStatus::Paid, .. }
        ));
    }
}
