//! Core order types
//!
//! The status state machine lives here as data (`OrderStatus::successor`);
//! enforcement lives in the server's lifecycle manager.

use serde::{Deserialize, Serialize};

// ============================================================================
// Status & Payment
// ============================================================================

/// Order status state machine: NEW → PAID → DONE
///
/// DONE is terminal. An order in NEW or PAID is "live" and holds its
/// table; reaching DONE releases it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    New,
    Paid,
    Done,
}

impl OrderStatus {
    /// The only status reachable from `self` in one transition, if any
    pub fn successor(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::New => Some(OrderStatus::Paid),
            OrderStatus::Paid => Some(OrderStatus::Done),
            OrderStatus::Done => None,
        }
    }

    /// Live orders occupy their table
    pub fn is_live(self) -> bool {
        matches!(self, OrderStatus::New | OrderStatus::Paid)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::New => "NEW",
            OrderStatus::Paid => "PAID",
            OrderStatus::Done => "DONE",
        };
        f.write_str(s)
    }
}

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Qris,
    Bank,
}

// ============================================================================
// Cart Types
// ============================================================================

/// One line of a session cart
///
/// `note` is a plain string, empty when absent (never null). `quantity`
/// is at least 1; a line that would reach 0 is removed from the cart
/// instead of being kept at zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub menu_item_id: i64,
    pub quantity: u32,
    #[serde(default)]
    pub note: String,
}

/// Checkout payload line, what the admission service consumes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutLine {
    pub menu_id: i64,
    pub quantity: u32,
    #[serde(default)]
    pub note: String,
}

// ============================================================================
// Order Types
// ============================================================================

/// One priced, quantified item within an order
///
/// `unit_price_at_order_time` is snapshotted from the catalog at
/// admission; later catalog price changes never alter historical totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub menu_item_id: i64,
    /// Name snapshot for display (history views need no catalog join)
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub note: String,
    pub unit_price_at_order_time: i64,
}

impl OrderLine {
    pub fn line_total(&self) -> i64 {
        self.unit_price_at_order_time * self.quantity as i64
    }
}

/// A persisted order with its embedded lines
///
/// Created atomically with its lines by the admission service. Only
/// `status` (and `updated_at`) change afterwards; line contents,
/// customer, and table number are immutable once the order exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Server-assigned id, immutable
    pub id: String,
    pub customer: String,
    /// Table label, free string; non-numeric labels allowed
    pub table_number: String,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    /// Denormalized: always equals `Σ line.line_total()`
    pub total_price: i64,
    /// UTC millis
    pub created_at: i64,
    /// UTC millis
    pub updated_at: i64,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Recompute the total from lines (for invariant checks)
    pub fn computed_total(&self) -> i64 {
        self.lines.iter().map(OrderLine::line_total).sum()
    }

    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }
}

// ============================================================================
// Inbound contracts
// ============================================================================

/// Create-order request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub customer: String,
    pub table_number: String,
    pub payment_method: PaymentMethod,
    /// Initial status; DONE is never valid here
    #[serde(default)]
    pub status: OrderStatus,
    pub orderlists: Vec<CheckoutLine>,
}
