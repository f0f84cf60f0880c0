//! Order data model
//!
//! Shared between the admission/lifecycle core and API clients.

mod types;

pub use types::{
    CartLine, CheckoutLine, CreateOrderRequest, Order, OrderLine, OrderStatus, PaymentMethod,
};
