//! Order error taxonomy
//!
//! Every failure aborts before any persistence call or rolls the write
//! transaction back; no variant here leaves partial effects behind.

use super::storage::StorageError;
use shared::order::OrderStatus;
use thiserror::Error;

/// Errors from the admission service, lifecycle manager, and cart
#[derive(Debug, Error)]
pub enum OrderError {
    /// Malformed or missing input; names the offending field
    #[error("Validation failed on '{field}': {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Table already holds a live order
    #[error("Table {table_number} is already in use with status: {conflicting_status}")]
    TableConflict {
        table_number: String,
        conflicting_status: OrderStatus,
    },

    /// Cart references an id the catalog cannot resolve
    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(i64),

    /// Requested status is not reachable from the current one
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// No order with this id
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl OrderError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        OrderError::Validation {
            field,
            message: message.into(),
        }
    }
}

pub type OrderResult<T> = Result<T, OrderError>;
