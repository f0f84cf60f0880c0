//! Order admission and lifecycle core
//!
//! - **cart**: per-session selection prior to checkout
//! - **admission**: validated, transactional order creation under the
//!   table-occupancy invariant
//! - **lifecycle**: the NEW → PAID → DONE state machine
//! - **query**: read-only listing for history views
//! - **storage**: redb persistence (orders + occupancy index)
//!
//! # Data Flow
//!
//! ```text
//! Cart → AdmissionService → OrderStorage (one write txn:
//!            check occupancy, persist order, register table)
//!                  ↓
//!        LifecycleManager → status transition
//!            (DONE releases the table in the same txn)
//!                  ↓
//!             OrderQuery → history views
//! ```

pub mod admission;
pub mod cart;
pub mod error;
pub mod lifecycle;
pub mod query;
pub mod storage;

// Re-exports
pub use admission::AdmissionService;
pub use cart::Cart;
pub use error::{OrderError, OrderResult};
pub use lifecycle::LifecycleManager;
pub use query::{OrderCounts, OrderQuery};
pub use storage::{OrderStorage, StorageError, StorageResult};
