//! Shared types for the ordering core
//!
//! Data model and wire types used by both the server and its clients:
//! menu catalog entries, order/cart types, the API response envelope,
//! and small time utilities. No business logic lives here.

pub mod models;
pub mod order;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
