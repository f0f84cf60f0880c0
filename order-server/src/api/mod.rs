//! API routing
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`menu`] - read-only catalog listing
//! - [`orders`] - order admission, lifecycle, and history

pub mod health;
pub mod menu;
pub mod orders;

use crate::core::ServerState;
use axum::Router;

/// Build the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(menu::router())
        .merge(orders::router())
        .with_state(state)
}
