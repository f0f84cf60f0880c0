//! Order Server
//!
//! Order admission and lifecycle core for a point-of-sale deployment.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`api`] | HTTP routing and handlers |
//! | [`catalog`] | In-memory menu catalog |
//! | [`core`] | Configuration, state, server startup |
//! | [`orders`] | Admission, lifecycle, queries, storage |
//! | [`utils`] | Error mapping, logging, validation limits |

pub mod api;
pub mod catalog;
pub mod core;
pub mod orders;
pub mod utils;

pub use core::{Config, Server, ServerState, setup_environment};
