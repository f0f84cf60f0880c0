//! Input validation limits
//!
//! Centralized text length constants for the admission input contract.
//! redb stores JSON blobs with no built-in length enforcement, so limits
//! are applied at validation time.

/// Customer names
pub const MAX_NAME_LEN: usize = 200;

/// Table labels (free strings, non-numeric labels allowed)
pub const MAX_TABLE_LEN: usize = 50;

/// Per-line notes
pub const MAX_NOTE_LEN: usize = 500;
