//! Backend test support utilities
//!
//! Shared by the backend's integration test binaries: one logging initialiser
//! and helpers for generating unique, collision-free test data.

pub mod logging;
pub mod unique_helpers;
