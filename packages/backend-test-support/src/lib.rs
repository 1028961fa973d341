//! Backend test support utilities
//!
//! Shared by the backend's integration test binaries: one logging bootstrap
//! and helpers for unique test identifiers.

pub mod logging;
pub mod unique_helpers;
