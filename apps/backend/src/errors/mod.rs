//! Error handling for the Scapegoat backend.

pub mod domain;
pub mod error_code;

pub use domain::Rejection;
pub use error_code::ErrorCode;
