//! Structured game-rule rejection returned by the turn engine.
//!
//! A rejection is an ordinary outcome, never a panic. The table layer wraps
//! it into `AppError::InvalidAction` before it reaches a client.

use serde::Serialize;
use thiserror::Error;

use crate::errors::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{code}: {detail}")]
pub struct Rejection {
    #[serde(serialize_with = "serialize_code")]
    pub code: ErrorCode,
    pub detail: String,
}

impl Rejection {
    pub fn new(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }
}

fn serialize_code<S: serde::Serializer>(code: &ErrorCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(code.as_str())
}
