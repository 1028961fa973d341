//! Automated players.

mod random;
mod trait_def;

pub use random::RandomPlayer;
use serde_json::Value as JsonValue;
pub use trait_def::{AiError, AiPlayer};

/// Create an AI player from a type name and optional JSON config.
///
/// Currently supports `"random"` with an optional `seed`.
pub fn create_ai(ai_type: &str, config: Option<&JsonValue>) -> Option<Box<dyn AiPlayer>> {
    match ai_type {
        "random" => {
            let seed = config.and_then(|c| c.get("seed")).and_then(|s| s.as_u64());
            Some(Box::new(RandomPlayer::new(seed)))
        }
        _ => None,
    }
}
