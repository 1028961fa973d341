//! Random AI player - picks uniformly among legal actions.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{AiError, AiPlayer};
use crate::domain::{GameAction, GameView};

/// Baseline bot, also used by the simulator.
///
/// The RNG sits behind a `Mutex` because [`AiPlayer`] takes `&self`.
/// Passing a seed makes its choices reproducible.
pub struct RandomPlayer {
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl AiPlayer for RandomPlayer {
    fn choose_action(
        &self,
        _view: &GameView,
        legal: &[GameAction],
    ) -> Result<GameAction, AiError> {
        if legal.is_empty() {
            return Err(AiError::InvalidMove("No legal actions available".into()));
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;

        legal
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| AiError::Internal("Failed to choose random action".into()))
    }
}
