#![allow(dead_code)]

// tests/common/mod.rs
use std::time::Duration;

use backend_test_support::unique_helpers::unique_player_ids;
use scapegoat_backend::domain::{GameView, PlayerInfo};
use scapegoat_backend::ResolutionDelays;

// Logging is auto-installed for every test binary that declares `mod common;`
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Short enough to keep tests fast, long enough to observe the paused state.
pub const FAST_DELAY: Duration = Duration::from_millis(40);

pub fn fast_delays() -> ResolutionDelays {
    ResolutionDelays::uniform(FAST_DELAY)
}

pub fn players(n: usize) -> Vec<PlayerInfo> {
    unique_player_ids("player", n)
        .into_iter()
        .enumerate()
        .map(|(i, id)| PlayerInfo::new(id, format!("Player {}", i + 1)))
        .collect()
}

/// Id of the player holding the turn in `view`.
pub fn active_id(view: &GameView) -> String {
    let game = view.started().expect("view of a started game");
    game.players[game.active_player].player_info.id.clone()
}

/// Some player other than the active one.
pub fn idle_id(view: &GameView) -> String {
    let game = view.started().expect("view of a started game");
    let seat = (game.active_player + 1) % game.players.len();
    game.players[seat].player_info.id.clone()
}
