//! Test-only builders and shortcuts for domain unit tests.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use time::macros::datetime;
use time::OffsetDateTime;

use crate::domain::actions::GameAction;
use crate::domain::dealing::activate_with_rng;
use crate::domain::state::{Game, LocationName, PlayerInfo, Seat, StartedGame};
use crate::domain::turn::{apply_action_at, ActionOutcome};
use crate::domain::{Card, CardRestriction, PlayerColor};
use crate::errors::ErrorCode;

pub const T0: OffsetDateTime = datetime!(2024-05-01 12:00 UTC);

/// Lobby members "p1".."pN".
pub fn infos(n: usize) -> Vec<PlayerInfo> {
    (1..=n)
        .map(|i| PlayerInfo::new(format!("p{i}"), format!("Player {i}")))
        .collect()
}

/// A freshly activated game, deterministic for a given seed.
pub fn seeded_game(n: usize, seed: u64) -> Game {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    activate_with_rng(Game::new_lobby(infos(n)), &mut rng)
}

pub fn started(game: &Game) -> &StartedGame {
    game.started().expect("game has started")
}

pub fn started_mut(game: &mut Game) -> &mut StartedGame {
    match game {
        Game::Ongoing(g)
        | Game::PausedForCopsCheck { game: g, .. }
        | Game::PausedForFrameCheck { game: g, .. }
        | Game::Finished { game: g, .. } => g,
        Game::WaitingForPlayers(_) => panic!("game has not started"),
    }
}

/// Player id sitting at `seat`.
pub fn id_at(game: &Game, seat: Seat) -> String {
    started(game).players[seat].info.id.clone()
}

pub fn active_id(game: &Game) -> String {
    id_at(game, started(game).active_player)
}

/// Apply and unwrap an accepted action.
pub fn accept(game: &Game, actor: &str, action: GameAction) -> Game {
    match apply_action_at(game, actor, action, T0) {
        ActionOutcome::Accepted { game, .. } => game,
        ActionOutcome::Rejected(r) => panic!("{actor} {action:?} rejected: {r}"),
    }
}

/// Apply an action expected to be rejected and return its code.
pub fn reject_code(game: &Game, actor: &str, action: GameAction) -> ErrorCode {
    match apply_action_at(game, actor, action, T0) {
        ActionOutcome::Rejected(r) => r.code,
        ActionOutcome::Accepted { .. } => panic!("{actor} {action:?} unexpectedly accepted"),
    }
}

pub fn place(game: &mut Game, seat: Seat, location: LocationName) {
    started_mut(game).players[seat].location = location;
}

pub fn set_hand(game: &mut Game, seat: Seat, hand: Vec<Card>) {
    started_mut(game).players[seat].hand = hand;
}

/// Make the player at `seat` the Scapegoat, keeping suspects consistent.
pub fn make_scapegoat(game: &mut Game, seat: Seat) {
    let g = started_mut(game);
    let color = g.players[seat].color;
    let other = g
        .players
        .iter()
        .map(|p| p.color)
        .find(|&c| c != color)
        .expect("at least two players");
    g.scapegoat = color;
    for (s, p) in g.players.iter_mut().enumerate() {
        p.suspect = if s == seat { other } else { color };
    }
}

/// Move both tokens out of the pool: `holder` gets `tokens`, the rest goes
/// to `other`. Renames PREPARE to FRAME/STEAL like the real engine does.
pub fn drain_pool(game: &mut Game, holder: Seat, tokens: u8, other: Seat) {
    let g = started_mut(game);
    g.preparation_token_pool = 0;
    for p in g.players.iter_mut() {
        p.preparation_tokens = 0;
        if p.location == LocationName::Prepare {
            p.location = LocationName::FrameSteal;
        }
    }
    g.players[holder].preparation_tokens = tokens;
    g.players[other].preparation_tokens += 2 - tokens;
    if let Some(l) = g.location_mut(LocationName::Prepare) {
        l.name = LocationName::FrameSteal;
    }
}

pub fn single(color: PlayerColor) -> Card {
    Card::single(color, CardRestriction::Minimum(3))
}

pub fn grey() -> Card {
    Card::neutral(CardRestriction::ExactSingle(3))
}
