//! Domain layer: pure game logic types and helpers.

pub mod actions;
pub mod cards_types;
pub mod catalogue;
pub mod dealing;
pub mod events;
pub mod legal;
pub mod player_view;
pub mod resolution;
pub mod rules;
pub mod state;
pub mod turn;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_legality;
#[cfg(test)]
mod tests_player_view;
#[cfg(test)]
mod tests_props;
#[cfg(test)]
mod tests_resolution;

// Re-exports for ergonomics
pub use actions::GameAction;
pub use cards_types::{Card, CardKind, CardRestriction, PlayerColor};
pub use dealing::{activate, activate_new, activate_with_rng};
pub use events::{GameEvent, Resolution};
pub use legal::legal_actions;
pub use player_view::{project, CardView, GameView};
pub use resolution::{frame_verdict, resolve_cops_check, resolve_frame_check, resolve_pause};
pub use state::{
    FrameCard, Game, GameId, GameStatus, LocationName, PauseReason, PlayerId, PlayerInfo,
    StartedGame, Substate,
};
pub use turn::{apply_action, apply_action_at, ActionOutcome};
