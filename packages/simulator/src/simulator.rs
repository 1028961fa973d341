//! In-memory game runner.
//!
//! Plays one game to completion through the same engine entry points the
//! table actor uses, but resolves every pause immediately instead of
//! waiting on a timer.

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scapegoat_backend::ai::{create_ai, AiError, AiPlayer};
use scapegoat_backend::domain::events::ResolutionRecord;
use scapegoat_backend::domain::{
    activate_with_rng, apply_action, legal_actions, project, resolve_pause, ActionOutcome, Game,
    GameEvent, GameView, PlayerColor, PlayerId, PlayerInfo, Resolution,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::debug;

/// Games still running after this many accepted actions are abandoned.
pub const MAX_STEPS: u32 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    CopsCalled,
    FrameSuccess,
    StepCap,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub game: u32,
    pub seed: u64,
    pub players: usize,
    pub outcome: Outcome,
    pub accepted_actions: u32,
    pub frame_failures: u32,
    pub winner_player_ids: Vec<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scapegoat: Option<PlayerColor>,
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error("unknown bot type: {0}")]
    UnknownBot(String),
    #[error("engine disagreed with legal-action enumeration: {0}")]
    Rejected(String),
}

pub struct Simulator {
    game_no: u32,
    seed: u64,
    players: usize,
    bot: String,
}

impl Simulator {
    pub fn new(game_no: u32, seed: u64, players: usize, bot: impl Into<String>) -> Self {
        Self {
            game_no,
            seed,
            players,
            bot: bot.into(),
        }
    }

    pub fn simulate(&self) -> Result<GameResult, SimError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let infos: Vec<PlayerInfo> = (1..=self.players)
            .map(|i| PlayerInfo::new(format!("bot{i}"), format!("Bot {i}")))
            .collect();
        let bots = (0..self.players)
            .map(|_| {
                let config = json!({ "seed": rng.random::<u64>() });
                create_ai(&self.bot, Some(&config))
                    .ok_or_else(|| SimError::UnknownBot(self.bot.clone()))
            })
            .collect::<Result<Vec<Box<dyn AiPlayer>>, _>>()?;

        let mut game = activate_with_rng(Game::new_lobby(infos.clone()), &mut rng);
        let mut accepted = 0u32;

        while accepted < MAX_STEPS {
            if matches!(game, Game::Finished { .. }) {
                break;
            }
            if game.pause_reason().is_some() {
                game = resolve_pause(game, OffsetDateTime::now_utc());
                continue;
            }

            // Anyone with something to do may act, including out-of-turn cops calls.
            let candidates: Vec<(usize, Vec<_>)> = infos
                .iter()
                .enumerate()
                .map(|(i, info)| (i, legal_actions(&game, &info.id)))
                .filter(|(_, legal)| !legal.is_empty())
                .collect();
            let Some((seat, legal)) = candidates.choose(&mut rng) else {
                return Err(SimError::Rejected(format!(
                    "game {} has no player with a legal action",
                    self.game_no
                )));
            };

            let actor_id = &infos[*seat].id;
            let view = project(&game, actor_id);
            let action = bots[*seat].choose_action(&view, legal)?;

            match apply_action(&game, actor_id, action) {
                ActionOutcome::Accepted { game: next, .. } => {
                    debug!(
                        game = self.game_no,
                        actor_id = %actor_id,
                        action = action.name(),
                        "accepted"
                    );
                    game = next;
                    accepted += 1;
                }
                ActionOutcome::Rejected(rejection) => {
                    return Err(SimError::Rejected(format!(
                        "game {}: legal action {} by {actor_id} rejected: {rejection}",
                        self.game_no,
                        action.name()
                    )));
                }
            }
        }

        Ok(self.summarize(&game, accepted))
    }

    fn summarize(&self, game: &Game, accepted: u32) -> GameResult {
        let frame_failures = game
            .started()
            .map(|g| {
                g.events
                    .iter()
                    .filter(|e| {
                        matches!(
                            e,
                            GameEvent::Resolution(ResolutionRecord {
                                resolution: Resolution::FrameFailure { .. },
                                ..
                            })
                        )
                    })
                    .count() as u32
            })
            .unwrap_or(0);

        let (outcome, winner_player_ids, scapegoat) = match project(game, "") {
            GameView::Finished {
                game: view,
                winner_player_ids,
                scapegoat,
            } => {
                let cops = view.events.iter().any(|e| {
                    matches!(
                        e,
                        GameEvent::Resolution(ResolutionRecord {
                            resolution: Resolution::CopsCalled { .. },
                            ..
                        })
                    )
                });
                let outcome = if cops {
                    Outcome::CopsCalled
                } else {
                    Outcome::FrameSuccess
                };
                (outcome, winner_player_ids, Some(scapegoat))
            }
            _ => (Outcome::StepCap, Vec::new(), None),
        };

        GameResult {
            game: self.game_no,
            seed: self.seed,
            players: self.players,
            outcome,
            accepted_actions: accepted,
            frame_failures,
            winner_player_ids,
            scapegoat,
        }
    }
}
