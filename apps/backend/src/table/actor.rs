use actix::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::config::timing::ResolutionDelays;
use crate::domain::rules::PLAYER_COUNT_RANGE;
use crate::domain::{
    activate_with_rng, apply_action, project, resolve_pause, ActionOutcome, Game, GameAction,
    GameId, GameStatus, GameView, PauseReason, PlayerId, PlayerInfo,
};
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Pushed to subscribers after every commit, projected for that subscriber.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct ViewUpdate {
    pub revision: u64,
    pub view: GameView,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<GameView, AppError>")]
pub struct Join {
    pub player: PlayerInfo,
}

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Result<GameId, AppError>")]
pub struct Start;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<GameView, AppError>")]
pub struct Act {
    pub actor_id: PlayerId,
    pub action: GameAction,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<GameId, AppError>")]
pub struct Remake {
    pub requester_id: PlayerId,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "GameView")]
pub struct ViewFor {
    pub viewer_id: PlayerId,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Subscribe {
    pub viewer_id: PlayerId,
    pub recipient: Recipient<ViewUpdate>,
}

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "TableStatus")]
pub struct Status;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStatus {
    pub code: String,
    pub game_id: GameId,
    pub status: GameStatus,
    pub revision: u64,
    pub player_count: usize,
}

/// Identifies the paused state a resolution timer was armed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseTicket {
    pub game_id: GameId,
    pub revision: u64,
    pub reason: PauseReason,
}

impl PauseTicket {
    /// A timer may only resolve the exact state it was armed for.
    pub fn matches(&self, game: &Game, revision: u64) -> bool {
        self.game_id == game.id()
            && self.revision == revision
            && game.pause_reason() == Some(self.reason)
    }
}

/// One game cell. Actix delivers one message at a time, which serializes
/// every mutation of `game`.
pub struct GameTable {
    code: String,
    game: Game,
    revision: u64,
    delays: ResolutionDelays,
    rng: ChaCha8Rng,
    subscribers: Vec<(PlayerId, Recipient<ViewUpdate>)>,
}

impl GameTable {
    pub fn new(code: impl Into<String>, delays: ResolutionDelays) -> Self {
        Self::with_rng(code, delays, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Deterministic seating and deals, for tests and replays.
    pub fn seeded(code: impl Into<String>, delays: ResolutionDelays, seed: u64) -> Self {
        Self::with_rng(code, delays, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(code: impl Into<String>, delays: ResolutionDelays, rng: ChaCha8Rng) -> Self {
        Self {
            code: code.into(),
            game: Game::new_lobby(Vec::new()),
            revision: 0,
            delays,
            rng,
            subscribers: Vec::new(),
        }
    }

    fn commit(&mut self, game: Game, ctx: &mut Context<Self>) {
        self.game = game;
        self.revision += 1;
        self.broadcast();
        if let Some(reason) = self.game.pause_reason() {
            self.arm_timer(reason, ctx);
        }
    }

    fn arm_timer(&self, reason: PauseReason, ctx: &mut Context<Self>) {
        let ticket = PauseTicket {
            game_id: self.game.id(),
            revision: self.revision,
            reason,
        };
        let delay = match reason {
            PauseReason::CopsCheck => self.delays.cops_check,
            PauseReason::FrameCheck => self.delays.frame_check,
        };
        info!(
            code = %self.code,
            game_id = %ticket.game_id,
            revision = ticket.revision,
            reason = ?reason,
            delay_ms = delay.as_millis() as u64,
            "Game paused, resolution scheduled"
        );
        ctx.run_later(delay, move |actor, ctx| actor.fire(ticket, ctx));
    }

    fn fire(&mut self, ticket: PauseTicket, ctx: &mut Context<Self>) {
        if !ticket.matches(&self.game, self.revision) {
            warn!(
                code = %self.code,
                game_id = %ticket.game_id,
                ticket_revision = ticket.revision,
                current_revision = self.revision,
                "Stale resolution timer dropped"
            );
            return;
        }

        let resolved = resolve_pause(self.game.clone(), OffsetDateTime::now_utc());
        info!(
            code = %self.code,
            game_id = %resolved.id(),
            reason = ?ticket.reason,
            status = %resolved.status(),
            "Pause resolved"
        );
        self.commit(resolved, ctx);
    }

    fn broadcast(&mut self) {
        self.subscribers.retain(|(_, recipient)| recipient.connected());
        for (viewer_id, recipient) in &self.subscribers {
            recipient.do_send(ViewUpdate {
                revision: self.revision,
                view: project(&self.game, viewer_id),
            });
        }
    }

    fn require_status(&self, expected: GameStatus, code: ErrorCode) -> Result<(), AppError> {
        if self.game.status() == expected {
            Ok(())
        } else {
            Err(AppError::conflict(
                code,
                format!("game {} is {}", self.game.id(), self.game.status()),
            ))
        }
    }

    fn require_member(&self, player_id: &str) -> Result<(), AppError> {
        if self.game.is_member(player_id) {
            Ok(())
        } else {
            Err(AppError::not_in_game(format!(
                "player {player_id} is not in game {}",
                self.game.id()
            )))
        }
    }
}

impl Actor for GameTable {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!(code = %self.code, game_id = %self.game.id(), "Table opened");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(
            code = %self.code,
            game_id = %self.game.id(),
            revision = self.revision,
            "Table closed"
        );
    }
}

impl Handler<Join> for GameTable {
    type Result = Result<GameView, AppError>;

    fn handle(&mut self, msg: Join, ctx: &mut Self::Context) -> Self::Result {
        self.require_status(
            GameStatus::WaitingForPlayers,
            ErrorCode::GameNotWaitingForPlayers,
        )?;
        if self.game.is_member(&msg.player.id) {
            return Ok(project(&self.game, &msg.player.id));
        }
        if self.game.player_infos().len() >= *PLAYER_COUNT_RANGE.end() {
            return Err(AppError::conflict(
                ErrorCode::GameFull,
                format!(
                    "game {} already has {} players",
                    self.game.id(),
                    PLAYER_COUNT_RANGE.end()
                ),
            ));
        }

        let mut game = self.game.clone();
        if let Game::WaitingForPlayers(lobby) = &mut game {
            lobby.player_infos.push(msg.player.clone());
        }
        info!(
            code = %self.code,
            game_id = %game.id(),
            player_id = %msg.player.id,
            players = game.player_infos().len(),
            "Player joined"
        );
        self.commit(game, ctx);
        Ok(project(&self.game, &msg.player.id))
    }
}

impl Handler<Start> for GameTable {
    type Result = Result<GameId, AppError>;

    fn handle(&mut self, _msg: Start, ctx: &mut Self::Context) -> Self::Result {
        self.require_status(
            GameStatus::WaitingForPlayers,
            ErrorCode::GameNotWaitingForPlayers,
        )?;
        let players = self.game.player_infos().len();
        if players < *PLAYER_COUNT_RANGE.start() {
            return Err(AppError::conflict(
                ErrorCode::GameNotEnoughPlayersToStart,
                format!(
                    "game {} has {players} players, needs {}",
                    self.game.id(),
                    PLAYER_COUNT_RANGE.start()
                ),
            ));
        }

        let game = activate_with_rng(self.game.clone(), &mut self.rng);
        info!(code = %self.code, game_id = %game.id(), players, "Game started");
        let id = game.id();
        self.commit(game, ctx);
        Ok(id)
    }
}

impl Handler<Act> for GameTable {
    type Result = Result<GameView, AppError>;

    fn handle(&mut self, msg: Act, ctx: &mut Self::Context) -> Self::Result {
        self.require_member(&msg.actor_id)?;
        self.require_status(GameStatus::Ongoing, ErrorCode::GameNotInProgress)?;

        match apply_action(&self.game, &msg.actor_id, msg.action) {
            ActionOutcome::Accepted { game, .. } => {
                info!(
                    code = %self.code,
                    game_id = %game.id(),
                    actor_id = %msg.actor_id,
                    action = msg.action.name(),
                    status = %game.status(),
                    "Action accepted"
                );
                self.commit(game, ctx);
                Ok(project(&self.game, &msg.actor_id))
            }
            ActionOutcome::Rejected(rejection) => {
                warn!(
                    code = %self.code,
                    game_id = %self.game.id(),
                    actor_id = %msg.actor_id,
                    action = msg.action.name(),
                    error_code = %rejection.code,
                    "Action rejected"
                );
                Err(rejection.into())
            }
        }
    }
}

impl Handler<Remake> for GameTable {
    type Result = Result<GameId, AppError>;

    fn handle(&mut self, msg: Remake, ctx: &mut Self::Context) -> Self::Result {
        self.require_member(&msg.requester_id)?;
        self.require_status(GameStatus::Finished, ErrorCode::GameNotFinished)?;

        let previous = self.game.id();
        let lobby = Game::new_lobby(self.game.player_infos().to_vec());
        let game = activate_with_rng(lobby, &mut self.rng);
        info!(
            code = %self.code,
            previous_game_id = %previous,
            game_id = %game.id(),
            requester_id = %msg.requester_id,
            "Game remade"
        );
        let id = game.id();
        self.commit(game, ctx);
        Ok(id)
    }
}

impl Handler<ViewFor> for GameTable {
    type Result = MessageResult<ViewFor>;

    fn handle(&mut self, msg: ViewFor, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(project(&self.game, &msg.viewer_id))
    }
}

impl Handler<Subscribe> for GameTable {
    type Result = ();

    fn handle(&mut self, msg: Subscribe, _ctx: &mut Self::Context) -> Self::Result {
        msg.recipient.do_send(ViewUpdate {
            revision: self.revision,
            view: project(&self.game, &msg.viewer_id),
        });
        self.subscribers.push((msg.viewer_id, msg.recipient));
    }
}

impl Handler<Status> for GameTable {
    type Result = MessageResult<Status>;

    fn handle(&mut self, _msg: Status, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(TableStatus {
            code: self.code.clone(),
            game_id: self.game.id(),
            status: self.game.status(),
            revision: self.revision,
            player_count: self.game.player_infos().len(),
        })
    }
}
