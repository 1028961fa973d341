use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::events::GameEvent;
use crate::domain::rules::{PREPARATION_TOKENS, STASH_SIZE};
use crate::domain::{Card, PlayerColor};

/// Session-scoped player identity, bound by the transport layer.
pub type PlayerId = String;
/// Index into `StartedGame::players`.
pub type Seat = usize;

/// Identity of one game generation. A remake always gets a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub Uuid);

impl GameId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Human player, not tied to a specific game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub nickname: String,
}

impl PlayerInfo {
    pub fn new(id: impl Into<PlayerId>, nickname: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nickname: nickname.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationName {
    #[serde(rename = "PREPARE")]
    Prepare,
    /// PREPARE after both preparation tokens have been claimed.
    #[serde(rename = "FRAME/STEAL")]
    FrameSteal,
    #[serde(rename = "TRADE")]
    Trade,
    #[serde(rename = "SPY")]
    Spy,
    #[serde(rename = "STASH")]
    Stash,
    #[serde(rename = "COPS")]
    Cops,
}

impl LocationName {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LocationName::Prepare => "PREPARE",
            LocationName::FrameSteal => "FRAME/STEAL",
            LocationName::Trade => "TRADE",
            LocationName::Spy => "SPY",
            LocationName::Stash => "STASH",
            LocationName::Cops => "COPS",
        }
    }

    pub const fn user_facing_name(&self) -> &'static str {
        match self {
            LocationName::Prepare => "Prepare to Frame",
            LocationName::FrameSteal => "Frame / Steal",
            LocationName::Trade => "Trade",
            LocationName::Spy => "Spy",
            LocationName::Stash => "Stash",
            LocationName::Cops => "Go to the Cops",
        }
    }
}

impl fmt::Display for LocationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a location holds on the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Area {
    /// A single face-up evidence card.
    Evidence { card: Card },
    /// A face-up card over a row of hidden slots. A slot is `None` only
    /// between STASH_CHOOSE_CARD and STASH_RETURN_CARD.
    Stash {
        card: Card,
        hidden: [Option<Card>; STASH_SIZE],
    },
    Cops,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub name: LocationName,
    pub(crate) area: Area,
}

impl Location {
    pub(crate) fn evidence(name: LocationName, card: Card) -> Self {
        Self {
            name,
            area: Area::Evidence { card },
        }
    }

    /// The public card, if this location has one.
    pub fn face_up_card(&self) -> Option<Card> {
        match &self.area {
            Area::Evidence { card } | Area::Stash { card, .. } => Some(*card),
            Area::Cops => None,
        }
    }

    pub(crate) fn face_up_card_mut(&mut self) -> Option<&mut Card> {
        match &mut self.area {
            Area::Evidence { card } | Area::Stash { card, .. } => Some(card),
            Area::Cops => None,
        }
    }

    /// Number of occupied hidden stash slots (zero for non-stash locations).
    pub fn hidden_card_count(&self) -> usize {
        match &self.area {
            Area::Stash { hidden, .. } => hidden.iter().flatten().count(),
            _ => 0,
        }
    }

    /// Total cards physically on this location.
    pub fn card_count(&self) -> usize {
        usize::from(self.face_up_card().is_some()) + self.hidden_card_count()
    }
}

/// A seated player for the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub info: PlayerInfo,
    pub color: PlayerColor,
    /// Fixed belief about the Scapegoat's color. Private to the player.
    pub(crate) suspect: PlayerColor,
    pub preparation_tokens: u8,
    pub(crate) hand: Vec<Card>,
    pub location: LocationName,
}

impl Player {
    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn hand_len(&self) -> usize {
        self.hand.len()
    }
}

/// One card committed to a frame attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameCard {
    pub player_id: PlayerId,
    pub player_card_index: usize,
}

/// Expected-next-action pointer; also gates which action is legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "expectedAction",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Substate {
    GoToLocation,
    TradeChoosePlayer,
    TradeChooseCard {
        other_player_id: PlayerId,
        main_player_card_index: Option<usize>,
        other_player_card_index: Option<usize>,
    },
    SpyOnPlayer,
    SpyOnPlayerConfirm {
        other_player_id: PlayerId,
    },
    StashChooseCard,
    StashReturnCard {
        stash_card_index: usize,
    },
    SwapEvidence {
        location: LocationName,
    },
    FrameChooseCard {
        cards: Vec<FrameCard>,
    },
    StealChoosePlayer,
}

impl Substate {
    pub const fn expected_action(&self) -> &'static str {
        match self {
            Substate::GoToLocation => "GO_TO_LOCATION",
            Substate::TradeChoosePlayer => "TRADE_CHOOSE_PLAYER",
            Substate::TradeChooseCard { .. } => "TRADE_CHOOSE_CARD",
            Substate::SpyOnPlayer => "SPY_ON_PLAYER",
            Substate::SpyOnPlayerConfirm { .. } => "SPY_ON_PLAYER_CONFIRM",
            Substate::StashChooseCard => "STASH_CHOOSE_CARD",
            Substate::StashReturnCard { .. } => "STASH_RETURN_CARD",
            Substate::SwapEvidence { .. } => "SWAP_EVIDENCE",
            Substate::FrameChooseCard { .. } => "FRAME_CHOOSE_CARD",
            Substate::StealChoosePlayer => "STEAL_CHOOSE_PLAYER",
        }
    }
}

/// Lobby before activation; nothing secret exists yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lobby {
    pub id: GameId,
    pub player_infos: Vec<PlayerInfo>,
}

/// Fields shared by every state after activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedGame {
    pub id: GameId,
    pub player_infos: Vec<PlayerInfo>,
    pub substate: Substate,
    pub active_player: Seat,
    pub players: Vec<Player>,
    pub locations: Vec<Location>,
    /// Tokens not yet claimed by any player.
    pub preparation_token_pool: u8,
    /// Append-only audit log.
    pub events: Vec<GameEvent>,
    pub(crate) scapegoat: PlayerColor,
}

impl StartedGame {
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn active(&self) -> &Player {
        &self.players[self.active_player]
    }

    pub fn seat_of(&self, player_id: &str) -> Option<Seat> {
        self.players.iter().position(|p| p.info.id == player_id)
    }

    pub fn seat_of_color(&self, color: PlayerColor) -> Option<Seat> {
        self.players.iter().position(|p| p.color == color)
    }

    pub fn location(&self, name: LocationName) -> Option<&Location> {
        self.locations.iter().find(|l| l.name == name)
    }

    pub(crate) fn location_mut(&mut self, name: LocationName) -> Option<&mut Location> {
        self.locations.iter_mut().find(|l| l.name == name)
    }

    pub(crate) fn scapegoat_seat(&self) -> Option<Seat> {
        self.seat_of_color(self.scapegoat)
    }

    /// Cards in hands, on locations and in the stash.
    pub fn card_count(&self) -> usize {
        let in_hands: usize = self.players.iter().map(|p| p.hand.len()).sum();
        let on_table: usize = self.locations.iter().map(Location::card_count).sum();
        in_hands + on_table
    }

    /// Pool plus every token held; always `PREPARATION_TOKENS`.
    pub fn token_count(&self) -> u8 {
        self.preparation_token_pool
            + self
                .players
                .iter()
                .map(|p| p.preparation_tokens)
                .sum::<u8>()
    }

    /// Frame cards committed so far, whether mid-collection or paused.
    pub fn committed_frame_cards(&self) -> &[FrameCard] {
        match &self.substate {
            Substate::FrameChooseCard { cards } => cards,
            _ => &[],
        }
    }

    pub(crate) fn debug_assert_invariants(&self) {
        debug_assert!(self.active_player < self.players.len());
        debug_assert_eq!(self.token_count(), PREPARATION_TOKENS);
        debug_assert_eq!(
            self.players
                .iter()
                .filter(|p| p.color == self.scapegoat)
                .count(),
            1
        );
    }
}

/// Why a started game is paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PauseReason {
    CopsCheck,
    FrameCheck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    WaitingForPlayers,
    Ongoing,
    PausedForCopsCheck,
    PausedForFrameCheck,
    Finished,
}

impl GameStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GameStatus::WaitingForPlayers => "WAITING_FOR_PLAYERS",
            GameStatus::Ongoing => "ONGOING",
            GameStatus::PausedForCopsCheck => "PAUSED_FOR_COPS_CHECK",
            GameStatus::PausedForFrameCheck => "PAUSED_FOR_FRAME_CHECK",
            GameStatus::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level aggregate: exactly one of five mutually exclusive states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Game {
    WaitingForPlayers(Lobby),
    Ongoing(StartedGame),
    PausedForCopsCheck {
        game: StartedGame,
        caller_id: PlayerId,
    },
    PausedForFrameCheck {
        game: StartedGame,
        frame_cards: Vec<FrameCard>,
    },
    Finished {
        game: StartedGame,
        winner_player_ids: Vec<PlayerId>,
    },
}

impl Game {
    /// A fresh lobby with a new game id.
    pub fn new_lobby(player_infos: Vec<PlayerInfo>) -> Self {
        Game::WaitingForPlayers(Lobby {
            id: GameId::generate(),
            player_infos,
        })
    }

    pub fn id(&self) -> GameId {
        match self {
            Game::WaitingForPlayers(lobby) => lobby.id,
            Game::Ongoing(game)
            | Game::PausedForCopsCheck { game, .. }
            | Game::PausedForFrameCheck { game, .. }
            | Game::Finished { game, .. } => game.id,
        }
    }

    pub fn status(&self) -> GameStatus {
        match self {
            Game::WaitingForPlayers(_) => GameStatus::WaitingForPlayers,
            Game::Ongoing(_) => GameStatus::Ongoing,
            Game::PausedForCopsCheck { .. } => GameStatus::PausedForCopsCheck,
            Game::PausedForFrameCheck { .. } => GameStatus::PausedForFrameCheck,
            Game::Finished { .. } => GameStatus::Finished,
        }
    }

    pub fn player_infos(&self) -> &[PlayerInfo] {
        match self {
            Game::WaitingForPlayers(lobby) => &lobby.player_infos,
            Game::Ongoing(game)
            | Game::PausedForCopsCheck { game, .. }
            | Game::PausedForFrameCheck { game, .. }
            | Game::Finished { game, .. } => &game.player_infos,
        }
    }

    pub fn started(&self) -> Option<&StartedGame> {
        match self {
            Game::WaitingForPlayers(_) => None,
            Game::Ongoing(game)
            | Game::PausedForCopsCheck { game, .. }
            | Game::PausedForFrameCheck { game, .. }
            | Game::Finished { game, .. } => Some(game),
        }
    }

    pub fn pause_reason(&self) -> Option<PauseReason> {
        match self {
            Game::PausedForCopsCheck { .. } => Some(PauseReason::CopsCheck),
            Game::PausedForFrameCheck { .. } => Some(PauseReason::FrameCheck),
            _ => None,
        }
    }

    pub fn is_member(&self, player_id: &str) -> bool {
        self.player_infos().iter().any(|pi| pi.id == player_id)
    }
}
