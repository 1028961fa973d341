//! Per-viewer projection of a game: what one player is allowed to see.
//!
//! [`GameView`] is a distinct type from [`Game`] and can only be built by
//! [`project`]. Hands of other players are face-down unless one of the
//! reveal rules applies:
//!
//! - FINISHED reveals every hand and every suspect.
//! - While paused, cards already committed to a frame attempt are face-up.
//! - During SPY_ON_PLAYER_CONFIRM the spied-on hand is face-up, but only in
//!   the active player's view.
//!
//! Hidden stash slots are face-down for everyone, and the Scapegoat's color
//! only exists in the FINISHED variant.

use serde::Serialize;

use crate::domain::events::GameEvent;
use crate::domain::state::{
    Area, FrameCard, Game, GameId, GameStatus, Location, LocationName, PlayerId, PlayerInfo, Seat,
    StartedGame, Substate,
};
use crate::domain::{Card, PlayerColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "face", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardView {
    Up { card: Card },
    Down,
}

impl CardView {
    pub fn card(&self) -> Option<Card> {
        match self {
            CardView::Up { card } => Some(*card),
            CardView::Down => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub player_info: PlayerInfo,
    pub color: PlayerColor,
    /// Present for the viewer's own seat, or for everyone once finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspect: Option<PlayerColor>,
    pub preparation_tokens: u8,
    pub location: LocationName,
    pub me: bool,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationView {
    pub name: LocationName,
    pub user_facing_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stash: Option<Vec<CardView>>,
}

/// Fields shared by every started-state view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartedView {
    pub id: GameId,
    pub player_infos: Vec<PlayerInfo>,
    pub substate: Substate,
    pub active_player: Seat,
    pub players: Vec<PlayerView>,
    pub locations: Vec<LocationView>,
    pub preparation_token_pool: u8,
    pub events: Vec<GameEvent>,
}

impl StartedView {
    pub fn me(&self) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.me)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "state",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum GameView {
    WaitingForPlayers {
        id: GameId,
        player_infos: Vec<PlayerInfo>,
    },
    Ongoing {
        #[serde(flatten)]
        game: StartedView,
    },
    PausedForCopsCheck {
        #[serde(flatten)]
        game: StartedView,
    },
    PausedForFrameCheck {
        #[serde(flatten)]
        game: StartedView,
        frame_cards: Vec<FrameCard>,
    },
    Finished {
        #[serde(flatten)]
        game: StartedView,
        winner_player_ids: Vec<PlayerId>,
        scapegoat: PlayerColor,
    },
}

impl GameView {
    pub fn status(&self) -> GameStatus {
        match self {
            GameView::WaitingForPlayers { .. } => GameStatus::WaitingForPlayers,
            GameView::Ongoing { .. } => GameStatus::Ongoing,
            GameView::PausedForCopsCheck { .. } => GameStatus::PausedForCopsCheck,
            GameView::PausedForFrameCheck { .. } => GameStatus::PausedForFrameCheck,
            GameView::Finished { .. } => GameStatus::Finished,
        }
    }

    pub fn started(&self) -> Option<&StartedView> {
        match self {
            GameView::WaitingForPlayers { .. } => None,
            GameView::Ongoing { game }
            | GameView::PausedForCopsCheck { game }
            | GameView::PausedForFrameCheck { game, .. }
            | GameView::Finished { game, .. } => Some(game),
        }
    }
}

/// Which reveal rules are in force for one projection.
struct Reveal<'a> {
    viewer: Option<Seat>,
    everything: bool,
    frame_cards: &'a [FrameCard],
    spied_on: Option<Seat>,
}

impl Reveal<'_> {
    fn card_visible(&self, owner: Seat, owner_id: &str, index: usize) -> bool {
        self.everything
            || self.viewer == Some(owner)
            || self.spied_on == Some(owner)
            || self
                .frame_cards
                .iter()
                .any(|fc| fc.player_id == owner_id && fc.player_card_index == index)
    }
}

/// Project `game` for `viewer_id`.
///
/// Pure and total: an unknown viewer gets the public view with no `me` seat.
pub fn project(game: &Game, viewer_id: &str) -> GameView {
    match game {
        Game::WaitingForPlayers(lobby) => GameView::WaitingForPlayers {
            id: lobby.id,
            player_infos: lobby.player_infos.clone(),
        },
        Game::Ongoing(g) => GameView::Ongoing {
            game: project_started(g, viewer_id, false, false),
        },
        Game::PausedForCopsCheck { game: g, .. } => GameView::PausedForCopsCheck {
            game: project_started(g, viewer_id, false, true),
        },
        Game::PausedForFrameCheck {
            game: g,
            frame_cards,
        } => GameView::PausedForFrameCheck {
            game: project_started(g, viewer_id, false, true),
            frame_cards: frame_cards.clone(),
        },
        Game::Finished {
            game: g,
            winner_player_ids,
        } => GameView::Finished {
            game: project_started(g, viewer_id, true, false),
            winner_player_ids: winner_player_ids.clone(),
            scapegoat: g.scapegoat,
        },
    }
}

fn project_started(g: &StartedGame, viewer_id: &str, finished: bool, paused: bool) -> StartedView {
    let viewer = g.seat_of(viewer_id);
    let spied_on = match &g.substate {
        Substate::SpyOnPlayerConfirm { other_player_id } if viewer == Some(g.active_player) => {
            g.seat_of(other_player_id)
        }
        _ => None,
    };
    let reveal = Reveal {
        viewer,
        everything: finished,
        frame_cards: if paused {
            g.committed_frame_cards()
        } else {
            &[]
        },
        spied_on,
    };

    let players = g
        .players
        .iter()
        .enumerate()
        .map(|(seat, p)| {
            let own = viewer == Some(seat);
            PlayerView {
                player_info: p.info.clone(),
                color: p.color,
                suspect: (own || finished).then_some(p.suspect),
                preparation_tokens: p.preparation_tokens,
                location: p.location,
                me: own,
                cards: p
                    .hand
                    .iter()
                    .enumerate()
                    .map(|(i, card)| {
                        if reveal.card_visible(seat, &p.info.id, i) {
                            CardView::Up { card: *card }
                        } else {
                            CardView::Down
                        }
                    })
                    .collect(),
            }
        })
        .collect();

    StartedView {
        id: g.id,
        player_infos: g.player_infos.clone(),
        substate: g.substate.clone(),
        active_player: g.active_player,
        players,
        locations: g.locations.iter().map(project_location).collect(),
        preparation_token_pool: g.preparation_token_pool,
        events: g.events.clone(),
    }
}

fn project_location(location: &Location) -> LocationView {
    let (card, stash) = match &location.area {
        Area::Evidence { card } => (Some(CardView::Up { card: *card }), None),
        Area::Stash { card, hidden } => (
            Some(CardView::Up { card: *card }),
            Some(hidden.iter().flatten().map(|_| CardView::Down).collect()),
        ),
        Area::Cops => (None, None),
    };
    LocationView {
        name: location.name,
        user_facing_name: location.name.user_facing_name(),
        card,
        stash,
    }
}
