//! Append-only audit log entries.
//!
//! Accepted player actions and automatic resolutions serialize to
//! structurally distinct shapes: the former carry an `action` tag, the
//! latter an `event` tag.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::actions::GameAction;
use crate::domain::state::{FrameCard, PlayerId};
use crate::domain::Card;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GameEvent {
    Action(ActionRecord),
    Resolution(ResolutionRecord),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    #[serde(flatten)]
    pub action: GameAction,
    pub actor_id: PlayerId,
    /// The face-up card picked up by a SWAP_EVIDENCE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taken_card: Option<Card>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "event",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Resolution {
    CopsCalled { caller_id: PlayerId },
    FrameSuccess,
    FrameFailure { frame_cards: Vec<FrameCard> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionRecord {
    #[serde(flatten)]
    pub resolution: Resolution,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl GameEvent {
    pub(crate) fn action(
        action: GameAction,
        actor_id: &str,
        taken_card: Option<Card>,
        timestamp: OffsetDateTime,
    ) -> Self {
        GameEvent::Action(ActionRecord {
            action,
            actor_id: actor_id.to_owned(),
            taken_card,
            timestamp,
        })
    }

    pub(crate) fn resolution(resolution: Resolution, timestamp: OffsetDateTime) -> Self {
        GameEvent::Resolution(ResolutionRecord {
            resolution,
            timestamp,
        })
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        match self {
            GameEvent::Action(r) => r.timestamp,
            GameEvent::Resolution(r) => r.timestamp,
        }
    }
}
