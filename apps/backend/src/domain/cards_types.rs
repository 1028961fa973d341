//! Core card-related types: PlayerColor, CardKind, CardRestriction, Card

use std::fmt;

use serde::{Deserialize, Serialize};

/// The six canonical player colors, in catalogue order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerColor {
    Blue,
    Red,
    Yellow,
    Green,
    Orange,
    Purple,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 6] = [
        PlayerColor::Blue,
        PlayerColor::Red,
        PlayerColor::Yellow,
        PlayerColor::Green,
        PlayerColor::Orange,
        PlayerColor::Purple,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PlayerColor::Blue => "BLUE",
            PlayerColor::Red => "RED",
            PlayerColor::Yellow => "YELLOW",
            PlayerColor::Green => "GREEN",
            PlayerColor::Orange => "ORANGE",
            PlayerColor::Purple => "PURPLE",
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deck inclusion rule for a given table size.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(tag = "type", content = "playerCount", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardRestriction {
    /// Included when the table has at least this many players.
    Minimum(u8),
    /// Included only at exactly this table size.
    ExactSingle(u8),
    /// Included at any of the listed table sizes.
    ExactMany(&'static [u8]),
}

impl CardRestriction {
    pub fn includes(&self, player_count: usize) -> bool {
        match *self {
            CardRestriction::Minimum(min) => player_count >= min as usize,
            CardRestriction::ExactSingle(exact) => player_count == exact as usize,
            CardRestriction::ExactMany(counts) => counts.iter().any(|&c| c as usize == player_count),
        }
    }
}

/// What is printed on the face of a card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CardKind {
    Single { color: PlayerColor },
    Dual { colors: [PlayerColor; 2] },
    Neutral,
    Joker,
}

/// An immutable evidence card. Once dealt it only moves between containers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct Card {
    #[serde(flatten)]
    pub kind: CardKind,
    pub restriction: CardRestriction,
}

impl Card {
    pub const fn single(color: PlayerColor, restriction: CardRestriction) -> Self {
        Self {
            kind: CardKind::Single { color },
            restriction,
        }
    }

    pub const fn dual(a: PlayerColor, b: PlayerColor, restriction: CardRestriction) -> Self {
        Self {
            kind: CardKind::Dual { colors: [a, b] },
            restriction,
        }
    }

    pub const fn neutral(restriction: CardRestriction) -> Self {
        Self {
            kind: CardKind::Neutral,
            restriction,
        }
    }

    pub const fn joker() -> Self {
        Self {
            kind: CardKind::Joker,
            restriction: CardRestriction::ExactSingle(6),
        }
    }

    /// True if the card bears `color` (single or either half of a dual).
    pub fn bears_color(&self, color: PlayerColor) -> bool {
        match self.kind {
            CardKind::Single { color: c } => c == color,
            CardKind::Dual { colors } => colors.contains(&color),
            CardKind::Neutral | CardKind::Joker => false,
        }
    }

    /// True if the card counts as evidence against `scapegoat` in a frame attempt.
    pub fn incriminates(&self, scapegoat: PlayerColor) -> bool {
        matches!(self.kind, CardKind::Joker) || self.bears_color(scapegoat)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CardKind::Single { color } => write!(f, "{color}"),
            CardKind::Dual { colors: [a, b] } => write!(f, "{a}/{b}"),
            CardKind::Neutral => f.write_str("GREY"),
            CardKind::Joker => f.write_str("RAINBOW"),
        }
    }
}
