//! The physical deck and player-count filtering.

use crate::domain::cards_types::CardRestriction::{ExactMany, ExactSingle, Minimum};
use crate::domain::cards_types::PlayerColor::{Blue, Green, Orange, Purple, Red, Yellow};
use crate::domain::Card;

/// Every card printed for the game, before any player-count filtering.
pub const DECK: [Card; 30] = [
    Card::single(Blue, Minimum(3)),
    Card::single(Blue, Minimum(3)),
    Card::single(Blue, Minimum(3)),
    Card::single(Red, Minimum(3)),
    Card::single(Red, Minimum(3)),
    Card::single(Red, Minimum(3)),
    Card::single(Yellow, Minimum(3)),
    Card::single(Yellow, Minimum(3)),
    Card::single(Yellow, Minimum(3)),
    Card::single(Green, Minimum(4)),
    Card::single(Green, Minimum(4)),
    Card::single(Green, Minimum(4)),
    Card::single(Orange, Minimum(5)),
    Card::single(Orange, Minimum(5)),
    Card::single(Orange, Minimum(5)),
    Card::single(Purple, Minimum(6)),
    Card::single(Purple, Minimum(6)),
    Card::single(Purple, Minimum(6)),
    Card::dual(Blue, Red, Minimum(4)),
    Card::dual(Blue, Yellow, Minimum(5)),
    Card::dual(Red, Orange, ExactSingle(5)),
    Card::dual(Red, Purple, ExactSingle(6)),
    Card::dual(Yellow, Green, Minimum(4)),
    Card::dual(Green, Orange, Minimum(5)),
    Card::dual(Orange, Purple, ExactSingle(6)),
    Card::neutral(ExactSingle(3)),
    Card::neutral(ExactMany(&[3, 5])),
    Card::neutral(ExactMany(&[3, 4, 5])),
    Card::neutral(ExactSingle(3)),
    Card::joker(),
];

/// Cards in play for a table of `player_count`, in catalogue order.
pub fn deck_for_player_count(player_count: usize) -> Vec<Card> {
    DECK.iter()
        .copied()
        .filter(|card| card.restriction.includes(player_count))
        .collect()
}
