use std::ops::RangeInclusive;

use crate::domain::state::LocationName;

pub const PLAYER_COUNT_RANGE: RangeInclusive<usize> = 3..=6;
pub const PREPARATION_TOKENS: u8 = 2;
/// Face-down cards under the public Stash card.
pub const STASH_SIZE: usize = 3;
/// PREPARE, TRADE, SPY, STASH-public and the hidden stash.
pub const LOCATION_CARDS: usize = 4 + STASH_SIZE;
/// Seats to the left of the active player allowed to call the Cops out of turn.
pub const OUT_OF_TURN_COPS_OFFSET: usize = 3;
pub const OUT_OF_TURN_COPS_TABLE_SIZE: usize = 6;

/// Fixed starting location per seat, indexed by seat.
pub fn starting_locations(player_count: usize) -> Option<&'static [LocationName]> {
    use LocationName::{Prepare, Spy, Stash, Trade};
    match player_count {
        3 => Some(&[Prepare, Trade, Spy]),
        4 => Some(&[Prepare, Trade, Spy, Stash]),
        5 => Some(&[Prepare, Prepare, Trade, Spy, Stash]),
        6 => Some(&[Prepare, Prepare, Trade, Trade, Spy, Stash]),
        _ => None,
    }
}

/// Returns the seat `delta` steps clockwise from `seat`.
#[inline]
pub fn seat_offset(seat: usize, delta: usize, player_count: usize) -> usize {
    (seat + delta) % player_count
}

/// Returns the next seat clockwise.
#[inline]
pub fn next_seat(seat: usize, player_count: usize) -> usize {
    seat_offset(seat, 1, player_count)
}

/// Whether `seat` may call the Cops while `active` holds the turn.
///
/// Only a six-player table has this rule: the seat whose left-hand neighbour
/// three places over is playing.
pub fn may_call_cops_out_of_turn(seat: usize, active: usize, player_count: usize) -> bool {
    player_count == OUT_OF_TURN_COPS_TABLE_SIZE
        && seat != active
        && seat_offset(seat, OUT_OF_TURN_COPS_OFFSET, player_count) == active
}

/// Minimum incriminating cards for a frame attempt to succeed.
pub fn frame_threshold(player_count: usize) -> usize {
    player_count.saturating_sub(1)
}
